use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::DocumentBackend;
use crate::config::Config;
use crate::error::{AppError, AppResult, LoadError};
use crate::locator::ResourceLocator;
use crate::resolver::Resolver;

use super::actions::{ActionId, action_specs};
use super::command::CommandOutcome;
use super::find::FindState;
use super::fullscreen::{FullscreenState, Rect};
use super::status::StatusBar;
use super::zoom::ZoomMode;

pub const WINDOW_TITLE: &str = "Document Viewer";
pub const OPEN_FAILED_SUMMARY: &str = "Unable to open document";

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

/// User preferences for the window chrome, as set by the View toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub toolbar: bool,
    pub statusbar: bool,
    pub sidebar: bool,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            toolbar: true,
            statusbar: true,
            sidebar: false,
        }
    }
}

pub(crate) struct OpenDocument {
    pub(crate) locator: ResourceLocator,
    pub(crate) backend: Box<dyn DocumentBackend>,
    pub(crate) page_count: usize,
}

pub struct DocumentWindow {
    pub(crate) config: Config,
    resolver: Resolver,
    pub(crate) document: Option<OpenDocument>,
    pub(crate) current_page: usize,
    pub(crate) zoom: ZoomMode,
    pub(crate) chrome: Chrome,
    pub(crate) find: FindState,
    pub(crate) fullscreen: FullscreenState,
    pub(crate) statusbar: StatusBar,
    pub(crate) status: StatusState,
    last_error: Option<LoadError>,
}

impl DocumentWindow {
    pub fn new(config: Config) -> Self {
        let resolver = Resolver::new(&config);
        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: Config, resolver: Resolver) -> Self {
        let monitor = Rect::new(
            0,
            0,
            config.view.viewport_width as i32,
            config.view.viewport_height as i32,
        );
        let fullscreen = FullscreenState::new(&config.fullscreen, monitor);
        let find = FindState {
            case_sensitive: config.find.case_sensitive,
            ..FindState::default()
        };

        Self {
            config,
            resolver,
            document: None,
            current_page: 0,
            zoom: ZoomMode::default(),
            chrome: Chrome::default(),
            find,
            fullscreen,
            statusbar: StatusBar::default(),
            status: StatusState::default(),
            last_error: None,
        }
    }

    /// Opens `locator`, replacing the current document only when loading succeeds.
    pub fn open(&mut self, locator: &ResourceLocator) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::FileOpen);

        let loaded = self
            .resolver
            .resolve_and_load(locator)
            .and_then(|backend| match backend.page_count() {
                Ok(count) if count > 0 => Ok((backend, count)),
                Ok(_) => Err(LoadError::BackendLoadFailed(
                    "document has no pages".to_string(),
                )),
                Err(source) => Err(LoadError::BackendLoadFailed(source.to_string())),
            });
        let (backend, page_count) = match loaded {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(locator = %locator, error = %err, "{OPEN_FAILED_SUMMARY}");
                self.status.message = format!("{OPEN_FAILED_SUMMARY}: {err}");
                self.last_error = Some(err.clone());
                return Err(AppError::Load(err));
            }
        };

        info!(
            locator = %locator,
            kind = %backend.kind(),
            pages = page_count,
            "document opened"
        );
        self.document = Some(OpenDocument {
            locator: locator.clone(),
            backend,
            page_count,
        });
        self.current_page = 0;
        self.zoom = ZoomMode::default();
        self.find.cancel();
        self.last_error = None;
        self.status.message = format!("opened {} ({page_count} pages)", locator.display_name());
        Ok(CommandOutcome::Applied)
    }

    /// Drops the current document, as closing the window does.
    pub fn close(&mut self) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::FileCloseWindow);
        let Some(document) = self.document.take() else {
            self.status.message = "no document to close".to_string();
            return CommandOutcome::Noop;
        };

        debug!(locator = %document.locator, "document closed");
        self.current_page = 0;
        self.find.cancel();
        self.find.visible = false;
        self.fullscreen.place_popup(false);
        self.status.message = format!("closed {}", document.locator.display_name());
        CommandOutcome::Applied
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_none()
    }

    pub fn title(&self) -> String {
        let Some(document) = &self.document else {
            return WINDOW_TITLE.to_string();
        };
        let name = document
            .backend
            .title()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| document.locator.display_name());
        format!("{name} - {WINDOW_TITLE}")
    }

    pub fn backend(&self) -> Option<&dyn DocumentBackend> {
        self.document.as_ref().map(|document| document.backend.as_ref())
    }

    pub fn locator(&self) -> Option<&ResourceLocator> {
        self.document.as_ref().map(|document| &document.locator)
    }

    pub fn path(&self) -> Option<&Path> {
        self.backend()?.path()
    }

    pub fn page_count(&self) -> Option<usize> {
        self.document.as_ref().map(|document| document.page_count)
    }

    /// 0-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn zoom(&self) -> ZoomMode {
        self.zoom
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    pub fn find(&self) -> &FindState {
        &self.find
    }

    pub fn fullscreen(&self) -> &FullscreenState {
        &self.fullscreen
    }

    pub fn statusbar(&self) -> &StatusBar {
        &self.statusbar
    }

    pub fn status(&self) -> &StatusState {
        &self.status
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn menubar_visible(&self) -> bool {
        !self.fullscreen.active
    }

    pub fn toolbar_visible(&self) -> bool {
        self.chrome.toolbar
    }

    pub fn statusbar_visible(&self) -> bool {
        self.chrome.statusbar && !self.fullscreen.active
    }

    pub fn sidebar_visible(&self) -> bool {
        self.chrome.sidebar
    }

    pub fn is_sensitive(&self, id: ActionId) -> bool {
        let page = self.current_page + 1;
        let n_pages = self.page_count().unwrap_or(1);
        match id {
            ActionId::GoFirstPage | ActionId::GoPreviousPage => page > 1,
            ActionId::GoNextPage | ActionId::GoLastPage => page < n_pages,
            ActionId::EditFind
            | ActionId::ViewZoomIn
            | ActionId::ViewZoomOut
            | ActionId::ViewNormalSize
            | ActionId::ViewBestFit
            | ActionId::ViewPageWidth => !self.is_empty(),
            _ => true,
        }
    }

    pub fn action_sensitivity(&self) -> Vec<(ActionId, bool)> {
        action_specs()
            .iter()
            .map(|spec| (spec.id, self.is_sensitive(spec.id)))
            .collect()
    }

    pub(crate) fn require_page_count(&mut self) -> AppResult<usize> {
        if let Some(page_count) = self.page_count() {
            return Ok(page_count);
        }

        self.status.message = "command requires an open document".to_string();
        Err(AppError::unsupported("no document is open"))
    }
}
