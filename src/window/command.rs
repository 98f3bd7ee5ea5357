use crate::error::AppResult;
use crate::locator::ResourceLocator;

use super::actions::ActionId;
use super::fullscreen::Rect;
use super::state::DocumentWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
}

/// Everything the window reacts to, whether the user asked for it or the
/// window system reported it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open { locator: String },
    CloseWindow,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GotoPage { page: usize },
    ZoomIn,
    ZoomOut,
    NormalSize,
    BestFit,
    FitWidth,
    SetToolbar { visible: Option<bool> },
    SetStatusbar { visible: Option<bool> },
    SetSidebar { visible: Option<bool> },
    SetFullscreen { active: Option<bool> },
    OpenFind,
    Search { query: String, case_sensitive: Option<bool> },
    FindNext,
    FindPrevious,
    CloseFind,
    MenuItemSelected { action: ActionId },
    MenuItemDeselected,
    WindowStateChanged { fullscreen: bool },
    FocusLost,
    ExitPopupClicked,
    MonitorChanged { monitor: Rect },
    PopupResized { width: i32, height: i32 },
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::Open { .. } => ActionId::FileOpen,
            Self::CloseWindow => ActionId::FileCloseWindow,
            Self::FirstPage => ActionId::GoFirstPage,
            Self::PrevPage => ActionId::GoPreviousPage,
            Self::NextPage => ActionId::GoNextPage,
            Self::LastPage => ActionId::GoLastPage,
            Self::GotoPage { .. } => ActionId::GotoPage,
            Self::ZoomIn => ActionId::ViewZoomIn,
            Self::ZoomOut => ActionId::ViewZoomOut,
            Self::NormalSize => ActionId::ViewNormalSize,
            Self::BestFit => ActionId::ViewBestFit,
            Self::FitWidth => ActionId::ViewPageWidth,
            Self::SetToolbar { .. } => ActionId::ViewToolbar,
            Self::SetStatusbar { .. } => ActionId::ViewStatusbar,
            Self::SetSidebar { .. } => ActionId::ViewSidebar,
            Self::SetFullscreen { .. } => ActionId::ViewFullscreen,
            Self::OpenFind | Self::Search { .. } => ActionId::EditFind,
            Self::FindNext => ActionId::FindNext,
            Self::FindPrevious => ActionId::FindPrevious,
            Self::CloseFind => ActionId::CloseFind,
            Self::MenuItemSelected { .. } | Self::MenuItemDeselected => ActionId::MenuHover,
            Self::WindowStateChanged { .. } => ActionId::WindowState,
            Self::FocusLost => ActionId::FocusOut,
            Self::ExitPopupClicked | Self::PopupResized { .. } => ActionId::ExitPopup,
            Self::MonitorChanged { .. } => ActionId::Monitor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    CommandExecuted {
        id: ActionId,
        outcome: CommandOutcome,
    },
    DocumentChanged {
        title: String,
    },
    PageChanged {
        from: usize,
        to: usize,
    },
    FullscreenChanged {
        active: bool,
    },
    FullscreenRequested {
        active: bool,
    },
}

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub emitted_events: Vec<WindowEvent>,
}

pub fn dispatch(window: &mut DocumentWindow, command: Command) -> AppResult<CommandDispatchResult> {
    let previous_page = window.current_page();
    let previous_title = window.title();
    let previous_fullscreen = window.fullscreen().active;
    let previous_request = window.fullscreen().requested;
    let action_id = command.action_id();

    let outcome = match command {
        Command::Open { locator } => {
            let locator = ResourceLocator::new(locator)?;
            window.open(&locator)
        }
        Command::CloseWindow => Ok(window.close()),
        Command::FirstPage => window.first_page(),
        Command::PrevPage => window.prev_page(),
        Command::NextPage => window.next_page(),
        Command::LastPage => window.last_page(),
        Command::GotoPage { page } => window.goto_page(page),
        Command::ZoomIn => window.zoom_in(),
        Command::ZoomOut => window.zoom_out(),
        Command::NormalSize => window.normal_size(),
        Command::BestFit => window.best_fit(),
        Command::FitWidth => window.fit_width(),
        Command::SetToolbar { visible } => {
            let visible = visible.unwrap_or(!window.chrome().toolbar);
            Ok(window.set_toolbar_visible(visible))
        }
        Command::SetStatusbar { visible } => {
            let visible = visible.unwrap_or(!window.chrome().statusbar);
            Ok(window.set_statusbar_visible(visible))
        }
        Command::SetSidebar { visible } => {
            let visible = visible.unwrap_or(!window.chrome().sidebar);
            Ok(window.set_sidebar_visible(visible))
        }
        Command::SetFullscreen { active } => {
            let active = active.unwrap_or(!window.fullscreen().toggle);
            Ok(window.set_fullscreen(active))
        }
        Command::OpenFind => window.open_find(),
        Command::Search {
            query,
            case_sensitive,
        } => {
            let case_sensitive = case_sensitive.unwrap_or(window.find().case_sensitive);
            window.set_search(&query, case_sensitive)
        }
        Command::FindNext => window.find_next(),
        Command::FindPrevious => window.find_previous(),
        Command::CloseFind => Ok(window.close_find()),
        Command::MenuItemSelected { action } => Ok(window.menu_item_selected(action)),
        Command::MenuItemDeselected => Ok(window.menu_item_deselected()),
        Command::WindowStateChanged { fullscreen } => Ok(window.window_state_changed(fullscreen)),
        Command::FocusLost => Ok(window.focus_lost()),
        Command::ExitPopupClicked => Ok(window.exit_popup_clicked()),
        Command::MonitorChanged { monitor } => Ok(window.monitor_changed(monitor)),
        Command::PopupResized { width, height } => Ok(window.popup_resized(width, height)),
    }?;

    let mut emitted_events = Vec::new();
    let title = window.title();
    if title != previous_title || matches!(action_id, ActionId::FileOpen) {
        emitted_events.push(WindowEvent::DocumentChanged { title });
    }
    if window.current_page() != previous_page {
        emitted_events.push(WindowEvent::PageChanged {
            from: previous_page,
            to: window.current_page(),
        });
    }
    if window.fullscreen().active != previous_fullscreen {
        emitted_events.push(WindowEvent::FullscreenChanged {
            active: window.fullscreen().active,
        });
    }
    if let Some(active) = window.fullscreen().requested
        && previous_request != Some(active)
    {
        emitted_events.push(WindowEvent::FullscreenRequested { active });
    }
    emitted_events.push(WindowEvent::CommandExecuted {
        id: action_id,
        outcome,
    });

    Ok(CommandDispatchResult {
        outcome,
        emitted_events,
    })
}
