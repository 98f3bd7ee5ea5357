use tracing::debug;

use crate::error::{AppError, AppResult};

use super::actions::ActionId;
use super::command::CommandOutcome;
use super::state::DocumentWindow;

impl DocumentWindow {
    pub fn open_find(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::EditFind);
        self.require_page_count()?;
        if self
            .backend()
            .is_none_or(|backend| backend.text_search().is_none())
        {
            self.status.message = AppError::FindNotSupported.to_string();
            return Err(AppError::FindNotSupported);
        }

        if self.find.visible {
            return Ok(CommandOutcome::Noop);
        }
        self.find.visible = true;
        self.fullscreen.place_popup(true);
        self.status.message = "find bar shown".to_string();
        Ok(CommandOutcome::Applied)
    }

    pub fn close_find(&mut self) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::CloseFind);
        if !self.find.visible {
            return CommandOutcome::Noop;
        }
        self.find.visible = false;
        self.find.cancel();
        self.fullscreen.place_popup(false);
        self.status.message = "find bar hidden".to_string();
        CommandOutcome::Applied
    }

    /// Runs `query` over every page; an empty query or a hidden bar cancels instead.
    pub fn set_search(&mut self, query: &str, case_sensitive: bool) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::EditFind);
        if !self.find.visible || query.trim().is_empty() {
            let had_search = self.find.is_active();
            self.find.cancel();
            return Ok(if had_search {
                CommandOutcome::Applied
            } else {
                CommandOutcome::Noop
            });
        }

        let page_count = self.require_page_count()?;
        let from_page = self.current_page;
        let Some(document) = self.document.as_ref() else {
            return Err(AppError::unsupported("no document is open"));
        };
        let Some(search) = document.backend.text_search() else {
            return Err(AppError::FindNotSupported);
        };

        let hit_page = self
            .find
            .run(search, page_count, query, case_sensitive, from_page)?;
        debug!(
            query,
            case_sensitive,
            pages = self.find.hits.len(),
            "search finished"
        );
        if let Some(page) = hit_page {
            self.current_page = page;
        }
        self.status.message = self.find.status.clone();
        Ok(CommandOutcome::Applied)
    }

    pub fn find_next(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::FindNext);
        self.step_hit(true)
    }

    pub fn find_previous(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::FindPrevious);
        self.step_hit(false)
    }

    fn step_hit(&mut self, forward: bool) -> AppResult<CommandOutcome> {
        let page_count = self.require_page_count()?;
        let Some(page) = self.find.step(forward) else {
            self.status.message = "no search hits available".to_string();
            return Ok(CommandOutcome::Noop);
        };

        let index = self.find.current.map_or(0, |index| index + 1);
        self.current_page = page;
        self.status.message = format!(
            "hit {}/{} on page {}/{}",
            index,
            self.find.hits.len(),
            page + 1,
            page_count
        );
        Ok(CommandOutcome::Applied)
    }
}
