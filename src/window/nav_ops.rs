use crate::error::{AppError, AppResult};

use super::actions::ActionId;
use super::command::CommandOutcome;
use super::state::DocumentWindow;
use super::zoom::{ZoomMode, clamp_scale, effective_scale, zoom_eq};

impl DocumentWindow {
    pub fn next_page(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::GoNextPage);
        let page_count = self.require_page_count()?;

        if self.current_page + 1 >= page_count {
            self.status.message = format!(
                "already at last page ({}/{})",
                self.current_page + 1,
                page_count
            );
            return Ok(CommandOutcome::Noop);
        }

        self.current_page += 1;
        self.status.message = format!("page {}/{}", self.current_page + 1, page_count);
        Ok(CommandOutcome::Applied)
    }

    pub fn prev_page(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::GoPreviousPage);
        let page_count = self.require_page_count()?;

        if self.current_page == 0 {
            self.status.message = "already at first page (1)".to_string();
            return Ok(CommandOutcome::Noop);
        }

        self.current_page -= 1;
        self.status.message = format!("page {}/{}", self.current_page + 1, page_count);
        Ok(CommandOutcome::Applied)
    }

    pub fn first_page(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::GoFirstPage);
        let page_count = self.require_page_count()?;

        if self.current_page == 0 {
            self.status.message = "already at first page (1)".to_string();
            return Ok(CommandOutcome::Noop);
        }

        self.current_page = 0;
        self.status.message = format!("page 1/{page_count}");
        Ok(CommandOutcome::Applied)
    }

    pub fn last_page(&mut self) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::GoLastPage);
        let page_count = self.require_page_count()?;

        let target = page_count - 1;
        if self.current_page == target {
            self.status.message = format!("already at last page ({}/{page_count})", target + 1);
            return Ok(CommandOutcome::Noop);
        }

        self.current_page = target;
        self.status.message = format!("page {}/{}", self.current_page + 1, page_count);
        Ok(CommandOutcome::Applied)
    }

    /// `page` is 1-based.
    pub fn goto_page(&mut self, page: usize) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(ActionId::GotoPage);
        let page_count = self.require_page_count()?;

        if page < 1 {
            return Err(AppError::invalid_argument("page number must be >= 1"));
        }
        if page > page_count {
            return Err(AppError::invalid_argument(
                "page number exceeds document length",
            ));
        }

        let target = page - 1;
        if self.current_page == target {
            self.status.message = format!("already at page {}/{}", target + 1, page_count);
            return Ok(CommandOutcome::Noop);
        }

        self.current_page = target;
        self.status.message = format!("page {}/{}", self.current_page + 1, page_count);
        Ok(CommandOutcome::Applied)
    }

    /// Scale the current page renders at, with fit modes resolved against the configured viewport.
    pub fn current_scale(&self) -> f32 {
        let page_size = self
            .backend()
            .and_then(|backend| backend.page_dimensions(self.current_page).ok())
            .unwrap_or((0.0, 0.0));
        let viewport = (
            self.config.view.viewport_width,
            self.config.view.viewport_height,
        );
        effective_scale(self.zoom, page_size, viewport, &self.config.view)
    }

    pub fn zoom_in(&mut self) -> AppResult<CommandOutcome> {
        let target = self.current_scale() * self.config.view.zoom_step;
        self.set_free_zoom(target, ActionId::ViewZoomIn)
    }

    pub fn zoom_out(&mut self) -> AppResult<CommandOutcome> {
        let target = self.current_scale() / self.config.view.zoom_step;
        self.set_free_zoom(target, ActionId::ViewZoomOut)
    }

    pub fn normal_size(&mut self) -> AppResult<CommandOutcome> {
        self.set_free_zoom(1.0, ActionId::ViewNormalSize)
    }

    pub fn best_fit(&mut self) -> AppResult<CommandOutcome> {
        self.set_zoom_mode(ZoomMode::BestFit, ActionId::ViewBestFit)
    }

    pub fn fit_width(&mut self) -> AppResult<CommandOutcome> {
        self.set_zoom_mode(ZoomMode::FitWidth, ActionId::ViewPageWidth)
    }

    fn set_free_zoom(&mut self, value: f32, action_id: ActionId) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(action_id);
        self.require_page_count()?;

        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::invalid_argument(
                "zoom must be a positive finite value",
            ));
        }

        let clamped = clamp_scale(value, &self.config.view);
        if let ZoomMode::Free(current) = self.zoom
            && zoom_eq(current, clamped)
        {
            self.status.message = format!("zoom unchanged ({:.2}x)", current);
            return Ok(CommandOutcome::Noop);
        }

        self.zoom = ZoomMode::Free(clamped);
        self.status.message = format!("zoom {:.2}x", clamped);
        Ok(CommandOutcome::Applied)
    }

    fn set_zoom_mode(&mut self, mode: ZoomMode, action_id: ActionId) -> AppResult<CommandOutcome> {
        self.status.last_action_id = Some(action_id);
        self.require_page_count()?;

        if self.zoom == mode {
            self.status.message = format!("zoom unchanged ({})", mode.label());
            return Ok(CommandOutcome::Noop);
        }

        self.zoom = mode;
        self.status.message = format!("zoom {} ({:.2}x)", mode.label(), self.current_scale());
        Ok(CommandOutcome::Applied)
    }
}
