use tracing::debug;

use super::actions::{ActionId, action_spec};
use super::command::CommandOutcome;
use super::fullscreen::Rect;
use super::state::DocumentWindow;
use super::status::HELP_MESSAGE_CONTEXT;

impl DocumentWindow {
    pub fn set_toolbar_visible(&mut self, visible: bool) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::ViewToolbar);
        let changed = self.chrome.toolbar != visible;
        self.chrome.toolbar = visible;
        self.chrome_outcome("toolbar", visible, changed)
    }

    pub fn set_statusbar_visible(&mut self, visible: bool) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::ViewStatusbar);
        let changed = self.chrome.statusbar != visible;
        self.chrome.statusbar = visible;
        self.chrome_outcome("statusbar", visible, changed)
    }

    pub fn set_sidebar_visible(&mut self, visible: bool) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::ViewSidebar);
        let changed = self.chrome.sidebar != visible;
        self.chrome.sidebar = visible;
        self.chrome_outcome("sidebar", visible, changed)
    }

    fn chrome_outcome(&mut self, name: &str, visible: bool, changed: bool) -> CommandOutcome {
        let state = if visible { "shown" } else { "hidden" };
        if !changed {
            self.status.message = format!("{name} unchanged ({state})");
            return CommandOutcome::Noop;
        }
        self.status.message = format!("{name} {state}");
        CommandOutcome::Applied
    }

    /// Shows the hovered menu item's tooltip in the status bar.
    pub fn menu_item_selected(&mut self, id: ActionId) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::MenuHover);
        let Some(tooltip) = action_spec(id).map(|spec| spec.tooltip) else {
            return CommandOutcome::Noop;
        };
        self.statusbar.push(HELP_MESSAGE_CONTEXT, tooltip);
        CommandOutcome::Applied
    }

    pub fn menu_item_deselected(&mut self) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::MenuHover);
        match self.statusbar.pop(HELP_MESSAGE_CONTEXT) {
            Some(_) => CommandOutcome::Applied,
            None => CommandOutcome::Noop,
        }
    }

    /// Flips the fullscreen toggle and asks the window manager for the new state.
    ///
    /// Nothing changes on screen until [`DocumentWindow::window_state_changed`] reports back.
    pub fn set_fullscreen(&mut self, active: bool) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::ViewFullscreen);
        if self.fullscreen.toggle == active && self.fullscreen.active == active {
            self.status.message = format!(
                "fullscreen unchanged ({})",
                if active { "on" } else { "off" }
            );
            return CommandOutcome::Noop;
        }

        self.fullscreen.toggle = active;
        self.fullscreen.requested = Some(active);
        self.status.message = if active {
            "entering fullscreen".to_string()
        } else {
            "leaving fullscreen".to_string()
        };
        CommandOutcome::Applied
    }

    pub fn take_fullscreen_request(&mut self) -> Option<bool> {
        self.fullscreen.requested.take()
    }

    /// Applies a window-state report from the window manager.
    pub fn window_state_changed(&mut self, fullscreen: bool) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::WindowState);
        // sync the toggle without issuing another request
        self.fullscreen.toggle = fullscreen;
        if self.fullscreen.requested == Some(fullscreen) {
            self.fullscreen.requested = None;
        }
        if self.fullscreen.active == fullscreen {
            return CommandOutcome::Noop;
        }

        self.fullscreen.active = fullscreen;
        if fullscreen {
            self.fullscreen.show_popup(self.find.visible);
            self.status.message = "fullscreen on".to_string();
        } else {
            self.fullscreen.hide_popup();
            self.status.message = "fullscreen off".to_string();
        }
        debug!(fullscreen, "window state changed");
        CommandOutcome::Applied
    }

    pub fn focus_lost(&mut self) -> CommandOutcome {
        if !self.fullscreen.active {
            self.status.last_action_id = Some(ActionId::FocusOut);
            return CommandOutcome::Noop;
        }
        let outcome = self.set_fullscreen(false);
        self.status.last_action_id = Some(ActionId::FocusOut);
        outcome
    }

    pub fn exit_popup_clicked(&mut self) -> CommandOutcome {
        let outcome = self.set_fullscreen(false);
        self.status.last_action_id = Some(ActionId::ExitPopup);
        outcome
    }

    pub fn monitor_changed(&mut self, monitor: Rect) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::Monitor);
        if self.fullscreen.monitor == monitor {
            return CommandOutcome::Noop;
        }
        self.fullscreen.monitor = monitor;
        self.fullscreen.place_popup(self.find.visible);
        CommandOutcome::Applied
    }

    pub fn popup_resized(&mut self, width: i32, height: i32) -> CommandOutcome {
        self.status.last_action_id = Some(ActionId::ExitPopup);
        let size = (width.max(1), height.max(1));
        if self.fullscreen.popup_size == size {
            return CommandOutcome::Noop;
        }
        self.fullscreen.popup_size = size;
        self.fullscreen.place_popup(self.find.visible);
        CommandOutcome::Applied
    }
}
