//! Toolkit-free model of the viewer window.
//!
//! [`DocumentWindow`] owns at most one loaded document and the state around
//! it. Input from the user or the window system arrives as [`Command`]s and
//! goes through [`dispatch`].

mod actions;
mod command;
mod find;
mod find_ops;
mod fullscreen;
mod nav_ops;
mod parse;
mod state;
mod status;
mod view_ops;
mod zoom;

#[cfg(test)]
mod tests;

pub use actions::{ActionId, ActionSpec, action_for_accelerator, action_spec, action_specs};
pub use command::{Command, CommandDispatchResult, CommandOutcome, WindowEvent, dispatch};
pub use find::{ContainsMatcher, FindState, PageHits, SearchMatcher};
pub use fullscreen::{ExitPopup, FullscreenState, Rect, TextDirection, exit_popup_position};
pub use parse::{ArgKind, ArgSpec, CommandSpec, command_for_action, command_registry, parse_command_text};
pub use state::{Chrome, DocumentWindow, OPEN_FAILED_SUMMARY, StatusState, WINDOW_TITLE};
pub use status::{HELP_MESSAGE_CONTEXT, StatusBar};
pub use zoom::{ZoomMode, effective_scale};
