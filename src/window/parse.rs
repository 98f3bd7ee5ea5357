use crate::error::{AppError, AppResult};

use super::actions::{ActionId, action_for_accelerator};
use super::command::Command;
use super::fullscreen::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Integer,
    Text,
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

const fn arg(name: &'static str, kind: ArgKind, required: bool) -> ArgSpec {
    ArgSpec {
        name,
        kind,
        required,
    }
}

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_OPEN: [ArgSpec; 1] = [arg("locator", ArgKind::Text, true)];
const ARGS_PAGE: [ArgSpec; 1] = [arg("page", ArgKind::Integer, true)];
const ARGS_SWITCH: [ArgSpec; 1] = [arg("state", ArgKind::Switch, false)];
const ARGS_SEARCH: [ArgSpec; 2] = [
    arg("query", ArgKind::Text, true),
    arg("case", ArgKind::Switch, false),
];
const ARGS_ACTION: [ArgSpec; 1] = [arg("action", ArgKind::Text, true)];
const ARGS_KEY: [ArgSpec; 1] = [arg("accelerator", ArgKind::Text, true)];
const ARGS_WINDOW_STATE: [ArgSpec; 1] = [arg("state", ArgKind::Switch, true)];
const ARGS_MONITOR: [ArgSpec; 4] = [
    arg("x", ArgKind::Integer, true),
    arg("y", ArgKind::Integer, true),
    arg("width", ArgKind::Integer, true),
    arg("height", ArgKind::Integer, true),
];
const ARGS_POPUP_SIZE: [ArgSpec; 2] = [
    arg("width", ArgKind::Integer, true),
    arg("height", ArgKind::Integer, true),
];

const fn spec(id: &'static str, title: &'static str, args: &'static [ArgSpec]) -> CommandSpec {
    CommandSpec { id, title, args }
}

const COMMAND_SPECS: [CommandSpec; 27] = [
    spec("open", "Open", &ARGS_OPEN),
    spec("close-window", "Close Window", &NO_ARGS),
    spec("first-page", "First Page", &NO_ARGS),
    spec("prev-page", "Previous Page", &NO_ARGS),
    spec("next-page", "Next Page", &NO_ARGS),
    spec("last-page", "Last Page", &NO_ARGS),
    spec("goto-page", "Go to Page", &ARGS_PAGE),
    spec("zoom-in", "Zoom In", &NO_ARGS),
    spec("zoom-out", "Zoom Out", &NO_ARGS),
    spec("normal-size", "Normal Size", &NO_ARGS),
    spec("best-fit", "Best Fit", &NO_ARGS),
    spec("fit-width", "Fit Page Width", &NO_ARGS),
    spec("toolbar", "Toolbar", &ARGS_SWITCH),
    spec("statusbar", "Statusbar", &ARGS_SWITCH),
    spec("sidebar", "Sidebar", &ARGS_SWITCH),
    spec("fullscreen", "Fullscreen", &ARGS_SWITCH),
    spec("find", "Find", &NO_ARGS),
    spec("search", "Search", &ARGS_SEARCH),
    spec("find-next", "Find Next", &NO_ARGS),
    spec("find-prev", "Find Previous", &NO_ARGS),
    spec("close-find", "Close Find Bar", &NO_ARGS),
    spec("menu-select", "Hover Menu Item", &ARGS_ACTION),
    spec("menu-deselect", "Leave Menu Item", &NO_ARGS),
    spec("window-state", "Window State Changed", &ARGS_WINDOW_STATE),
    spec("focus-out", "Focus Lost", &NO_ARGS),
    spec("monitor", "Monitor Geometry", &ARGS_MONITOR),
    spec("popup-size", "Exit Popup Size", &ARGS_POPUP_SIZE),
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

/// Parses one command line such as `goto-page 3` or `search "hello world" match-case`.
///
/// `key <accelerator>` and `exit-popup` are accepted as shortcuts on top of the registry.
pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = match trimmed.find(char::is_whitespace) {
        Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
        None => (trimmed, ""),
    };

    match id {
        "key" => return parse_key(args_text),
        "exit-popup" => return parse_no_args(id, args_text, Command::ExitPopupClicked),
        _ => {}
    }
    if !COMMAND_SPECS.iter().any(|spec| spec.id == id) {
        return Err(AppError::invalid_argument(format!("unknown command: {id}")));
    }

    match id {
        "open" => {
            let locator = unquote(args_text);
            if locator.is_empty() {
                return Err(AppError::invalid_argument(
                    "open requires 1 argument: locator",
                ));
            }
            Ok(Command::Open {
                locator: locator.to_string(),
            })
        }
        "close-window" => parse_no_args(id, args_text, Command::CloseWindow),
        "first-page" => parse_no_args(id, args_text, Command::FirstPage),
        "prev-page" => parse_no_args(id, args_text, Command::PrevPage),
        "next-page" => parse_no_args(id, args_text, Command::NextPage),
        "last-page" => parse_no_args(id, args_text, Command::LastPage),
        "goto-page" => parse_goto_page(args_text),
        "zoom-in" => parse_no_args(id, args_text, Command::ZoomIn),
        "zoom-out" => parse_no_args(id, args_text, Command::ZoomOut),
        "normal-size" => parse_no_args(id, args_text, Command::NormalSize),
        "best-fit" => parse_no_args(id, args_text, Command::BestFit),
        "fit-width" => parse_no_args(id, args_text, Command::FitWidth),
        "toolbar" => parse_switch(id, args_text).map(|visible| Command::SetToolbar { visible }),
        "statusbar" => {
            parse_switch(id, args_text).map(|visible| Command::SetStatusbar { visible })
        }
        "sidebar" => parse_switch(id, args_text).map(|visible| Command::SetSidebar { visible }),
        "fullscreen" => {
            parse_switch(id, args_text).map(|active| Command::SetFullscreen { active })
        }
        "find" => parse_no_args(id, args_text, Command::OpenFind),
        "search" => parse_search(args_text),
        "find-next" => parse_no_args(id, args_text, Command::FindNext),
        "find-prev" => parse_no_args(id, args_text, Command::FindPrevious),
        "close-find" => parse_no_args(id, args_text, Command::CloseFind),
        "menu-select" => {
            let action = ActionId::parse(args_text.trim())
                .ok_or_else(|| AppError::invalid_argument("unknown action name"))?;
            Ok(Command::MenuItemSelected { action })
        }
        "menu-deselect" => parse_no_args(id, args_text, Command::MenuItemDeselected),
        "window-state" => match args_text.trim() {
            "fullscreen" => Ok(Command::WindowStateChanged { fullscreen: true }),
            "normal" => Ok(Command::WindowStateChanged { fullscreen: false }),
            _ => Err(AppError::invalid_argument(
                "window-state expects fullscreen or normal",
            )),
        },
        "focus-out" => parse_no_args(id, args_text, Command::FocusLost),
        "monitor" => {
            let [x, y, width, height] = parse_integers::<4>(id, args_text)?;
            Ok(Command::MonitorChanged {
                monitor: Rect::new(x, y, width, height),
            })
        }
        "popup-size" => {
            let [width, height] = parse_integers::<2>(id, args_text)?;
            Ok(Command::PopupResized { width, height })
        }
        _ => Err(AppError::unsupported(
            "command parser is out of sync with registry",
        )),
    }
}

/// Command an accelerator triggers; actions that need input of their own have none.
pub fn command_for_action(id: ActionId) -> Option<Command> {
    let command = match id {
        ActionId::FileCloseWindow => Command::CloseWindow,
        ActionId::EditFind => Command::OpenFind,
        ActionId::ViewZoomIn => Command::ZoomIn,
        ActionId::ViewZoomOut => Command::ZoomOut,
        ActionId::ViewNormalSize => Command::NormalSize,
        ActionId::ViewBestFit => Command::BestFit,
        ActionId::ViewPageWidth => Command::FitWidth,
        ActionId::GoPreviousPage => Command::PrevPage,
        ActionId::GoNextPage => Command::NextPage,
        ActionId::GoFirstPage => Command::FirstPage,
        ActionId::GoLastPage => Command::LastPage,
        ActionId::ViewToolbar => Command::SetToolbar { visible: None },
        ActionId::ViewStatusbar => Command::SetStatusbar { visible: None },
        ActionId::ViewSidebar => Command::SetSidebar { visible: None },
        ActionId::ViewFullscreen => Command::SetFullscreen { active: None },
        _ => return None,
    };
    Some(command)
}

fn parse_key(args_text: &str) -> AppResult<Command> {
    let accelerator = args_text.trim();
    if accelerator.is_empty() {
        return Err(AppError::invalid_argument(
            "key requires 1 argument: accelerator",
        ));
    }
    let action = action_for_accelerator(accelerator)
        .ok_or_else(|| AppError::invalid_argument(format!("unbound accelerator: {accelerator}")))?;
    command_for_action(action).ok_or_else(|| {
        AppError::unsupported(format!("{} needs more than a key press", action.as_str()))
    })
}

fn parse_no_args(id: &str, args_text: &str, cmd: Command) -> AppResult<Command> {
    if args_text.is_empty() {
        return Ok(cmd);
    }
    Err(AppError::invalid_argument(format!(
        "{id} does not accept arguments"
    )))
}

fn parse_switch(id: &str, args_text: &str) -> AppResult<Option<bool>> {
    match args_text.trim() {
        "" | "toggle" => Ok(None),
        "on" | "show" => Ok(Some(true)),
        "off" | "hide" => Ok(Some(false)),
        _ => Err(AppError::invalid_argument(format!(
            "{id} expects on, off or toggle"
        ))),
    }
}

fn parse_goto_page(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(page_text) = parts.next() else {
        return Err(AppError::invalid_argument(
            "goto-page requires 1 argument: page",
        ));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument(
            "goto-page accepts exactly 1 argument",
        ));
    }

    let page = page_text
        .parse::<i64>()
        .map_err(|_| AppError::invalid_argument("goto-page page must be an integer"))?;
    if page < 1 {
        return Err(AppError::invalid_argument("page number must be >= 1"));
    }

    Ok(Command::GotoPage {
        page: page as usize,
    })
}

fn parse_search(args_text: &str) -> AppResult<Command> {
    let trimmed = args_text.trim();
    let mut query = trimmed;
    let mut case_sensitive = None;

    if let Some((head, tail)) = split_last_token(trimmed) {
        let parsed = match tail {
            "match-case" => Some(true),
            "ignore-case" => Some(false),
            _ => None,
        };
        if parsed.is_some() {
            query = head;
            case_sensitive = parsed;
        }
    }

    let query = unquote(query);
    if query.is_empty() {
        return Err(AppError::invalid_argument(
            "search requires at least 1 argument: query",
        ));
    }

    Ok(Command::Search {
        query: query.to_string(),
        case_sensitive,
    })
}

fn parse_integers<const N: usize>(id: &str, args_text: &str) -> AppResult<[i32; N]> {
    let parts: Vec<&str> = args_text.split_whitespace().collect();
    if parts.len() != N {
        return Err(AppError::invalid_argument(format!(
            "{id} requires exactly {N} integer arguments"
        )));
    }

    let mut values = [0; N];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = part
            .parse::<i32>()
            .map_err(|_| AppError::invalid_argument(format!("{id} arguments must be integers")))?;
    }
    Ok(values)
}

fn split_last_token(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_end();
    let index = trimmed.rfind(char::is_whitespace)?;
    Some((trimmed[..index].trim_end(), trimmed[index + 1..].trim_start()))
}

fn unquote(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
}
