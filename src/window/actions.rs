#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionId {
    FileOpen,
    FileCloseWindow,
    EditFind,
    ViewZoomIn,
    ViewZoomOut,
    ViewNormalSize,
    ViewBestFit,
    ViewPageWidth,
    GoPreviousPage,
    GoNextPage,
    GoFirstPage,
    GoLastPage,
    ViewToolbar,
    ViewStatusbar,
    ViewSidebar,
    ViewFullscreen,
    GotoPage,
    FindNext,
    FindPrevious,
    CloseFind,
    MenuHover,
    WindowState,
    FocusOut,
    ExitPopup,
    Monitor,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileOpen => "FileOpen",
            Self::FileCloseWindow => "FileCloseWindow",
            Self::EditFind => "EditFind",
            Self::ViewZoomIn => "ViewZoomIn",
            Self::ViewZoomOut => "ViewZoomOut",
            Self::ViewNormalSize => "ViewNormalSize",
            Self::ViewBestFit => "ViewBestFit",
            Self::ViewPageWidth => "ViewPageWidth",
            Self::GoPreviousPage => "GoPreviousPage",
            Self::GoNextPage => "GoNextPage",
            Self::GoFirstPage => "GoFirstPage",
            Self::GoLastPage => "GoLastPage",
            Self::ViewToolbar => "ViewToolbar",
            Self::ViewStatusbar => "ViewStatusbar",
            Self::ViewSidebar => "ViewSidebar",
            Self::ViewFullscreen => "ViewFullscreen",
            Self::GotoPage => "GotoPage",
            Self::FindNext => "FindNext",
            Self::FindPrevious => "FindPrevious",
            Self::CloseFind => "CloseFind",
            Self::MenuHover => "MenuHover",
            Self::WindowState => "WindowState",
            Self::FocusOut => "FocusOut",
            Self::ExitPopup => "ExitPopup",
            Self::Monitor => "Monitor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        ACTION_SPECS
            .iter()
            .find(|spec| spec.id.as_str().eq_ignore_ascii_case(value))
            .map(|spec| spec.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub id: ActionId,
    pub label: &'static str,
    pub tooltip: &'static str,
    pub accelerator: Option<&'static str>,
    /// Initial state for toggle actions.
    pub toggle_default: Option<bool>,
}

const fn action(
    id: ActionId,
    label: &'static str,
    accelerator: Option<&'static str>,
    tooltip: &'static str,
) -> ActionSpec {
    ActionSpec {
        id,
        label,
        tooltip,
        accelerator,
        toggle_default: None,
    }
}

const fn toggle(
    id: ActionId,
    label: &'static str,
    accelerator: Option<&'static str>,
    tooltip: &'static str,
    default: bool,
) -> ActionSpec {
    ActionSpec {
        id,
        label,
        tooltip,
        accelerator,
        toggle_default: Some(default),
    }
}

const ACTION_SPECS: [ActionSpec; 16] = [
    action(ActionId::FileOpen, "_Open", Some("<control>O"), "Open a file"),
    action(
        ActionId::FileCloseWindow,
        "_Close",
        Some("<control>W"),
        "Close this window",
    ),
    action(
        ActionId::EditFind,
        "_Find",
        Some("<control>F"),
        "Find a word or phrase in the document",
    ),
    action(
        ActionId::ViewZoomIn,
        "Zoom _In",
        Some("<control>plus"),
        "Enlarge the document",
    ),
    action(
        ActionId::ViewZoomOut,
        "Zoom _Out",
        Some("<control>minus"),
        "Shrink the document",
    ),
    action(
        ActionId::ViewNormalSize,
        "_Normal Size",
        Some("<control>0"),
        "Zoom to the normal size",
    ),
    action(
        ActionId::ViewBestFit,
        "_Best Fit",
        None,
        "Zoom to fit the document to the current window",
    ),
    action(
        ActionId::ViewPageWidth,
        "Fit Page _Width",
        None,
        "Zoom to fit the width of the current window",
    ),
    action(
        ActionId::GoPreviousPage,
        "_Previous Page",
        Some("<control>Page_Up"),
        "Go to the previous page",
    ),
    action(
        ActionId::GoNextPage,
        "_Next Page",
        Some("<control>Page_Down"),
        "Go to the next page",
    ),
    action(
        ActionId::GoFirstPage,
        "_First Page",
        Some("<control>Home"),
        "Go to the first page",
    ),
    action(
        ActionId::GoLastPage,
        "_Last Page",
        Some("<control>End"),
        "Go to the last page",
    ),
    toggle(
        ActionId::ViewToolbar,
        "_Toolbar",
        Some("<shift><control>T"),
        "Show or hide toolbar",
        true,
    ),
    toggle(
        ActionId::ViewStatusbar,
        "_Statusbar",
        None,
        "Show or hide statusbar",
        true,
    ),
    toggle(
        ActionId::ViewSidebar,
        "Side_bar",
        Some("F9"),
        "Show or hide sidebar",
        false,
    ),
    toggle(
        ActionId::ViewFullscreen,
        "_Fullscreen",
        Some("F11"),
        "Expand the window to fill the screen",
        false,
    ),
];

pub fn action_specs() -> &'static [ActionSpec] {
    &ACTION_SPECS
}

pub fn action_spec(id: ActionId) -> Option<&'static ActionSpec> {
    ACTION_SPECS.iter().find(|spec| spec.id == id)
}

/// Accelerators compare case-insensitively, so `<Control>o` finds FileOpen.
pub fn action_for_accelerator(accelerator: &str) -> Option<ActionId> {
    let wanted = accelerator.trim();
    ACTION_SPECS
        .iter()
        .find(|spec| {
            spec.accelerator
                .is_some_and(|accel| accel.eq_ignore_ascii_case(wanted))
        })
        .map(|spec| spec.id)
}

#[cfg(test)]
mod tests {
    use super::{ActionId, action_for_accelerator, action_spec, action_specs};

    #[test]
    fn accelerators_resolve_to_actions() {
        assert_eq!(action_for_accelerator("<control>O"), Some(ActionId::FileOpen));
        assert_eq!(action_for_accelerator("<Control>f"), Some(ActionId::EditFind));
        assert_eq!(action_for_accelerator("F11"), Some(ActionId::ViewFullscreen));
        assert_eq!(
            action_for_accelerator("<shift><control>T"),
            Some(ActionId::ViewToolbar)
        );
        assert_eq!(action_for_accelerator("<control>Q"), None);
    }

    #[test]
    fn accelerators_are_unique() {
        let accels: Vec<_> = action_specs()
            .iter()
            .filter_map(|spec| spec.accelerator.map(str::to_ascii_lowercase))
            .collect();
        for (index, accel) in accels.iter().enumerate() {
            assert!(!accels[index + 1..].contains(accel), "duplicate {accel}");
        }
    }

    #[test]
    fn toggle_defaults_match_initial_chrome() {
        let default_of = |id| action_spec(id).and_then(|spec| spec.toggle_default);
        assert_eq!(default_of(ActionId::ViewToolbar), Some(true));
        assert_eq!(default_of(ActionId::ViewStatusbar), Some(true));
        assert_eq!(default_of(ActionId::ViewSidebar), Some(false));
        assert_eq!(default_of(ActionId::ViewFullscreen), Some(false));
        assert_eq!(default_of(ActionId::GoNextPage), None);
    }

    #[test]
    fn parse_accepts_registered_names_only() {
        assert_eq!(ActionId::parse("gonextpage"), Some(ActionId::GoNextPage));
        assert_eq!(ActionId::parse("EditFind"), Some(ActionId::EditFind));
        assert_eq!(ActionId::parse("FocusOut"), None);
        assert_eq!(
            action_spec(ActionId::EditFind).map(|spec| spec.tooltip),
            Some("Find a word or phrase in the document")
        );
    }
}
