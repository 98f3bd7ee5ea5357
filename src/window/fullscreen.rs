use serde::Serialize;

use crate::config::FullscreenConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Top-left corner of the exit popup on `monitor`.
///
/// The popup hugs the bottom edge, on the leading side for the text direction,
/// and sits above the find bar when one is visible.
pub fn exit_popup_position(
    monitor: Rect,
    popup_size: (i32, i32),
    direction: TextDirection,
    find_bar_height: Option<i32>,
) -> (i32, i32) {
    let (popup_width, popup_height) = popup_size;
    let usable_height = monitor
        .height
        .saturating_sub(find_bar_height.unwrap_or(0));

    let x = match direction {
        TextDirection::LeftToRight => monitor.x,
        TextDirection::RightToLeft => monitor
            .x
            .saturating_add(monitor.width)
            .saturating_sub(popup_width),
    };
    let y = monitor
        .y
        .saturating_add(usable_height)
        .saturating_sub(popup_height);
    (x, y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExitPopup {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenState {
    /// Whether the window manager reports the window as fullscreen.
    pub active: bool,
    /// State of the ViewFullscreen toggle.
    pub toggle: bool,
    pub requested: Option<bool>,
    pub popup: Option<ExitPopup>,
    pub popup_size: (i32, i32),
    pub monitor: Rect,
    pub direction: TextDirection,
    pub find_bar_height: i32,
}

impl FullscreenState {
    pub fn new(config: &FullscreenConfig, monitor: Rect) -> Self {
        Self {
            active: false,
            toggle: false,
            requested: None,
            popup: None,
            popup_size: (config.popup_width, config.popup_height),
            monitor,
            direction: if config.right_to_left {
                TextDirection::RightToLeft
            } else {
                TextDirection::LeftToRight
            },
            find_bar_height: config.find_bar_height,
        }
    }

    pub(crate) fn show_popup(&mut self, find_bar_visible: bool) {
        let (width, height) = self.popup_size;
        self.popup = Some(ExitPopup {
            width,
            height,
            x: 0,
            y: 0,
        });
        self.place_popup(find_bar_visible);
    }

    pub(crate) fn hide_popup(&mut self) {
        self.popup = None;
    }

    pub(crate) fn place_popup(&mut self, find_bar_visible: bool) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let find_bar = find_bar_visible.then_some(self.find_bar_height);
        let (x, y) = exit_popup_position(self.monitor, self.popup_size, self.direction, find_bar);
        popup.width = self.popup_size.0;
        popup.height = self.popup_size.1;
        popup.x = x;
        popup.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, TextDirection, exit_popup_position};

    const MONITOR: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn ltr_popup_sits_bottom_left() {
        assert_eq!(
            exit_popup_position(MONITOR, (140, 30), TextDirection::LeftToRight, None),
            (0, 1050)
        );
    }

    #[test]
    fn rtl_popup_sits_bottom_right() {
        assert_eq!(
            exit_popup_position(MONITOR, (140, 30), TextDirection::RightToLeft, None),
            (1780, 1050)
        );
    }

    #[test]
    fn find_bar_pushes_popup_up() {
        assert_eq!(
            exit_popup_position(MONITOR, (140, 30), TextDirection::LeftToRight, Some(32)),
            (0, 1018)
        );
    }

    #[test]
    fn secondary_monitor_offsets_both_axes() {
        let monitor = Rect::new(1920, 200, 1280, 1024);
        assert_eq!(
            exit_popup_position(monitor, (100, 40), TextDirection::RightToLeft, None),
            (3100, 1184)
        );
    }

    #[test]
    fn extreme_monitor_geometry_saturates() {
        let far_down = Rect::new(0, 2_147_483_600, 1920, 1080);
        assert_eq!(
            exit_popup_position(far_down, (140, 30), TextDirection::LeftToRight, None),
            (0, i32::MAX - 30)
        );

        let far_left = Rect::new(i32::MIN, i32::MIN, 0, 0);
        assert_eq!(
            exit_popup_position(far_left, (140, 30), TextDirection::RightToLeft, Some(32)),
            (i32::MIN, i32::MIN)
        );
    }
}
