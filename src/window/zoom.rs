use serde::Serialize;

use crate::config::ViewConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "scale", rename_all = "kebab-case")]
pub enum ZoomMode {
    Free(f32),
    BestFit,
    FitWidth,
}

impl Default for ZoomMode {
    fn default() -> Self {
        Self::Free(1.0)
    }
}

impl ZoomMode {
    pub fn label(self) -> String {
        match self {
            Self::Free(scale) => format!("{:.0}%", scale * 100.0),
            Self::BestFit => "best fit".to_string(),
            Self::FitWidth => "fit width".to_string(),
        }
    }
}

/// Resolves `mode` to a render scale for a page of `page_size` shown in `viewport`.
pub fn effective_scale(
    mode: ZoomMode,
    page_size: (f32, f32),
    viewport: (u32, u32),
    view: &ViewConfig,
) -> f32 {
    let (page_width, page_height) = page_size;
    let valid_page = page_width.is_finite()
        && page_height.is_finite()
        && page_width > 0.0
        && page_height > 0.0;

    let scale = match mode {
        ZoomMode::Free(scale) => scale,
        ZoomMode::BestFit if valid_page => {
            let width_ratio = viewport.0.max(1) as f32 / page_width;
            let height_ratio = viewport.1.max(1) as f32 / page_height;
            width_ratio.min(height_ratio)
        }
        ZoomMode::FitWidth if valid_page => viewport.0.max(1) as f32 / page_width,
        ZoomMode::BestFit | ZoomMode::FitWidth => 1.0,
    };

    clamp_scale(scale, view)
}

pub(crate) fn clamp_scale(scale: f32, view: &ViewConfig) -> f32 {
    if !scale.is_finite() || scale <= 0.0 {
        return view.min_zoom;
    }
    scale.clamp(view.min_zoom, view.max_zoom)
}

pub(crate) fn zoom_eq(left: f32, right: f32) -> bool {
    (left - right).abs() <= 0.0005
}
