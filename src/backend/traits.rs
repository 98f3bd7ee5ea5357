use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AppResult;
use crate::locator::ResourceLocator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl RgbaFrame {
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels_to_vec(&self) -> Vec<u8> {
        self.pixels.as_ref().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Pdf,
    PostScript,
    RasterImage,
    Unsupported,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PostScript => "postscript",
            Self::RasterImage => "raster-image",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded (or loadable) document of one format.
///
/// Backends start empty; `load` populates them. Everything that reads the
/// document fails with [`crate::error::AppError::NotLoaded`] until then.
pub trait DocumentBackend: Send {
    fn kind(&self) -> BackendKind;
    fn load(&mut self, locator: &ResourceLocator) -> AppResult<()>;
    fn is_loaded(&self) -> bool;
    fn path(&self) -> Option<&Path>;
    fn title(&self) -> Option<String> {
        None
    }
    fn page_count(&self) -> AppResult<usize>;
    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)>;
    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame>;
    fn text_search(&self) -> Option<&dyn TextSearch> {
        None
    }
}

impl fmt::Debug for dyn DocumentBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentBackend({})", self.kind())
    }
}

pub trait TextSearch {
    fn page_text(&self, page: usize) -> AppResult<String>;
}

pub trait BackendFactory {
    /// An empty backend for `kind`, or `None` when nothing handles it.
    fn create(&self, kind: BackendKind) -> Option<Box<dyn DocumentBackend>>;
}
