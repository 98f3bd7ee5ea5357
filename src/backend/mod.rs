mod pdf;
mod postscript;
mod raster;
mod traits;

pub use pdf::PdfDocument;
pub use postscript::PostScriptDocument;
pub use raster::RasterDocument;
pub use traits::{BackendFactory, BackendKind, DocumentBackend, RgbaFrame, TextSearch};

use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct DefaultBackendFactory;

impl BackendFactory for DefaultBackendFactory {
    fn create(&self, kind: BackendKind) -> Option<Box<dyn DocumentBackend>> {
        match kind {
            BackendKind::Pdf => Some(Box::new(PdfDocument::new())),
            BackendKind::PostScript => Some(Box::new(PostScriptDocument::new())),
            BackendKind::RasterImage => Some(Box::new(RasterDocument::new())),
            BackendKind::Unsupported => None,
        }
    }
}

pub(crate) fn check_page(page: usize, page_count: usize) -> AppResult<()> {
    if page >= page_count {
        return Err(AppError::invalid_argument("page index is out of range"));
    }
    Ok(())
}

pub(crate) fn check_scale(scale: f32) -> AppResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(AppError::invalid_argument(
            "scale must be a positive finite value",
        ));
    }
    Ok(())
}
