use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};

use crate::error::{AppError, AppResult};
use crate::locator::ResourceLocator;

use super::traits::{BackendKind, DocumentBackend, RgbaFrame};
use super::{check_page, check_scale};

struct LoadedImage {
    path: PathBuf,
    image: DynamicImage,
}

/// A single decoded raster image presented as a one-page document.
#[derive(Default)]
pub struct RasterDocument {
    loaded: Option<LoadedImage>,
}

impl RasterDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn loaded(&self) -> AppResult<&LoadedImage> {
        self.loaded.as_ref().ok_or(AppError::NotLoaded)
    }
}

impl DocumentBackend for RasterDocument {
    fn kind(&self) -> BackendKind {
        BackendKind::RasterImage
    }

    fn load(&mut self, locator: &ResourceLocator) -> AppResult<()> {
        let path = locator.to_path()?;
        let reader = ImageReader::open(&path)
            .map_err(|source| {
                AppError::io_with_context(source, format!("failed to open {}", path.display()))
            })?
            .with_guessed_format()
            .map_err(|source| {
                AppError::io_with_context(source, format!("failed to read {}", path.display()))
            })?;
        let image = reader
            .decode()
            .map_err(|err| AppError::document(err.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(AppError::document("image has no pixels"));
        }

        self.loaded = Some(LoadedImage { path, image });
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|loaded| loaded.path.as_path())
    }

    fn page_count(&self) -> AppResult<usize> {
        self.loaded()?;
        Ok(1)
    }

    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)> {
        let loaded = self.loaded()?;
        check_page(page, 1)?;
        Ok((loaded.image.width() as f32, loaded.image.height() as f32))
    }

    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        let loaded = self.loaded()?;
        check_page(page, 1)?;
        check_scale(scale)?;

        let width = ((loaded.image.width() as f32 * scale).round() as u32).max(1);
        let height = ((loaded.image.height() as f32 * scale).round() as u32).max(1);
        let rgba = if width == loaded.image.width() && height == loaded.image.height() {
            loaded.image.to_rgba8()
        } else {
            loaded
                .image
                .resize_exact(width, height, FilterType::Triangle)
                .to_rgba8()
        };

        Ok(RgbaFrame {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw().into(),
        })
    }
}
