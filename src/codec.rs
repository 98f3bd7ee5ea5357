use std::collections::BTreeSet;

use image::ImageFormat;

use crate::config::CodecConfig;
use crate::mime::MimeType;

pub trait RasterCodecRegistry {
    fn supports(&self, mime: &MimeType) -> bool;
}

/// Raster decoders compiled into the `image` crate, minus any disabled by config.
#[derive(Debug, Clone, Default)]
pub struct ImageCodecRegistry {
    disabled: BTreeSet<String>,
}

impl ImageCodecRegistry {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            disabled: config
                .disabled_mime_types
                .iter()
                .map(|mime| mime.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// MIME types of every enabled raster format, sorted and deduplicated.
    pub fn formats(&self) -> Vec<String> {
        let mut formats: BTreeSet<String> = ImageFormat::all()
            .filter(|format| format.reading_enabled())
            .map(|format| format.to_mime_type().to_string())
            .collect();
        formats.retain(|mime| !self.disabled.contains(mime));
        formats.into_iter().collect()
    }
}

impl RasterCodecRegistry for ImageCodecRegistry {
    fn supports(&self, mime: &MimeType) -> bool {
        if self.disabled.contains(&mime.as_str().to_ascii_lowercase()) {
            return false;
        }
        ImageFormat::from_mime_type(mime.as_str()).is_some_and(|format| format.reading_enabled())
    }
}
