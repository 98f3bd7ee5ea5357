//! Picks a document backend for a locator and loads it.
//!
//! Classification runs in a fixed order: exact PDF match, exact PostScript
//! match, then the raster codec registry. Failures come back as
//! [`LoadError`] values; nothing here logs or prompts.

use serde::Serialize;

use crate::backend::{BackendFactory, BackendKind, DefaultBackendFactory, DocumentBackend};
use crate::codec::{ImageCodecRegistry, RasterCodecRegistry};
use crate::config::Config;
use crate::error::LoadError;
use crate::locator::ResourceLocator;
use crate::mime::{ContentSniffer, MimeClassifier, MimeType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub mime_type: String,
    pub kind: BackendKind,
}

pub struct Resolver {
    classifier: Box<dyn MimeClassifier>,
    registry: Box<dyn RasterCodecRegistry>,
    factory: Box<dyn BackendFactory>,
}

impl Resolver {
    pub fn new(config: &Config) -> Self {
        Self::with_services(
            Box::new(ContentSniffer),
            Box::new(ImageCodecRegistry::new(&config.codecs)),
            Box::new(DefaultBackendFactory),
        )
    }

    pub fn with_services(
        classifier: Box<dyn MimeClassifier>,
        registry: Box<dyn RasterCodecRegistry>,
        factory: Box<dyn BackendFactory>,
    ) -> Self {
        Self {
            classifier,
            registry,
            factory,
        }
    }

    pub fn classify(&self, locator: &ResourceLocator) -> Classification {
        let mime = self.classifier.classify(locator);
        let kind = self.kind_for(&mime);
        Classification {
            mime_type: mime.into_string(),
            kind,
        }
    }

    pub fn kind_for(&self, mime: &MimeType) -> BackendKind {
        if mime.is_pdf() {
            BackendKind::Pdf
        } else if mime.is_postscript() {
            BackendKind::PostScript
        } else if self.registry.supports(mime) {
            BackendKind::RasterImage
        } else {
            BackendKind::Unsupported
        }
    }

    /// Returns a loaded backend; the caller owns it and drops any previous one.
    pub fn resolve_and_load(
        &self,
        locator: &ResourceLocator,
    ) -> Result<Box<dyn DocumentBackend>, LoadError> {
        let Classification { mime_type, kind } = self.classify(locator);
        if !kind.is_supported() {
            return Err(LoadError::UnhandledMimeType(mime_type));
        }

        let Some(mut backend) = self.factory.create(kind) else {
            return Err(LoadError::UnhandledMimeType(mime_type));
        };

        match backend.load(locator) {
            Ok(()) => Ok(backend),
            Err(err) => {
                drop(backend);
                Err(LoadError::BackendLoadFailed(err.to_string()))
            }
        }
    }
}
