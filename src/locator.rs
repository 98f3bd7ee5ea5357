use std::fmt;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

use crate::error::{AppError, AppResult};

/// Identifies a document to open: a filesystem path or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator(String);

impl ResourceLocator {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AppError::invalid_argument("locator must not be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed URI, or `None` when the locator is a bare path.
    fn url(&self) -> AppResult<Option<Url>> {
        match Url::parse(&self.0) {
            // drive letters and `name:rest` file names are paths, not schemes
            Ok(url) if url.scheme().len() == 1 || url.cannot_be_a_base() => Ok(None),
            Ok(url) => Ok(Some(url)),
            Err(ParseError::RelativeUrlWithoutBase) => Ok(None),
            Err(err) => Err(AppError::invalid_argument(format!(
                "malformed URI {}: {err}",
                self.0
            ))),
        }
    }

    /// Local path for this locator. Only `file://` URIs and bare paths are reachable.
    pub fn to_path(&self) -> AppResult<PathBuf> {
        let Some(url) = self.url()? else {
            return Ok(PathBuf::from(&self.0));
        };
        if url.scheme() != "file" {
            return Err(AppError::unsupported(format!(
                "unsupported URI scheme: {}",
                url.scheme()
            )));
        }
        url.to_file_path().map_err(|()| {
            AppError::unsupported(format!("remote file URI is not supported: {}", self.0))
        })
    }

    /// Last path segment, used for window titles.
    pub fn display_name(&self) -> String {
        if let Ok(Some(url)) = self.url() {
            let segment = url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()));
            if let Some(segment) = segment {
                return percent_decode_str(segment).decode_utf8_lossy().into_owned();
            }
        }
        Path::new(&self.0)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ResourceLocator {
    type Error = AppError;

    fn try_from(value: &str) -> AppResult<Self> {
        Self::new(value)
    }
}
