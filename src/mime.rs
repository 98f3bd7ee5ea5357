use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::ImageFormat;

use crate::locator::ResourceLocator;

const SNIFF_LEN: usize = 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";
const PS_MAGIC: &[u8] = b"%!";
const DOS_EPS_MAGIC: &[u8] = &[0xC5, 0xD0, 0xD3, 0xC6];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MimeType(String);

impl MimeType {
    pub const PDF: &'static str = "application/pdf";
    pub const POSTSCRIPT: &'static str = "application/postscript";
    pub const OCTET_STREAM: &'static str = "application/octet-stream";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_pdf(&self) -> bool {
        self.0 == Self::PDF
    }

    pub fn is_postscript(&self) -> bool {
        self.0 == Self::POSTSCRIPT
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MimeType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub trait MimeClassifier {
    fn classify(&self, locator: &ResourceLocator) -> MimeType;
}

/// Classifies by leading bytes, falling back to the file extension.
#[derive(Debug, Default)]
pub struct ContentSniffer;

impl MimeClassifier for ContentSniffer {
    fn classify(&self, locator: &ResourceLocator) -> MimeType {
        let Ok(path) = locator.to_path() else {
            return MimeType::new(MimeType::OCTET_STREAM);
        };

        if let Some(head) = read_head(&path)
            && let Some(mime) = sniff_bytes(&head)
        {
            return mime;
        }

        sniff_extension(&path).unwrap_or_else(|| MimeType::new(MimeType::OCTET_STREAM))
    }
}

fn read_head(path: &Path) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head).ok()?;
    Some(head)
}

pub fn sniff_bytes(head: &[u8]) -> Option<MimeType> {
    if head.is_empty() {
        return None;
    }
    if head.starts_with(PS_MAGIC) || head.starts_with(DOS_EPS_MAGIC) {
        return Some(MimeType::new(MimeType::POSTSCRIPT));
    }
    // the pdf backend reads cross-reference offsets from byte zero
    if head.starts_with(PDF_MAGIC) {
        return Some(MimeType::new(MimeType::PDF));
    }
    image::guess_format(head)
        .ok()
        .map(|format| MimeType::new(format.to_mime_type()))
}

pub fn sniff_extension(path: &Path) -> Option<MimeType> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "pdf" => Some(MimeType::new(MimeType::PDF)),
        "ps" | "eps" => Some(MimeType::new(MimeType::POSTSCRIPT)),
        _ => ImageFormat::from_extension(&ext).map(|format| MimeType::new(format.to_mime_type())),
    }
}
