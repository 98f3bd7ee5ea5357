use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::locator::ResourceLocator;

use super::traits::{BackendKind, DocumentBackend, RgbaFrame};
use super::{check_page, check_scale};

const PS_MAGIC: &[u8] = b"%!";
const DOS_EPS_MAGIC: &[u8] = &[0xC5, 0xD0, 0xD3, 0xC6];
const DOS_EPS_HEADER_LEN: usize = 30;
const US_LETTER: (f32, f32) = (612.0, 792.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl BoundingBox {
    fn size(&self) -> Option<(f32, f32)> {
        let width = self.urx - self.llx;
        let height = self.ury - self.lly;
        (width > 0.0 && height > 0.0).then_some((width, height))
    }
}

/// Header and trailer facts gathered from `%%` structuring comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DscSummary {
    pub declared_pages: Option<usize>,
    pub page_markers: usize,
    pub bounding_box: Option<BoundingBox>,
    pub title: Option<String>,
}

impl DscSummary {
    pub fn parse(source: &[u8]) -> Self {
        let mut summary = Self::default();

        for raw_line in source.split(|byte| *byte == b'\n' || *byte == b'\r') {
            if !raw_line.starts_with(b"%%") {
                continue;
            }
            let line = String::from_utf8_lossy(raw_line);

            if let Some(value) = line.strip_prefix("%%Pages:") {
                // "(atend)" defers the value to the trailer
                if summary.declared_pages.is_none() {
                    summary.declared_pages = value
                        .split_whitespace()
                        .next()
                        .and_then(|count| count.parse().ok());
                }
            } else if line.starts_with("%%Page:") {
                summary.page_markers += 1;
            } else if let Some(value) = line.strip_prefix("%%BoundingBox:") {
                if summary.bounding_box.is_none() {
                    summary.bounding_box = parse_bounding_box(value);
                }
            } else if let Some(value) = line.strip_prefix("%%Title:")
                && summary.title.is_none()
            {
                summary.title = parse_title(value);
            }
        }

        summary
    }

    pub fn page_count(&self) -> usize {
        self.declared_pages
            .filter(|pages| *pages > 0)
            .or(Some(self.page_markers).filter(|markers| *markers > 0))
            .unwrap_or(1)
    }
}

fn parse_bounding_box(value: &str) -> Option<BoundingBox> {
    let numbers: Vec<f32> = value
        .split_whitespace()
        .map(|token| token.parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        [llx, lly, urx, ury] => Some(BoundingBox {
            llx: *llx,
            lly: *lly,
            urx: *urx,
            ury: *ury,
        }),
        _ => None,
    }
}

fn parse_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let unwrapped = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim();
    (!unwrapped.is_empty()).then(|| unwrapped.to_string())
}

/// PostScript section of a file: the whole file, or the slice a DOS EPS header points at.
fn postscript_section(bytes: &[u8]) -> AppResult<&[u8]> {
    if bytes.starts_with(PS_MAGIC) {
        return Ok(bytes);
    }
    if !bytes.starts_with(DOS_EPS_MAGIC) {
        return Err(AppError::document("input is not a valid PostScript header"));
    }
    if bytes.len() < DOS_EPS_HEADER_LEN {
        return Err(AppError::document("truncated DOS EPS header"));
    }

    let offset = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let length = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let section = offset
        .checked_add(length)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| AppError::document("DOS EPS section lies outside the file"))?;
    if !section.starts_with(PS_MAGIC) {
        return Err(AppError::document("input is not a valid PostScript header"));
    }
    Ok(section)
}

struct LoadedPostScript {
    path: PathBuf,
    summary: DscSummary,
}

#[derive(Default)]
pub struct PostScriptDocument {
    loaded: Option<LoadedPostScript>,
}

impl PostScriptDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn loaded(&self) -> AppResult<&LoadedPostScript> {
        self.loaded.as_ref().ok_or(AppError::NotLoaded)
    }
}

impl DocumentBackend for PostScriptDocument {
    fn kind(&self) -> BackendKind {
        BackendKind::PostScript
    }

    fn load(&mut self, locator: &ResourceLocator) -> AppResult<()> {
        let path = locator.to_path()?;
        let bytes = std::fs::read(&path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read {}", path.display()))
        })?;
        let summary = DscSummary::parse(postscript_section(&bytes)?);

        self.loaded = Some(LoadedPostScript { path, summary });
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|loaded| loaded.path.as_path())
    }

    fn title(&self) -> Option<String> {
        self.loaded.as_ref()?.summary.title.clone()
    }

    fn page_count(&self) -> AppResult<usize> {
        Ok(self.loaded()?.summary.page_count())
    }

    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)> {
        let loaded = self.loaded()?;
        check_page(page, loaded.summary.page_count())?;
        Ok(loaded
            .summary
            .bounding_box
            .and_then(|bbox| bbox.size())
            .unwrap_or(US_LETTER))
    }

    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        let loaded = self.loaded()?;
        check_page(page, loaded.summary.page_count())?;
        check_scale(scale)?;
        Err(AppError::unsupported(
            "rendering PostScript requires an interpreter",
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::backend::{BackendKind, DocumentBackend};
    use crate::error::AppError;
    use crate::locator::ResourceLocator;
    use crate::test_support::{build_postscript, unique_temp_path};

    use super::{BoundingBox, DscSummary, PostScriptDocument};

    #[test]
    fn parse_reads_header_comments() {
        let summary = DscSummary::parse(&build_postscript(3, Some((0, 0, 420, 595))));
        assert_eq!(summary.declared_pages, Some(3));
        assert_eq!(summary.page_markers, 3);
        assert_eq!(summary.title.as_deref(), Some("Quarterly Figures"));
        assert_eq!(
            summary.bounding_box,
            Some(BoundingBox {
                llx: 0.0,
                lly: 0.0,
                urx: 420.0,
                ury: 595.0,
            })
        );
        assert_eq!(summary.page_count(), 3);
    }

    #[test]
    fn parse_takes_page_count_from_trailer_when_deferred() {
        let source = b"%!PS-Adobe-3.0\n%%Pages: (atend)\n%%EndComments\n%%Page: 1 1\nshowpage\n%%Page: 2 2\nshowpage\n%%Trailer\n%%Pages: 2\n%%EOF\n";
        let summary = DscSummary::parse(source);
        assert_eq!(summary.declared_pages, Some(2));
        assert_eq!(summary.page_count(), 2);
    }

    #[test]
    fn page_count_falls_back_to_markers_then_one() {
        let markers = DscSummary::parse(b"%!PS\r%%Page: 1 1\r%%Page: 2 2\r%%Page: 3 3\r");
        assert_eq!(markers.page_count(), 3);

        let bare = DscSummary::parse(b"%!PS\n0 0 moveto\nshowpage\n");
        assert_eq!(bare.page_count(), 1);

        let eps = DscSummary::parse(b"%!PS-Adobe-3.0 EPSF-3.0\n%%Pages: 0\n");
        assert_eq!(eps.page_count(), 1);
    }

    #[test]
    fn parse_title_strips_parentheses_and_ignores_bad_boxes() {
        let summary = DscSummary::parse(b"%!PS\n%%Title: (Annual report)\n%%BoundingBox: (atend)\n");
        assert_eq!(summary.title.as_deref(), Some("Annual report"));
        assert_eq!(summary.bounding_box, None);
    }

    #[test]
    fn load_exposes_pages_dimensions_and_title() {
        let file = unique_temp_path("doc.ps");
        fs::write(&file, build_postscript(2, Some((18, 36, 318, 436))))
            .expect("test file should be created");

        let mut doc = PostScriptDocument::new();
        doc.load(&ResourceLocator::new(file.to_string_lossy()).expect("locator"))
            .expect("postscript should load");

        assert_eq!(doc.kind(), BackendKind::PostScript);
        assert_eq!(doc.page_count().expect("page count"), 2);
        assert_eq!(doc.page_dimensions(1).expect("dimensions"), (300.0, 400.0));
        assert_eq!(doc.title().as_deref(), Some("Quarterly Figures"));
        assert!(doc.text_search().is_none());
        assert!(matches!(
            doc.render_page(0, 1.0),
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            doc.page_dimensions(2),
            Err(AppError::InvalidArgument(_))
        ));

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn load_defaults_to_letter_without_bounding_box() {
        let file = unique_temp_path("letter.ps");
        fs::write(&file, build_postscript(1, None)).expect("test file should be created");

        let mut doc = PostScriptDocument::new();
        doc.load(&ResourceLocator::new(file.to_string_lossy()).expect("locator"))
            .expect("postscript should load");
        assert_eq!(doc.page_dimensions(0).expect("dimensions"), (612.0, 792.0));

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn load_reads_dos_eps_section() {
        let section = build_postscript(1, Some((0, 0, 100, 50)));
        let mut bytes = vec![0xC5, 0xD0, 0xD3, 0xC6];
        bytes.extend_from_slice(&30_u32.to_le_bytes());
        bytes.extend_from_slice(&(section.len() as u32).to_le_bytes());
        bytes.resize(30, 0);
        bytes.extend_from_slice(&section);

        let file = unique_temp_path("figure.eps");
        fs::write(&file, &bytes).expect("test file should be created");

        let mut doc = PostScriptDocument::new();
        doc.load(&ResourceLocator::new(file.to_string_lossy()).expect("locator"))
            .expect("dos eps should load");
        assert_eq!(doc.page_dimensions(0).expect("dimensions"), (100.0, 50.0));

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn load_rejects_non_postscript_content() {
        let file = unique_temp_path("fake.ps");
        fs::write(&file, b"hello").expect("test file should be created");

        let mut doc = PostScriptDocument::new();
        let err = doc
            .load(&ResourceLocator::new(file.to_string_lossy()).expect("locator"))
            .expect_err("content should be rejected");
        assert_eq!(err.to_string(), "input is not a valid PostScript header");
        assert!(!doc.is_loaded());

        fs::remove_file(&file).expect("test file should be removed");
    }
}
