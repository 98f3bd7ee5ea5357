use std::path::{Path, PathBuf};
use std::sync::Arc;

use hayro::hayro_interpret::font::Glyph;
use hayro::hayro_interpret::util::{PageExt, RectExt};
use hayro::hayro_interpret::{
    BlendMode, ClipPath, Context, Device, GlyphDrawMode, Image, InterpreterSettings, Paint,
    PathDrawMode, SoftMask, interpret_page,
};
use hayro::hayro_syntax::Pdf;
use hayro::hayro_syntax::page::Page;
use hayro::vello_cpu::color::palette::css::WHITE;
use hayro::{RenderSettings, render};
use kurbo::{Affine, BezPath, Point};

use crate::error::{AppError, AppResult};
use crate::locator::ResourceLocator;

use super::traits::{BackendKind, DocumentBackend, RgbaFrame, TextSearch};
use super::{check_page, check_scale};

const PDF_HEADER: &[u8] = b"%PDF-";

struct LoadedPdf {
    path: PathBuf,
    pdf: Pdf,
}

#[derive(Default)]
pub struct PdfDocument {
    loaded: Option<LoadedPdf>,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn loaded(&self) -> AppResult<&LoadedPdf> {
        self.loaded.as_ref().ok_or(AppError::NotLoaded)
    }
}

impl DocumentBackend for PdfDocument {
    fn kind(&self) -> BackendKind {
        BackendKind::Pdf
    }

    fn load(&mut self, locator: &ResourceLocator) -> AppResult<()> {
        let path = locator.to_path()?;
        let bytes = load_shared_bytes(&path)?;
        let pdf = Pdf::new(bytes).map_err(|_| AppError::document("failed to parse PDF document"))?;
        if pdf.pages().len() == 0 {
            return Err(AppError::document("PDF document has no pages"));
        }

        self.loaded = Some(LoadedPdf { path, pdf });
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|loaded| loaded.path.as_path())
    }

    fn page_count(&self) -> AppResult<usize> {
        Ok(self.loaded()?.pdf.pages().len())
    }

    fn page_dimensions(&self, page: usize) -> AppResult<(f32, f32)> {
        let loaded = self.loaded()?;
        check_page(page, loaded.pdf.pages().len())?;
        let page_ref = loaded
            .pdf
            .pages()
            .get(page)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        Ok(page_ref.render_dimensions())
    }

    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        let loaded = self.loaded()?;
        check_page(page, loaded.pdf.pages().len())?;
        check_scale(scale)?;
        let page_ref = loaded
            .pdf
            .pages()
            .get(page)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            bg_color: WHITE,
            ..Default::default()
        };
        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(page_ref, &interpreter_settings, &render_settings);

        Ok(RgbaFrame {
            width: pixmap.width() as u32,
            height: pixmap.height() as u32,
            pixels: pixmap.data_as_u8_slice().to_vec().into(),
        })
    }

    fn text_search(&self) -> Option<&dyn TextSearch> {
        Some(self)
    }
}

impl TextSearch for PdfDocument {
    fn page_text(&self, page: usize) -> AppResult<String> {
        let loaded = self.loaded()?;
        check_page(page, loaded.pdf.pages().len())?;
        let page_ref = loaded
            .pdf
            .pages()
            .get(page)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        Ok(extract_text_with_device(page_ref).trim().to_owned())
    }
}

fn load_shared_bytes(path: &Path) -> AppResult<Arc<Vec<u8>>> {
    if path.as_os_str().is_empty() {
        return Err(AppError::invalid_argument("pdf path must not be empty"));
    }
    if !path.exists() {
        return Err(AppError::io_with_context(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"),
            format!("file not found: {}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(AppError::document("pdf path must be a regular file"));
    }

    let bytes = std::fs::read(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to read {}", path.display()))
    })?;
    if !bytes.starts_with(PDF_HEADER) {
        return Err(AppError::document("input is not a valid PDF header"));
    }

    Ok(Arc::new(bytes))
}

fn extract_text_with_device(page: &Page<'_>) -> String {
    let mut context = Context::new(
        page.initial_transform(true),
        page.intersected_crop_box().to_kurbo(),
        page.xref(),
        InterpreterSettings::default(),
    );
    let mut device = TextExtractDevice::default();
    interpret_page(page, &mut context, &mut device);
    device.finish()
}

#[derive(Default)]
struct TextExtractDevice {
    text: String,
    last_point: Option<Point>,
    last_glyph: Option<(char, i32, i32)>,
}

impl TextExtractDevice {
    fn finish(self) -> String {
        self.text
    }

    fn push_char(&mut self, ch: char, x: f64, y: f64) {
        if ch == '\n' || ch == '\r' {
            push_newline(&mut self.text);
            self.last_point = Some(Point::new(x, y));
            return;
        }
        if ch.is_whitespace() {
            push_space(&mut self.text);
            self.last_point = Some(Point::new(x, y));
            return;
        }

        if let Some(last) = self.last_point
            && (y - last.y).abs() > LINE_BREAK_THRESHOLD
        {
            push_newline(&mut self.text);
        }

        self.text.push(ch);
        self.last_point = Some(Point::new(x, y));
    }

    fn is_duplicate_glyph(&self, ch: char, x: f64, y: f64) -> bool {
        self.last_glyph == Some((ch, quantize_coord(x), quantize_coord(y)))
    }
}

impl<'a> Device<'a> for TextExtractDevice {
    fn set_soft_mask(&mut self, _mask: Option<SoftMask<'a>>) {}

    fn set_blend_mode(&mut self, _blend_mode: BlendMode) {}

    fn draw_path(
        &mut self,
        _path: &BezPath,
        _transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &PathDrawMode,
    ) {
    }

    fn push_clip_path(&mut self, _clip_path: &ClipPath) {}

    fn push_transparency_group(
        &mut self,
        _opacity: f32,
        _mask: Option<SoftMask<'a>>,
        _blend_mode: BlendMode,
    ) {
    }

    fn draw_glyph(
        &mut self,
        glyph: &Glyph<'a>,
        transform: Affine,
        glyph_transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &GlyphDrawMode,
    ) {
        let Some(ch) = glyph.as_unicode() else {
            return;
        };

        let position = (transform * glyph_transform) * Point::ORIGIN;
        // overprinted glyphs (fake bold) land on the same spot
        if self.is_duplicate_glyph(ch, position.x, position.y) {
            return;
        }

        self.last_glyph = Some((ch, quantize_coord(position.x), quantize_coord(position.y)));
        self.push_char(ch, position.x, position.y);
    }

    fn draw_image(&mut self, _image: Image<'a, '_>, _transform: Affine) {}

    fn pop_clip_path(&mut self) {}

    fn pop_transparency_group(&mut self) {}
}

fn quantize_coord(value: f64) -> i32 {
    (value * 100.0).round() as i32
}

const LINE_BREAK_THRESHOLD: f64 = 6.0;

fn push_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_space(out: &mut String) {
    if !out.ends_with([' ', '\n']) {
        out.push(' ');
    }
}
