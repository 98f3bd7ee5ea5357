use std::path::{Path, PathBuf};

use clap::Parser;
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use tracing::{debug, info};

use dvw::backend::BackendKind;
use dvw::codec::ImageCodecRegistry;
use dvw::config::Config;
use dvw::error::{AppError, AppResult};
use dvw::locator::ResourceLocator;
use dvw::logging;
use dvw::mime::MimeType;
use dvw::resolver::{Classification, Resolver};
use dvw::window::{
    Command, DocumentWindow, OPEN_FAILED_SUMMARY, ZoomMode, dispatch, parse_command_text,
};

/// Open a document and drive the viewer window from the command line
#[derive(Parser, Debug)]
#[command(name = "dvw", version, about, long_about = None)]
struct Cli {
    /// Path or file:// URI of the document to open
    #[arg(required_unless_present = "formats")]
    locator: Option<String>,

    /// Window command to run after opening, e.g. "goto-page 3" (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,

    /// Render the current page to this PNG file
    #[arg(long, value_name = "PNG")]
    render: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Only report the MIME type and backend kind; do not load
    #[arg(long, conflicts_with_all = ["exec", "render"])]
    classify_only: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List the MIME types that can be opened
    #[arg(long, conflicts_with = "locator")]
    formats: bool,
}

#[derive(Debug, Serialize)]
struct FindSummary {
    query: String,
    status: String,
    hit_pages: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct WindowSummary {
    locator: String,
    mime_type: String,
    kind: BackendKind,
    title: String,
    page_count: usize,
    /// 1-based.
    current_page: usize,
    zoom: ZoomMode,
    scale: f32,
    fullscreen: bool,
    find: Option<FindSummary>,
}

impl WindowSummary {
    fn from_window(window: &DocumentWindow, classification: &Classification) -> Self {
        let find = window.find();
        Self {
            locator: window
                .locator()
                .map(|locator| locator.to_string())
                .unwrap_or_default(),
            mime_type: classification.mime_type.clone(),
            kind: classification.kind,
            title: window.title(),
            page_count: window.page_count().unwrap_or(0),
            current_page: window.current_page() + 1,
            zoom: window.zoom(),
            scale: window.current_scale(),
            fullscreen: window.fullscreen().active,
            find: find.is_active().then(|| FindSummary {
                query: find.query.clone(),
                status: find.status.clone(),
                hit_pages: find.hits.iter().map(|hit| hit.page + 1).collect(),
            }),
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("locator:   {}", self.locator),
            format!("mime type: {}", self.mime_type),
            format!("kind:      {}", self.kind),
            format!("title:     {}", self.title),
            format!("page:      {}/{}", self.current_page, self.page_count),
            format!("zoom:      {} ({:.2}x)", self.zoom.label(), self.scale),
        ];
        if self.fullscreen {
            lines.push("fullscreen: on".to_string());
        }
        if let Some(find) = &self.find {
            lines.push(format!("find:      \"{}\" {}", find.query, find.status));
        }
        lines.join("\n")
    }
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    logging::init(&config.logging)?;

    if cli.formats {
        for mime in supported_formats(&config) {
            println!("{mime}");
        }
        return Ok(());
    }

    let Some(raw_locator) = cli.locator.as_deref() else {
        return Err(AppError::invalid_argument("usage: dvw <LOCATOR>"));
    };
    let locator = ResourceLocator::new(raw_locator)?;
    let resolver = Resolver::new(&config);
    let classification = resolver.classify(&locator);
    debug!(
        locator = %locator,
        mime = %classification.mime_type,
        kind = %classification.kind,
        "classified"
    );

    if cli.classify_only {
        if cli.json {
            println!("{}", to_json(&classification)?);
        } else {
            println!("{}\t{}", classification.mime_type, classification.kind);
        }
        return Ok(());
    }

    let mut window = DocumentWindow::with_resolver(config, resolver);
    window
        .open(&locator)
        .map_err(|err| AppError::document(format!("{OPEN_FAILED_SUMMARY}: {err}")))?;

    run_script(&mut window, &cli.exec)?;

    if let Some(path) = &cli.render {
        render_current_page(&window, path)?;
        info!(path = %path.display(), page = window.current_page() + 1, "page rendered");
    }

    let summary = WindowSummary::from_window(&window, &classification);
    if cli.json {
        println!("{}", to_json(&summary)?);
    } else {
        println!("{}", summary.to_text());
    }
    Ok(())
}

/// Runs each command in order, answering fullscreen requests the way a window manager would.
fn run_script(window: &mut DocumentWindow, lines: &[String]) -> AppResult<()> {
    for line in lines {
        let command = parse_command_text(line)?;
        let result = dispatch(window, command)?;
        debug!(command = %line, outcome = ?result.outcome, "command dispatched");

        if let Some(active) = window.take_fullscreen_request() {
            dispatch(window, Command::WindowStateChanged { fullscreen: active })?;
        }
    }
    Ok(())
}

fn render_current_page(window: &DocumentWindow, path: &Path) -> AppResult<()> {
    let Some(backend) = window.backend() else {
        return Err(AppError::NotLoaded);
    };
    let page = window.current_page();
    let frame = backend.render_page(page, window.current_scale())?;
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.pixels_to_vec())
        .ok_or_else(|| AppError::document("rendered frame has an unexpected size"))?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| AppError::render(page, err))
}

fn supported_formats(config: &Config) -> Vec<String> {
    let mut formats = vec![MimeType::PDF.to_string(), MimeType::POSTSCRIPT.to_string()];
    formats.extend(ImageCodecRegistry::new(&config.codecs).formats());
    formats
}

fn to_json(value: &impl Serialize) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::invalid_argument(format!("failed to encode summary: {err}")))
}
