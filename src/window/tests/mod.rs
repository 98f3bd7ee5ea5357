mod dispatch;
mod open;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::locator::ResourceLocator;
use crate::test_support::{build_pdf, unique_temp_path, write_png};

use super::DocumentWindow;

/// Temp file that is removed when the test finishes.
pub(super) struct TempDoc(PathBuf);

impl TempDoc {
    pub(super) fn pdf(name: &str, pages: &[&str]) -> Self {
        let path = unique_temp_path(name);
        fs::write(&path, build_pdf(pages)).expect("test pdf should be written");
        Self(path)
    }

    pub(super) fn png(name: &str) -> Self {
        let path = unique_temp_path(name);
        write_png(&path, 16, 12);
        Self(path)
    }

    pub(super) fn bytes(name: &str, bytes: &[u8]) -> Self {
        let path = unique_temp_path(name);
        fs::write(&path, bytes).expect("test file should be written");
        Self(path)
    }

    pub(super) fn path(&self) -> &Path {
        &self.0
    }

    pub(super) fn locator(&self) -> ResourceLocator {
        ResourceLocator::new(self.0.to_string_lossy()).expect("locator")
    }
}

impl Drop for TempDoc {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

pub(super) fn window() -> DocumentWindow {
    DocumentWindow::new(Config::default())
}

pub(super) fn window_with(doc: &TempDoc) -> DocumentWindow {
    let mut window = window();
    window.open(&doc.locator()).expect("document should open");
    window
}
