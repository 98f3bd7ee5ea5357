use crate::backend::BackendKind;
use crate::error::{AppError, LoadError};
use crate::locator::ResourceLocator;
use crate::test_support::unique_temp_path;
use crate::window::{CommandOutcome, WINDOW_TITLE, ZoomMode};

use super::{TempDoc, window, window_with};

#[test]
fn empty_window_has_plain_title() {
    let window = window();
    assert!(window.is_empty());
    assert_eq!(window.title(), WINDOW_TITLE);
    assert_eq!(window.page_count(), None);
    assert!(window.last_error().is_none());
}

#[test]
fn open_success_sets_document_and_title() {
    let doc = TempDoc::pdf("report.pdf", &["one", "two", "three"]);
    let window = window_with(&doc);

    assert!(!window.is_empty());
    assert_eq!(window.page_count(), Some(3));
    assert_eq!(window.current_page(), 0);
    assert_eq!(
        window.backend().map(|backend| backend.kind()),
        Some(BackendKind::Pdf)
    );
    assert_eq!(window.path(), Some(doc.path()));
    let file_name = doc
        .path()
        .file_name()
        .expect("temp path has a file name")
        .to_string_lossy()
        .into_owned();
    assert_eq!(window.title(), format!("{file_name} - Document Viewer"));
}

#[test]
fn failed_open_keeps_previous_document() {
    let doc = TempDoc::pdf("kept.pdf", &["one", "two", "three"]);
    let mut window = window_with(&doc);
    window.goto_page(2).expect("goto should succeed");
    let title = window.title();

    let missing = ResourceLocator::new(unique_temp_path("missing.pdf").to_string_lossy())
        .expect("locator");
    let err = window.open(&missing).expect_err("missing file should fail");

    assert!(matches!(
        err,
        AppError::Load(LoadError::BackendLoadFailed(_))
    ));
    assert_eq!(window.current_page(), 1);
    assert_eq!(window.page_count(), Some(3));
    assert_eq!(window.title(), title);
    assert_eq!(window.path(), Some(doc.path()));
    assert!(matches!(
        window.last_error(),
        Some(LoadError::BackendLoadFailed(_))
    ));
    assert!(
        window
            .status()
            .message
            .starts_with("Unable to open document: ")
    );
}

#[test]
fn unhandled_type_reports_mime_and_leaves_window_empty() {
    let text = TempDoc::bytes("notes.txt", b"plain words only");
    let mut window = window();

    let err = window
        .open(&text.locator())
        .expect_err("text should not open");
    assert_eq!(
        err.to_string(),
        "Unhandled MIME type: 'application/octet-stream'"
    );
    assert!(window.is_empty());
    assert_eq!(window.title(), WINDOW_TITLE);
}

#[test]
fn reopening_resets_page_zoom_and_search() {
    let first = TempDoc::pdf("first.pdf", &["needle", "hay", "needle"]);
    let second = TempDoc::png("second.png");
    let mut window = window_with(&first);

    window.last_page().expect("last page should succeed");
    window.zoom_in().expect("zoom should succeed");
    window.open_find().expect("pdf supports find");
    window
        .set_search("needle", false)
        .expect("search should succeed");
    assert!(window.find().is_active());

    let outcome = window
        .open(&second.locator())
        .expect("png should open");
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(window.current_page(), 0);
    assert_eq!(window.page_count(), Some(1));
    assert_eq!(window.zoom(), ZoomMode::Free(1.0));
    assert!(!window.find().is_active());
    assert_eq!(
        window.backend().map(|backend| backend.kind()),
        Some(BackendKind::RasterImage)
    );
}

#[test]
fn close_drops_document() {
    let doc = TempDoc::pdf("closing.pdf", &["one"]);
    let mut window = window_with(&doc);

    assert_eq!(window.close(), CommandOutcome::Applied);
    assert!(window.is_empty());
    assert_eq!(window.title(), WINDOW_TITLE);
    assert_eq!(window.close(), CommandOutcome::Noop);
    assert!(matches!(
        window.next_page(),
        Err(AppError::Unsupported(_))
    ));
}
