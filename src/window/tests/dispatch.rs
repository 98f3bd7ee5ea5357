use crate::error::AppError;
use crate::window::{
    ActionId, Command, CommandOutcome, WindowEvent, ZoomMode, dispatch, parse_command_text,
};

use super::{TempDoc, window, window_with};

#[test]
fn dispatch_next_page_emits_page_changed_and_command_executed() {
    let doc = TempDoc::pdf("nav.pdf", &["one", "two", "three"]);
    let mut window = window_with(&doc);

    let result = dispatch(&mut window, Command::NextPage).expect("dispatch should succeed");

    assert_eq!(result.outcome, CommandOutcome::Applied);
    assert_eq!(
        result.emitted_events,
        vec![
            WindowEvent::PageChanged { from: 0, to: 1 },
            WindowEvent::CommandExecuted {
                id: ActionId::GoNextPage,
                outcome: CommandOutcome::Applied,
            },
        ]
    );
    assert_eq!(window.status().message, "page 2/3");
}

#[test]
fn dispatch_open_emits_document_changed() {
    let doc = TempDoc::pdf("opened.pdf", &["one"]);
    let mut window = window();

    let result = dispatch(
        &mut window,
        Command::Open {
            locator: doc.path().to_string_lossy().into_owned(),
        },
    )
    .expect("dispatch should succeed");

    assert!(matches!(
        result.emitted_events.first(),
        Some(WindowEvent::DocumentChanged { title }) if title.ends_with(" - Document Viewer")
    ));
}

#[test]
fn dispatch_fullscreen_toggle_requests_state() {
    let mut window = window();

    let result = dispatch(&mut window, Command::SetFullscreen { active: None })
        .expect("dispatch should succeed");
    assert!(
        result
            .emitted_events
            .contains(&WindowEvent::FullscreenRequested { active: true })
    );

    let result = dispatch(&mut window, Command::WindowStateChanged { fullscreen: true })
        .expect("dispatch should succeed");
    assert!(
        result
            .emitted_events
            .contains(&WindowEvent::FullscreenChanged { active: true })
    );
}

#[test]
fn dispatch_propagates_errors_without_document() {
    let mut window = window();
    assert!(matches!(
        dispatch(&mut window, Command::LastPage),
        Err(AppError::Unsupported(_))
    ));
    assert!(matches!(
        dispatch(&mut window, Command::Open { locator: String::new() }),
        Err(AppError::InvalidArgument(_))
    ));
}

#[test]
fn zoom_commands_step_and_clamp() {
    let doc = TempDoc::pdf("zoom.pdf", &["one"]);
    let mut window = window_with(&doc);

    dispatch(&mut window, Command::ZoomIn).expect("zoom in should succeed");
    assert_eq!(window.zoom(), ZoomMode::Free(1.2));

    for _ in 0..20 {
        dispatch(&mut window, Command::ZoomIn).expect("zoom in should succeed");
    }
    assert_eq!(window.zoom(), ZoomMode::Free(4.0));
    let result = dispatch(&mut window, Command::ZoomIn).expect("zoom in should succeed");
    assert_eq!(result.outcome, CommandOutcome::Noop);

    dispatch(&mut window, Command::NormalSize).expect("normal size should succeed");
    assert_eq!(window.zoom(), ZoomMode::Free(1.0));

    dispatch(&mut window, Command::BestFit).expect("best fit should succeed");
    assert_eq!(window.zoom(), ZoomMode::BestFit);
    // 300pt square page in a 1024x768 viewport
    assert!((window.current_scale() - 768.0 / 300.0).abs() < 0.001);
}

#[test]
fn scripted_commands_drive_the_window() {
    let doc = TempDoc::pdf("script.pdf", &["intro", "body", "needle"]);
    let mut window = window_with(&doc);

    for line in ["sidebar on", "goto-page 2", "find", "search needle", "toolbar"] {
        let command = parse_command_text(line).expect("command should parse");
        dispatch(&mut window, command).expect("command should apply");
    }

    assert!(window.sidebar_visible());
    assert!(!window.toolbar_visible());
    assert!(window.find().visible);
    assert_eq!(window.current_page(), 2);
}
