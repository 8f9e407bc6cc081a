//! Render smoke tests against ratatui's TestBackend.
//!
//! These pin the visible contract of each screen: the strings a user
//! actually relies on are present, and no screen panics on small terminals.

mod common;

use common::{build_app, sample_result};
use pricelens::app::{ReviewState, Screen};
use pricelens::models::TrackedProduct;
use pricelens::traits::CapturedFrame;
use pricelens::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(app: &pricelens::app::App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    buffer_text(&terminal)
}

fn sample_frame() -> CapturedFrame {
    CapturedFrame {
        jpeg: vec![0xff, 0xd8],
        width: 640,
        height: 480,
    }
}

#[tokio::test]
async fn test_dashboard_empty_state() {
    let (_dir, _camera, app) = build_app("http://127.0.0.1:9");
    let text = draw(&app, 80, 24);

    assert!(text.contains("PriceLens"));
    assert!(text.contains("Total Tracked Value"));
    assert!(text.contains("$0,00"));
    assert!(text.contains("No items tracked yet"));
    assert!(text.contains("Add more items to see trends"));
}

#[tokio::test]
async fn test_dashboard_lists_items_with_grouped_total() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    let mut expensive = sample_result();
    expensive.product_name = "Road Bike".to_string();
    expensive.price = 1230.0;
    let mut cheap = sample_result();
    cheap.price = 4.5;
    app.items = vec![
        TrackedProduct::from_result(&expensive, None),
        TrackedProduct::from_result(&cheap, None),
    ];

    let text = draw(&app, 100, 24);

    assert!(text.contains("$1.234,50"));
    assert!(text.contains("Recent Scans (2 items)"));
    assert!(text.contains("Road Bike"));
    assert!(text.contains("[Food]"));
    // Two items are enough for the trend, so the hint disappears.
    assert!(!text.contains("Add more items to see trends"));
}

#[tokio::test]
async fn test_dashboard_alert_line() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    app.alert = Some(pricelens::app::ANALYSIS_FAILED_ALERT.to_string());

    let text = draw(&app, 80, 24);
    assert!(text.contains("Failed to analyze image. Please try again."));
}

#[tokio::test]
async fn test_delete_modal_names_the_item() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    let item = TrackedProduct::from_result(&sample_result(), None);
    let id = item.id.clone();
    app.items = vec![item];
    app.pending_delete = Some(id);

    let text = draw(&app, 80, 24);
    assert!(text.contains("Delete scan?"));
    assert!(text.contains("Espresso Beans 1kg"));
}

#[tokio::test]
async fn test_capture_screen_states() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    app.screen = Screen::Capture;

    app.capture_status = pricelens::app::CaptureStatus::Opening;
    let text = draw(&app, 80, 24);
    assert!(text.contains("Opening back camera"));

    app.capture_status = pricelens::app::CaptureStatus::Ready;
    let text = draw(&app, 80, 24);
    assert!(text.contains("Scan Price Tag"));
    assert!(text.contains("[space] capture"));

    app.capture_status =
        pricelens::app::CaptureStatus::Failed("device busy".to_string());
    let text = draw(&app, 80, 24);
    assert!(text.contains("Unable to access camera"));
    assert!(text.contains("[esc] close"));
}

#[tokio::test]
async fn test_analyzing_screen() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    app.screen = Screen::Analyzing;

    let text = draw(&app, 80, 24);
    assert!(text.contains("Analyzing Product"));
    assert!(text.contains("Gemini Vision"));
}

#[tokio::test]
async fn test_review_screen_shows_fields_and_confidence() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    app.screen = Screen::Review;
    app.review = Some(ReviewState::new(sample_result(), sample_frame()));

    let text = draw(&app, 80, 24);
    assert!(text.contains("Review scan"));
    assert!(text.contains("[Food]"));
    assert!(text.contains("Confidence: 92%"));
    assert!(text.contains("Espresso Beans 1kg"));
    assert!(text.contains("18.90"));
    assert!(text.contains("[enter] save item"));
    // High confidence: no advisory.
    assert!(!text.contains("Confidence is low"));
}

#[tokio::test]
async fn test_review_screen_low_confidence_advisory() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    let mut result = sample_result();
    result.confidence_score = 0.4;
    app.screen = Screen::Review;
    app.review = Some(ReviewState::new(result, sample_frame()));

    let text = draw(&app, 80, 24);
    assert!(text.contains("Confidence: 40%"));
    assert!(text.contains("Confidence is low. Please verify the price matches the tag."));
}

#[tokio::test]
async fn test_all_screens_survive_tiny_terminal() {
    let (_dir, _camera, mut app) = build_app("http://127.0.0.1:9");
    app.items = vec![TrackedProduct::from_result(&sample_result(), None)];

    for screen in [
        Screen::Dashboard,
        Screen::Capture,
        Screen::Analyzing,
        Screen::Review,
    ] {
        app.screen = screen;
        if screen == Screen::Review {
            app.review = Some(ReviewState::new(sample_result(), sample_frame()));
        }
        // Must not panic.
        let _ = draw(&app, 20, 6);
    }
}
