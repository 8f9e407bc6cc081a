use pricelens::adapters::FfmpegCamera;
use pricelens::app::{App, CaptureStatus, Screen};
use pricelens::storage::Storage;
use pricelens::ui;
use pricelens::vision::VisionClient;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("pricelens {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;

    // Ensure terminal cleanup on panic
    setup_panic_hook();

    let storage = Storage::open_default()?;
    init_tracing(&storage)?;

    let runtime = tokio::runtime::Runtime::new()?;

    let camera = Arc::new(FfmpegCamera::new());
    let vision = Arc::new(VisionClient::new());
    let mut app = App::new(storage, camera, vision);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = runtime.block_on(run_app(&mut terminal, &mut app));

    restore_terminal(&mut terminal)?;
    result
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Log to a file under the data directory; the terminal belongs to the TUI.
fn init_tracing(storage: &Storage) -> Result<()> {
    let log_path = storage.root().join("pricelens.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Async stream of keyboard events
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    loop {
        // Draw only when something changed (or an animation is running)
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        // 16ms tick for spinner animation
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.mark_dirty();
                        handle_key(app, key);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    _ => {}
                }
            }

            message = message_rx.recv() => {
                if let Some(msg) = message {
                    app.handle_message(msg);
                }
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit, always active
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The delete confirmation takes priority over all other key handling
    if app.pending_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.dismiss_delete(),
            _ => {}
        }
        return;
    }

    match app.screen {
        Screen::Dashboard => match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('s') => app.begin_scan(),
            KeyCode::Char('c') => app.cycle_currency(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
            KeyCode::Up => app.select_prev(),
            KeyCode::Down => app.select_next(),
            KeyCode::Esc => app.dismiss_alert(),
            _ => {}
        },
        Screen::Capture => match key.code {
            KeyCode::Esc => app.cancel_capture(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                // The error panel's close action doubles on enter.
                if matches!(app.capture_status, CaptureStatus::Failed(_)) {
                    app.cancel_capture();
                } else {
                    app.take_photo();
                }
            }
            KeyCode::Char('r') => app.switch_camera(),
            _ => {}
        },
        // Busy: the outcome message decides the next screen.
        Screen::Analyzing => {}
        Screen::Review => handle_review_key(app, key),
    }
}

fn handle_review_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_save(),
        KeyCode::Esc => app.cancel_review(),
        _ => {
            let Some(review) = app.review.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Tab => review.focus = review.focus.next(),
                KeyCode::BackTab => review.focus = review.focus.prev(),
                KeyCode::Backspace => {
                    review.focused_editor_mut().backspace();
                    review.price_invalid = false;
                }
                KeyCode::Delete => {
                    review.focused_editor_mut().delete_char();
                    review.price_invalid = false;
                }
                KeyCode::Left => review.focused_editor_mut().move_cursor_left(),
                KeyCode::Right => review.focused_editor_mut().move_cursor_right(),
                KeyCode::Home => review.focused_editor_mut().move_cursor_home(),
                KeyCode::End => review.focused_editor_mut().move_cursor_end(),
                KeyCode::Char(c) => {
                    review.focused_editor_mut().insert_char(c);
                    review.price_invalid = false;
                }
                _ => {}
            }
        }
    }
}
