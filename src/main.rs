mod app;
mod components;
mod draw;
mod keys;
mod state;
mod theme;
mod ui;

use crate::app::App;
use crate::state::messages::{DataRequest, DataResponse, UiEvent};
use crate::state::refresher::PeriodicRefresher;
use crate::state::worker::{DataWorker, LoadingState};
use cfb_data::DatasetStore;
use crossterm::event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, error};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Error);
    log::set_max_level(log::LevelFilter::Error);

    let app = App::new();
    let store = DatasetStore::new(app.settings.exports_dir.clone());
    let refresh_enabled = store.exports_dir().is_some();
    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (data_req_tx, data_req_rx) = mpsc::channel::<DataRequest>(100);
    let (data_resp_tx, data_resp_rx) = mpsc::channel::<DataResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Data thread
    let data_worker = DataWorker::new(store, data_req_rx, data_resp_tx);
    let data_task = tokio::spawn(data_worker.run());

    // Export refresh thread, only when exports can change on disk
    let periodic_task = refresh_enabled.then(|| {
        debug!("exports dir configured, refreshing the open game periodically");
        tokio::spawn(PeriodicRefresher::new(ui_event_tx.clone()).run())
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, data_req_tx, data_resp_rx).await;

    input_handler.abort();
    data_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cfbtui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cfbtui - college football sentiment terminal UI

Usage:
  cfbtui
  cfbtui --help
  cfbtui --version

Environment:
  CFBTUI_EXPORTS_DIR   Directory of export JSON files overriding the built-in ones
  CFBTUI_THEME         dark (default) or light
  CFBTUI_LOG_LEVEL     error (default), warn, info, debug or trace
  CFBTUI_PROMINENCE    Peak preservation threshold (default 0.04)
  CFBTUI_RAW           Set to 1 to start with smoothing off
  CFBTUI_VIDEO         launcher, link or thumbnail (default: detected)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    data_requests: mpsc::Sender<DataRequest>,
    mut data_responses: mpsc::Receiver<DataResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &data_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = data_responses.recv() => {
                let should_redraw = handle_data_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    data_requests: &mpsc::Sender<DataRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => true,
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, data_requests).await;
            true
        }
        UiEvent::Mouse(mouse_event) => keys::handle_mouse(mouse_event, app).await,
        UiEvent::Resize => true,
        UiEvent::RefreshTick => {
            let request = app.lock().await.refresh_request(false);
            if let Some(request) = request {
                let _ = data_requests.send(request).await;
            }
            false
        }
    }
}

async fn handle_data_response(
    response: DataResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        DataResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        DataResponse::ExportLoaded { export, reload } => {
            let mut guard = app.lock().await;
            guard.on_export_loaded(export, reload);
        }
        DataResponse::Error { key, not_found, message } => {
            if !not_found {
                error!("Data error: {message}");
            }
            let mut guard = app.lock().await;
            guard.on_load_failed(key, not_found, message);
        }
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Mouse(mouse_event) => Some(UiEvent::Mouse(mouse_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, EnableMouseCapture)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Restore the terminal. Best effort: also runs from the panic hook.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture);
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
