use crate::app::{App, MenuItem, PROMINENCE_STEP};
use crate::state::messages::DataRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    data_requests: &mpsc::Sender<DataRequest>,
) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;
    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Games),
        (_, Char('3'), _) => guard.update_tab(MenuItem::GameDetail),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Sentiment),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Dashboard
        (MenuItem::Dashboard, Char('j') | KeyCode::Down, _) => guard.state.dashboard.next(),
        (MenuItem::Dashboard, Char('k') | KeyCode::Up, _) => guard.state.dashboard.prev(),

        // Game selection
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => guard.state.games.down(),
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => guard.state.games.up(),
        (MenuItem::Games, KeyCode::Enter, _) => request = guard.open_selected_game(),

        // Game detail: cursor
        (MenuItem::GameDetail, Char('h') | KeyCode::Left, _) => {
            guard.state.game_detail.nudge(-1);
        }
        (MenuItem::GameDetail, Char('l') | KeyCode::Right, _) => {
            guard.state.game_detail.nudge(1);
        }
        (MenuItem::GameDetail, Char(' '), _) => guard.state.game_detail.activate(Instant::now()),
        (MenuItem::GameDetail, Char('c'), _) => guard.state.game_detail.cursor.clear(),
        (MenuItem::GameDetail, Char('a'), _) => guard.state.game_detail.cursor.clear_time(),

        // Game detail: panels
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => guard.scroll_comments(true),
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => guard.scroll_comments(false),
        (MenuItem::GameDetail, Char('m'), _) => guard.toggle_show_all_worst(),
        (MenuItem::GameDetail, Char('s'), _) => guard.toggle_smoothing(),
        (MenuItem::GameDetail, Char('['), _) => guard.adjust_prominence(-PROMINENCE_STEP),
        (MenuItem::GameDetail, Char(']'), _) => guard.adjust_prominence(PROMINENCE_STEP),
        (MenuItem::GameDetail, Char('v'), _) => guard.play_video(),
        (MenuItem::GameDetail, Char('r'), _) => request = guard.refresh_request(true),
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Games),

        // Global
        (_, Char('t'), _) => guard.toggle_theme(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = data_requests.send(request).await;
    }
}

/// Returns whether the event changed anything worth a redraw.
pub async fn handle_mouse(mouse_event: MouseEvent, app: &Arc<Mutex<App>>) -> bool {
    let mut guard = app.lock().await;
    guard.handle_mouse(mouse_event, Instant::now())
}
