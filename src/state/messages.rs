use crate::state::worker::LoadingState;
use cfb_data::GameExport;
use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum DataRequest {
    /// Load one export by file name. `reload` marks a periodic re-read of the
    /// open game, which must keep the cursor and scroll position.
    LoadExport { key: String, reload: bool },
}

#[derive(Debug)]
pub enum DataResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ExportLoaded { export: GameExport, reload: bool },
    /// `not_found` separates "no graph for this game" from real failures.
    Error { key: String, not_found: bool, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
