use crate::components::video::VideoSurface;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::DataRequest;
use crate::theme::ThemeState;
use cfb_data::{DatasetStore, GameExport};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::{debug, error};
use std::time::Instant;

/// Step for the runtime prominence threshold keys.
pub const PROMINENCE_STEP: f64 = 0.01;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Games,
    GameDetail,
    Sentiment,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        let video = VideoSurface::select(settings.video);
        let known_keys = DatasetStore::new(settings.exports_dir.clone()).keys();
        Self::with_settings(settings, video, known_keys)
    }

    pub fn with_settings(settings: AppSettings, video: VideoSurface, known_keys: Vec<String>) -> Self {
        let theme = ThemeState::new(settings.dark_theme);
        let state = AppState::new(theme, settings.smoothing_enabled, video, known_keys);
        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Data responses, applied from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_export_loaded(&mut self, export: GameExport, reload: bool) {
        let key = export.key.clone();
        if self
            .state
            .game_detail
            .on_loaded(export, reload, &self.settings.smoothing)
        {
            self.state.last_error = None;
        } else {
            debug!("dropping stale export {key}");
        }
    }

    pub fn on_load_failed(&mut self, key: String, not_found: bool, message: String) {
        if self.state.game_detail.on_load_failed(&key, not_found, message.clone()) && !not_found {
            self.state.last_error = Some(message);
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        if self.state.active_tab == MenuItem::GameDetail {
            self.state.game_detail.leave();
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.status = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        debug!("theme switched to {}", self.state.theme.label());
    }

    // -----------------------------------------------------------------------
    // Game selection
    // -----------------------------------------------------------------------

    /// Open the highlighted matchup in the detail view and return the load
    /// the worker should run.
    pub fn open_selected_game(&mut self) -> Option<DataRequest> {
        let matchup = self.state.games.selected_matchup()?;
        debug!("opening game {} ({})", matchup.id, matchup.export_key);
        self.state.game_detail.open(matchup);
        self.update_tab(MenuItem::GameDetail);
        Some(DataRequest::LoadExport { key: matchup.export_key.to_string(), reload: false })
    }

    /// Re-read the open export. Only meaningful with an exports directory;
    /// `force` is the manual reload key.
    pub fn refresh_request(&self, force: bool) -> Option<DataRequest> {
        if !force && self.settings.exports_dir.is_none() {
            return None;
        }
        let key = self.state.game_detail.export_key()?;
        Some(DataRequest::LoadExport { key: key.to_string(), reload: true })
    }

    // -----------------------------------------------------------------------
    // Game detail
    // -----------------------------------------------------------------------

    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> bool {
        if self.state.active_tab != MenuItem::GameDetail {
            return false;
        }
        let detail = &mut self.state.game_detail;
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                detail.pointer_moved(event.column, event.row)
            }
            MouseEventKind::Down(MouseButton::Left) => detail.pointer_pressed(event.column, event.row, now),
            _ => false,
        }
    }

    pub fn toggle_smoothing(&mut self) {
        let detail = &mut self.state.game_detail;
        detail.smoothing_enabled = !detail.smoothing_enabled;
        self.settings.smoothing_enabled = detail.smoothing_enabled;
    }

    /// Shift the peak-preservation threshold; never below zero.
    pub fn adjust_prominence(&mut self, delta: f64) {
        let threshold = &mut self.settings.smoothing.prominence_threshold;
        *threshold = ((*threshold + delta) * 100.0).round().max(0.0) / 100.0;
        debug!("prominence threshold now {threshold:.2}");
        self.state.game_detail.refresh_series(&self.settings.smoothing);
    }

    pub fn toggle_show_all_worst(&mut self) {
        let detail = &mut self.state.game_detail;
        detail.show_all_worst = !detail.show_all_worst;
    }

    pub fn play_video(&mut self) {
        match self.state.video.activate() {
            Ok(hint) => self.state.status = Some(hint),
            Err(e) => {
                error!("video launch failed: {e:#}");
                self.state.last_error = Some(format!("{e:#}"));
            }
        }
    }

    pub fn scroll_comments(&mut self, down: bool) {
        let offset = &mut self.state.game_detail.scroll_offset;
        *offset = if down { offset.saturating_add(1) } else { offset.saturating_sub(1) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfb_data::catalog::MATCHUPS;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;
    use tui::layout::Rect;

    fn app() -> App {
        App::with_settings(AppSettings::default(), VideoSurface::Thumbnail, Vec::new())
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn opening_a_game_routes_to_detail() {
        let mut app = app();
        app.state.games.down();
        let request = app.open_selected_game();
        let expected = MATCHUPS[1].export_key.to_string();
        assert!(matches!(request, Some(DataRequest::LoadExport { key, reload: false }) if key == expected));
        assert_eq!(app.state.active_tab, MenuItem::GameDetail);
        assert_eq!(app.state.game_detail.route.map(|m| m.id), Some(MATCHUPS[1].id));
    }

    #[test]
    fn refresh_needs_exports_dir_unless_forced() {
        let mut app = app();
        assert!(app.refresh_request(true).is_none(), "no game open");
        app.open_selected_game();
        assert!(app.refresh_request(false).is_none());
        assert!(matches!(app.refresh_request(true), Some(DataRequest::LoadExport { reload: true, .. })));

        app.settings.exports_dir = Some(PathBuf::from("/tmp/exports"));
        assert!(app.refresh_request(false).is_some());
    }

    #[test]
    fn mouse_only_drives_cursor_on_detail_tab() {
        let mut app = app();
        app.state.game_detail.surfaces = [Rect::new(0, 0, 50, 5), Rect::new(0, 6, 50, 5)];
        assert!(!app.handle_mouse(mouse(MouseEventKind::Moved, 10, 2), Instant::now()));

        app.open_selected_game();
        app.state.game_detail.surfaces = [Rect::new(0, 0, 50, 5), Rect::new(0, 6, 50, 5)];
        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, 10, 2), Instant::now()));
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), Instant::now()));
        assert!(app.state.game_detail.cursor.locked());
        assert!(!app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 2), Instant::now()));
    }

    #[test]
    fn leaving_detail_drops_hover() {
        let mut app = app();
        app.open_selected_game();
        app.state.game_detail.surfaces = [Rect::new(0, 0, 50, 5), Rect::new(0, 6, 50, 5)];
        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 2), Instant::now());
        app.update_tab(MenuItem::Games);
        assert_eq!(app.state.game_detail.cursor.hover_count(), 0);
        assert_eq!(app.state.previous_tab, MenuItem::GameDetail);
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Sentiment);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Sentiment);
    }

    #[test]
    fn prominence_steps_and_floors_at_zero() {
        let mut app = app();
        app.adjust_prominence(PROMINENCE_STEP);
        assert_eq!(app.settings.smoothing.prominence_threshold, 0.05);
        for _ in 0..10 {
            app.adjust_prominence(-PROMINENCE_STEP);
        }
        assert_eq!(app.settings.smoothing.prominence_threshold, 0.0);
    }

    #[test]
    fn toggles_flip_state() {
        let mut app = app();
        app.toggle_theme();
        assert!(!app.state.theme.is_dark);
        app.toggle_smoothing();
        assert!(!app.state.game_detail.smoothing_enabled);
        assert!(!app.settings.smoothing_enabled);
        app.toggle_show_all_worst();
        assert!(app.state.game_detail.show_all_worst);
    }

    #[test]
    fn passive_video_surface_sets_status() {
        let mut app = app();
        app.play_video();
        assert!(app.state.status.is_some());
        assert!(app.state.last_error.is_none());
    }
}
