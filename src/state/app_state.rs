use crate::app::MenuItem;
use crate::components::video::VideoSurface;
use crate::state::cursor::{CursorState, Surface};
use crate::state::series_cache::SeriesCache;
use crate::theme::ThemeState;
use cfb_data::catalog::{MATCHUPS, RECOMMENDATIONS};
use cfb_data::{Comment, GameExport, Matchup, SmoothingParams, filter_comments};
use chrono::Local;
use std::time::Instant;
use tui::layout::{Position, Rect};

/// Worst comments shown before the list is expanded.
pub const WORST_COLLAPSED: usize = 8;
pub const WORST_EXPANDED: usize = 15;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DashboardState {
    /// Highlighted bet recommendation card.
    pub selected_recommendation: usize,
}

impl DashboardState {
    pub fn next(&mut self) {
        if RECOMMENDATIONS.is_empty() {
            return;
        }
        self.selected_recommendation = (self.selected_recommendation + 1) % RECOMMENDATIONS.len();
    }

    pub fn prev(&mut self) {
        if RECOMMENDATIONS.is_empty() {
            return;
        }
        self.selected_recommendation = self
            .selected_recommendation
            .checked_sub(1)
            .unwrap_or(RECOMMENDATIONS.len() - 1);
    }
}

// ---------------------------------------------------------------------------
// Game selection state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GamesState {
    pub selected: usize,
}

impl GamesState {
    pub fn down(&mut self) {
        if self.selected + 1 < MATCHUPS.len() {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_matchup(&self) -> Option<&'static Matchup> {
        MATCHUPS.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

/// Why the open game has no chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    NotFound,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct GameDetailState {
    /// The game being shown, straight from the catalog.
    pub route: Option<&'static Matchup>,
    pub export: Option<GameExport>,
    pub load_failure: Option<LoadFailure>,
    pub cache: SeriesCache,
    pub smoothing_enabled: bool,
    pub cursor: CursorState,
    /// Chart surfaces as last drawn, indexed by [`Surface::index`].
    pub surfaces: [Rect; 2],
    hovered: [bool; 2],
    pub show_all_worst: bool,
    pub scroll_offset: u16,
    pub loaded_at: Option<String>,
}

impl GameDetailState {
    pub fn new(smoothing_enabled: bool) -> Self {
        Self { smoothing_enabled, ..Self::default() }
    }

    /// Navigate to `matchup`. Everything tied to the previous game is dropped.
    pub fn open(&mut self, matchup: &'static Matchup) {
        let smoothing_enabled = self.smoothing_enabled;
        let mut cache = std::mem::take(&mut self.cache);
        cache.clear();
        *self = Self {
            route: Some(matchup),
            cache,
            smoothing_enabled,
            ..Self::default()
        };
    }

    pub fn export_key(&self) -> Option<&'static str> {
        self.route.map(|m| m.export_key)
    }

    /// Apply a finished load. Returns false when it belongs to a game that
    /// is no longer open.
    pub fn on_loaded(&mut self, export: GameExport, reload: bool, params: &SmoothingParams) -> bool {
        if self.export_key() != Some(export.key.as_str()) {
            return false;
        }
        if !reload {
            self.cursor.clear();
            self.scroll_offset = 0;
            self.show_all_worst = false;
        }
        self.cache.update(&export.series, params);
        self.export = Some(export);
        self.load_failure = None;
        self.loaded_at = Some(Local::now().format("%H:%M:%S").to_string());
        true
    }

    /// Apply a failed load. A failed reload keeps the data already shown.
    pub fn on_load_failed(&mut self, key: &str, not_found: bool, message: String) -> bool {
        if self.export_key() != Some(key) {
            return false;
        }
        if not_found {
            self.export = None;
            self.cache.clear();
            self.cursor.clear();
            self.load_failure = Some(LoadFailure::NotFound);
        } else if self.export.is_none() {
            self.load_failure = Some(LoadFailure::Failed(message));
        }
        true
    }

    /// Rerun the pipeline against new parameters; a no-op when unchanged.
    pub fn refresh_series(&mut self, params: &SmoothingParams) {
        if let Some(export) = &self.export {
            self.cache.update(&export.series, params);
        }
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.export.as_ref().and_then(GameExport::time_range)
    }

    pub fn active_points(&self) -> &[(f64, f64)] {
        self.cache.active_points(self.smoothing_enabled)
    }

    /// Track the pointer across both surfaces. Entering or leaving a surface
    /// adjusts the hover count; inside one, the cursor follows the column.
    pub fn pointer_moved(&mut self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        let mut changed = false;

        for surface in Surface::ALL {
            let idx = surface.index();
            let inside = self.surfaces[idx].contains(position);
            if inside && !self.hovered[idx] {
                self.hovered[idx] = true;
                self.cursor.hover_enter();
                changed = true;
            } else if !inside && self.hovered[idx] {
                self.hovered[idx] = false;
                self.cursor.hover_leave();
                changed = true;
            }
        }

        if let Some(rect) = self.surface_at(position) {
            let x = f64::from(column - rect.x);
            let width = f64::from(rect.width.saturating_sub(1));
            changed |= self.cursor.update_from_x(x, width, self.time_range());
        }
        changed
    }

    /// A click. Only counts when it lands on a chart surface.
    pub fn pointer_pressed(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let position = Position::new(column, row);
        if self.surface_at(position).is_none() {
            return false;
        }
        self.pointer_moved(column, row);
        self.cursor.press(now);
        true
    }

    /// Keyboard scrubbing: move one column of the overview surface.
    pub fn nudge(&mut self, columns: i32) -> bool {
        let width = match self.surfaces[Surface::Overview.index()].width {
            0 | 1 => 100.0,
            w => f64::from(w - 1),
        };
        let ratio = self.cursor.ratio().unwrap_or(0.5);
        let x = (ratio * width).round() + f64::from(columns);
        self.cursor.update_from_x(x, width, self.time_range())
    }

    pub fn activate(&mut self, now: Instant) {
        self.cursor.press(now);
    }

    /// Stop tracking hover once the surfaces are no longer on screen.
    pub fn leave(&mut self) {
        for idx in 0..self.hovered.len() {
            if self.hovered[idx] {
                self.hovered[idx] = false;
                self.cursor.hover_leave();
            }
        }
        self.cursor.reset_hover();
        self.surfaces = [Rect::ZERO; 2];
    }

    pub fn best_comments(&self) -> Vec<&Comment> {
        self.export
            .as_ref()
            .map(|e| filter_comments(&e.best, self.cursor.time()))
            .unwrap_or_default()
    }

    pub fn worst_comments(&self) -> Vec<&Comment> {
        let limit = if self.show_all_worst { WORST_EXPANDED } else { WORST_COLLAPSED };
        let mut worst = self
            .export
            .as_ref()
            .map(|e| filter_comments(&e.worst, self.cursor.time()))
            .unwrap_or_default();
        worst.truncate(limit);
        worst
    }

    /// Number of worst comments behind the "show all" toggle.
    pub fn hidden_worst(&self) -> usize {
        match &self.export {
            Some(e) if !self.show_all_worst && e.worst.len() > WORST_COLLAPSED => e.worst.len(),
            _ => 0,
        }
    }

    fn surface_at(&self, position: Position) -> Option<Rect> {
        self.surfaces.iter().copied().find(|rect| rect.contains(position))
    }
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// One-line feedback such as the video hint.
    pub status: Option<String>,
    pub theme: ThemeState,
    pub dashboard: DashboardState,
    pub games: GamesState,
    pub game_detail: GameDetailState,
    pub video: VideoSurface,
    /// Export keys the store can resolve; listed when a game has no graph.
    pub known_keys: Vec<String>,
}

impl AppState {
    pub fn new(theme: ThemeState, smoothing_enabled: bool, video: VideoSurface, known_keys: Vec<String>) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            status: None,
            theme,
            dashboard: DashboardState::default(),
            games: GamesState::default(),
            game_detail: GameDetailState::new(smoothing_enabled),
            video,
            known_keys,
        }
    }
}
