use std::time::{Duration, Instant};

/// Only the middle of a chart surface scrubs time; outside it the cursor pins
/// to the nearest edge.
pub const BAND_START: f64 = 0.2;
pub const BAND_END: f64 = 0.8;
pub const DOUBLE_PRESS: Duration = Duration::from_millis(300);

/// The two chart surfaces sharing one cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Overview,
    Breakdown,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Overview, Surface::Breakdown];

    pub fn index(self) -> usize {
        match self {
            Surface::Overview => 0,
            Surface::Breakdown => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPhase {
    Idle,
    Tracking,
    Locked,
}

/// Map a pointer position on a surface of `width` to
/// `(physical_ratio, band_ratio)`. The physical ratio is clamped to the band
/// and is where the indicator line is drawn; the band ratio rescales it to [0,1].
pub fn band_position(x: f64, width: f64) -> Option<(f64, f64)> {
    if !x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    let physical = (x / width).clamp(BAND_START, BAND_END);
    Some((physical, (physical - BAND_START) / (BAND_END - BAND_START)))
}

/// Linear interpolation of a band ratio across `(min, max)` time.
pub fn logical_time(band_ratio: f64, (min, max): (f64, f64)) -> f64 {
    min + (max - min) * band_ratio
}

/// Cross-hair shared by both chart surfaces.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    ratio: Option<f64>,
    locked: bool,
    time: Option<f64>,
    hover_count: u8,
    last_press: Option<Instant>,
    locked_before_press: bool,
}

impl CursorState {
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Game minute under the cursor; drives the comment filter.
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    pub fn hover_count(&self) -> u8 {
        self.hover_count
    }

    pub fn phase(&self) -> CursorPhase {
        match (self.ratio, self.locked) {
            (None, _) => CursorPhase::Idle,
            (Some(_), true) => CursorPhase::Locked,
            (Some(_), false) => CursorPhase::Tracking,
        }
    }

    /// Move the cursor to pointer `x` on a surface `width` wide. Ignored while
    /// locked or for a degenerate width. Returns whether anything changed.
    pub fn update_from_x(&mut self, x: f64, width: f64, time_range: Option<(f64, f64)>) -> bool {
        if self.locked {
            return false;
        }
        let Some((physical, band)) = band_position(x, width) else {
            return false;
        };
        let time = time_range.map(|range| logical_time(band, range));
        let changed = self.ratio != Some(physical) || self.time != time;
        self.ratio = Some(physical);
        self.time = time;
        changed
    }

    /// A click/tap on either surface. A second press within
    /// [`DOUBLE_PRESS`] flips the lock relative to where it stood before the
    /// pair; a lone press only ever locks.
    pub fn press(&mut self, now: Instant) {
        if let Some(last) = self.last_press
            && now.saturating_duration_since(last) <= DOUBLE_PRESS
        {
            if self.ratio.is_some() {
                self.locked = !self.locked_before_press;
            }
            self.last_press = None;
            return;
        }

        self.last_press = Some(now);
        self.locked_before_press = self.locked;
        if self.ratio.is_some() && !self.locked {
            self.locked = true;
        }
    }

    pub fn hover_enter(&mut self) {
        self.hover_count = self.hover_count.saturating_add(1);
    }

    /// Pointer left a surface. Once it has left both, an unlocked cursor is
    /// dropped; a locked one stays until cleared.
    pub fn hover_leave(&mut self) {
        self.hover_count = self.hover_count.saturating_sub(1);
        if self.hover_count == 0 && !self.locked {
            self.ratio = None;
            self.time = None;
        }
    }

    pub fn clear(&mut self) {
        self.ratio = None;
        self.time = None;
        self.locked = false;
        self.last_press = None;
    }

    /// Drop only the time filter, keeping the line where it is.
    pub fn clear_time(&mut self) {
        self.time = None;
    }

    /// Forget hover tracking, e.g. when the surfaces are no longer drawn.
    pub fn reset_hover(&mut self) {
        self.hover_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: Option<(f64, f64)> = Some((10.0, 70.0));

    fn tracking() -> CursorState {
        let mut cursor = CursorState::default();
        cursor.hover_enter();
        cursor.update_from_x(50.0, 100.0, RANGE);
        cursor
    }

    #[test]
    fn surface_edges_map_to_series_extremes() {
        let mut cursor = CursorState::default();
        cursor.update_from_x(0.0, 200.0, RANGE);
        assert_eq!(cursor.time(), Some(10.0));
        assert_eq!(cursor.ratio(), Some(BAND_START));

        cursor.update_from_x(200.0, 200.0, RANGE);
        assert_eq!(cursor.time(), Some(70.0));
        assert_eq!(cursor.ratio(), Some(BAND_END));
    }

    #[test]
    fn midpoint_maps_to_band_middle() {
        let (physical, band) = band_position(50.0, 100.0).expect("valid width");
        assert!((physical - 0.5).abs() < 1e-12);
        assert!((band - 0.5).abs() < 1e-12);
        let mut cursor = CursorState::default();
        cursor.update_from_x(50.0, 100.0, RANGE);
        assert!((cursor.time().unwrap_or_default() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn band_interior_is_rescaled() {
        let (_, band) = band_position(35.0, 100.0).expect("valid width");
        assert!((band - 0.25).abs() < 1e-12);
        assert!(band_position(10.0, 0.0).is_none());
        assert!(band_position(f64::NAN, 10.0).is_none());
    }

    #[test]
    fn empty_series_moves_line_without_time() {
        let mut cursor = CursorState::default();
        assert!(cursor.update_from_x(30.0, 100.0, None));
        assert_eq!(cursor.ratio(), Some(0.3));
        assert_eq!(cursor.time(), None);
    }

    #[test]
    fn locked_cursor_ignores_movement() {
        let mut cursor = tracking();
        cursor.press(Instant::now());
        assert_eq!(cursor.phase(), CursorPhase::Locked);
        assert!(!cursor.update_from_x(0.0, 100.0, RANGE));
        assert_eq!(cursor.ratio(), Some(0.5));
    }

    #[test]
    fn double_press_toggles_lock_each_time() {
        let mut cursor = tracking();
        let t0 = Instant::now();
        assert!(!cursor.locked());

        cursor.press(t0);
        cursor.press(t0 + Duration::from_millis(120));
        assert!(cursor.locked());

        let t1 = t0 + Duration::from_secs(2);
        cursor.press(t1);
        cursor.press(t1 + Duration::from_millis(300));
        assert!(!cursor.locked());
        assert_eq!(cursor.phase(), CursorPhase::Tracking);
    }

    #[test]
    fn slow_presses_are_single_presses() {
        let mut cursor = tracking();
        let t0 = Instant::now();
        cursor.press(t0);
        assert!(cursor.locked());
        cursor.press(t0 + Duration::from_millis(301));
        assert!(cursor.locked(), "a lone press never unlocks");
    }

    #[test]
    fn press_without_cursor_does_not_lock() {
        let mut cursor = CursorState::default();
        let t0 = Instant::now();
        cursor.press(t0);
        cursor.press(t0 + Duration::from_millis(50));
        assert!(!cursor.locked());
        assert_eq!(cursor.phase(), CursorPhase::Idle);
    }

    #[test]
    fn hover_count_spans_both_surfaces() {
        let mut cursor = CursorState::default();
        cursor.hover_enter();
        cursor.update_from_x(40.0, 100.0, RANGE);
        assert_eq!(cursor.hover_count(), 1);

        cursor.hover_enter();
        assert_eq!(cursor.hover_count(), 2);

        cursor.hover_leave();
        assert_eq!(cursor.hover_count(), 1);
        assert!(cursor.ratio().is_some(), "cursor persists while over the other surface");

        cursor.hover_leave();
        assert_eq!(cursor.hover_count(), 0);
        assert_eq!(cursor.phase(), CursorPhase::Idle);
        assert!(cursor.time().is_none());

        cursor.hover_leave();
        assert_eq!(cursor.hover_count(), 0);
    }

    #[test]
    fn locked_cursor_survives_pointer_leaving() {
        let mut cursor = tracking();
        cursor.press(Instant::now());
        cursor.hover_leave();
        assert_eq!(cursor.phase(), CursorPhase::Locked);

        cursor.clear();
        assert_eq!(cursor.phase(), CursorPhase::Idle);
        assert!(!cursor.locked());
    }

    #[test]
    fn clearing_time_keeps_line() {
        let mut cursor = tracking();
        cursor.clear_time();
        assert!(cursor.ratio().is_some());
        assert!(cursor.time().is_none());
    }
}
