use cfb_data::{AggregatedSeries, Series, SmoothingParams, aggregate, smooth};

/// Aggregated and smoothed views of one export, recomputed only when the
/// source series or the smoothing parameters change.
#[derive(Debug, Default)]
pub struct SeriesCache {
    source: Option<(Series, SmoothingParams)>,
    aggregated: AggregatedSeries,
    smoothed: AggregatedSeries,
    aggregated_points: Vec<(f64, f64)>,
    smoothed_points: Vec<(f64, f64)>,
    recomputations: usize,
}

impl SeriesCache {
    /// Returns true when the derived series were rebuilt.
    pub fn update(&mut self, series: &Series, params: &SmoothingParams) -> bool {
        if let Some((cached, cached_params)) = &self.source
            && cached == series
            && cached_params == params
        {
            return false;
        }

        self.aggregated = aggregate(series);
        self.smoothed = smooth(&self.aggregated, params);
        self.aggregated_points = self.aggregated.points();
        self.smoothed_points = self.smoothed.points();
        self.source = Some((series.clone(), *params));
        self.recomputations += 1;
        true
    }

    pub fn clear(&mut self) {
        *self = Self {
            recomputations: self.recomputations,
            ..Self::default()
        };
    }

    pub fn aggregated(&self) -> &AggregatedSeries {
        &self.aggregated
    }

    pub fn smoothed(&self) -> &AggregatedSeries {
        &self.smoothed
    }

    pub fn active(&self, smoothing_enabled: bool) -> &AggregatedSeries {
        if smoothing_enabled { &self.smoothed } else { &self.aggregated }
    }

    /// Chart-ready `(time, value)` pairs of the active series.
    pub fn active_points(&self, smoothing_enabled: bool) -> &[(f64, f64)] {
        if smoothing_enabled { &self.smoothed_points } else { &self.aggregated_points }
    }

    pub fn aggregated_points(&self) -> &[(f64, f64)] {
        &self.aggregated_points
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        Series::from_columns(
            &[0.0, 1.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            &[0.2, 0.2, 0.2, 0.2, 0.8, 0.8, 0.8],
        )
    }

    #[test]
    fn unchanged_source_is_not_recomputed() {
        let mut cache = SeriesCache::default();
        let params = SmoothingParams::default();
        assert!(cache.update(&series(), &params));
        assert!(!cache.update(&series(), &params));
        assert_eq!(cache.recomputations(), 1);
        assert_eq!(cache.aggregated().len(), 6);
        assert_eq!(cache.smoothed().times(), cache.aggregated().times());
    }

    #[test]
    fn new_data_or_params_recompute() {
        let mut cache = SeriesCache::default();
        let params = SmoothingParams::default();
        cache.update(&series(), &params);

        let tuned = SmoothingParams { prominence_threshold: 0.5, ..params };
        assert!(cache.update(&series(), &tuned));

        let other = Series::from_columns(&[0.0], &[0.4]);
        assert!(cache.update(&other, &tuned));
        assert_eq!(cache.recomputations(), 3);
        assert_eq!(cache.active_points(true), &[(0.0, 0.4)]);
    }

    #[test]
    fn active_series_follows_toggle() {
        let mut cache = SeriesCache::default();
        cache.update(&series(), &SmoothingParams::default());
        assert_eq!(cache.active(false), cache.aggregated());
        assert_eq!(cache.active(true), cache.smoothed());
        assert_ne!(cache.active_points(true), cache.active_points(false));
    }

    #[test]
    fn clear_forgets_source() {
        let mut cache = SeriesCache::default();
        let params = SmoothingParams::default();
        cache.update(&series(), &params);
        cache.clear();
        assert!(cache.aggregated().is_empty());
        assert!(cache.update(&series(), &params));
    }
}
