//! Sentiment-over-time series pipeline: normalize → aggregate → smooth.

use crate::export::RawExport;
use serde_json::Value;

pub const DEFAULT_WEIGHTS: [f64; 5] = [1.0, 2.0, 3.0, 2.0, 1.0];
pub const DEFAULT_PROMINENCE: f64 = 0.04;
pub const MIN_SMOOTH_LEN: usize = 5;

/// Paired time/value columns. Times may repeat and need not be sorted;
/// values are always within [0,1].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series from two loose columns. Non-finite entries are dropped
    /// from each column independently, the longer column is truncated to the
    /// shorter, and values are clamped into [0,1].
    pub fn from_columns(times: &[f64], values: &[f64]) -> Self {
        let times: Vec<f64> = times.iter().copied().filter(|t| t.is_finite()).collect();
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        Self::paired(times, values)
    }

    fn paired(mut times: Vec<f64>, values: Vec<f64>) -> Self {
        let len = times.len().min(values.len());
        times.truncate(len);
        let values = values.into_iter().take(len).map(clamp_unit).collect();
        Self { times, values }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        min_max(&self.times)
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(&self.values)
    }
}

/// Series with unique, strictly ascending times. Also the shape of the
/// smoothed output: smoothing only ever replaces values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl AggregatedSeries {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times.iter().copied().zip(self.values.iter().copied()).collect()
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((*self.times.first()?, *self.times.last()?))
    }

    /// Value of the sample closest in time to `time`.
    pub fn value_near(&self, time: f64) -> Option<f64> {
        if self.times.is_empty() || !time.is_finite() {
            return None;
        }
        let idx = self.times.partition_point(|t| *t < time);
        let candidate = match idx {
            0 => 0,
            i if i >= self.times.len() => self.times.len() - 1,
            i if (self.times[i] - time).abs() < (time - self.times[i - 1]).abs() => i,
            i => i - 1,
        };
        self.values.get(candidate).copied()
    }
}

/// Tunable smoothing constants. `Default` carries the values the exports
/// were tuned against; changing them changes the rendered curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    /// Triangular moving-average weights, centered on the sample.
    pub weights: [f64; 5],
    /// Local extrema deviating more than this from their neighbours' mean
    /// keep their raw value.
    pub prominence_threshold: f64,
    /// Series shorter than this are returned untouched.
    pub min_len: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            prominence_threshold: DEFAULT_PROMINENCE,
            min_len: MIN_SMOOTH_LEN,
        }
    }
}

/// Validate the raw export columns into a [`Series`]. Missing or non-array
/// fields yield an empty column, which empties the whole series.
pub fn normalize(raw: &RawExport) -> Series {
    Series::paired(numeric_entries(raw.times.as_ref()), numeric_entries(raw.avgs.as_ref()))
}

fn numeric_entries(value: Option<&Value>) -> Vec<f64> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_f64)
        .filter(|v| v.is_finite())
        .collect()
}

/// Merge samples sharing the exact same time into their mean.
pub fn aggregate(series: &Series) -> AggregatedSeries {
    let mut pairs: Vec<(f64, f64)> = series.samples().collect();
    // Stable sort keeps each group's input order, so sums match insertion order.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut times = Vec::with_capacity(pairs.len());
    let mut values = Vec::with_capacity(pairs.len());
    let mut idx = 0;
    while idx < pairs.len() {
        let time = pairs[idx].0;
        let mut sum = 0.0;
        let mut count = 0usize;
        while idx < pairs.len() && pairs[idx].0 == time {
            sum += pairs[idx].1;
            count += 1;
            idx += 1;
        }
        times.push(time);
        values.push(sum / count as f64);
    }

    AggregatedSeries { times, values }
}

/// Median-of-3 filter, then a triangular moving average, then restore any
/// prominent local extremum of the input to its raw value.
///
/// Not idempotent: a second pass keeps flattening slopes the first pass
/// produced unless new prominent extrema appear.
pub fn smooth(series: &AggregatedSeries, params: &SmoothingParams) -> AggregatedSeries {
    let raw = series.values();
    let n = raw.len();
    if n < params.min_len.max(3) {
        return series.clone();
    }

    let median: Vec<f64> = (0..n)
        .map(|i| {
            if i == 0 || i == n - 1 {
                raw[i]
            } else {
                median_of_three(raw[i - 1], raw[i], raw[i + 1])
            }
        })
        .collect();

    let weight_sum: f64 = params.weights.iter().sum();
    let mut smoothed = median.clone();
    for i in 2..n.saturating_sub(2) {
        let acc: f64 = params
            .weights
            .iter()
            .enumerate()
            .map(|(k, w)| median[i + k - 2] * w)
            .sum();
        smoothed[i] = acc / weight_sum;
    }

    for i in 1..n - 1 {
        let (prev, cur, next) = (raw[i - 1], raw[i], raw[i + 1]);
        let is_peak = cur > prev && cur > next;
        let is_valley = cur < prev && cur < next;
        if (is_peak || is_valley) && (cur - (prev + next) / 2.0).abs() > params.prominence_threshold {
            smoothed[i] = cur;
        }
    }

    AggregatedSeries {
        times: series.times.clone(),
        values: smoothed,
    }
}

fn median_of_three(a: f64, b: f64, c: f64) -> f64 {
    let mut window = [a, b, c];
    window.sort_by(f64::total_cmp);
    window[1]
}

fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(doc: Value) -> RawExport {
        serde_json::from_value(doc).expect("raw export should deserialize")
    }

    fn agg(times: &[f64], values: &[f64]) -> AggregatedSeries {
        aggregate(&Series::from_columns(times, values))
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn duplicate_times_are_averaged() {
        let series = normalize(&raw(json!({"times": [1, 1, 2, 3], "avgs": [0.2, 0.4, 0.5, 0.9]})));
        let out = aggregate(&series);
        assert_eq!(out.times(), &[1.0, 2.0, 3.0]);
        assert_close(out.values(), &[0.3, 0.5, 0.9]);
    }

    #[test]
    fn aggregated_times_are_strictly_increasing() {
        let out = agg(
            &[5.0, 1.0, 3.0, 1.0, 5.0, 2.0, 0.0, -0.0],
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.9],
        );
        assert!(out.times().windows(2).all(|w| w[0] < w[1]), "{:?}", out.times());
        assert_eq!(out.len(), 5);
        assert_eq!(out.times().len(), out.values().len());
        assert_close(out.values(), &[0.8, 0.3, 0.6, 0.3, 0.3]);
    }

    #[test]
    fn normalize_filters_each_column_then_truncates() {
        let series = normalize(&raw(json!({
            "times": [1, "x", 2, null, 3, 4],
            "avgs": [0.5, 1.5, {"v": 1}, -0.2],
            "worst15": [],
            "extra": "ignored",
        })));
        assert_eq!(series.times(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.values(), &[0.5, 1.0, 0.0]);
    }

    #[test]
    fn normalized_values_stay_in_unit_range() {
        let series = Series::from_columns(&[0.0, 1.0, 2.0, 3.0], &[-3.0, 0.25, 7.5, f64::NAN]);
        assert_eq!(series.len(), 3);
        assert!(series.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn missing_or_non_array_fields_give_empty_series() {
        assert!(normalize(&raw(json!({"avgs": [0.1, 0.2]}))).is_empty());
        assert!(normalize(&raw(json!({"times": "1,2", "avgs": [0.1]}))).is_empty());
        assert!(normalize(&raw(json!({}))).is_empty());
        assert!(aggregate(&Series::default()).is_empty());
    }

    #[test]
    fn short_series_is_not_smoothed() {
        let input = agg(&[1.0, 2.0, 3.0, 4.0], &[0.1, 0.9, 0.1, 0.9]);
        assert_eq!(smooth(&input, &SmoothingParams::default()), input);
    }

    #[test]
    fn step_is_ramped_by_triangular_average() {
        let input = agg(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[0.2, 0.2, 0.2, 0.8, 0.8, 0.8]);
        let out = smooth(&input, &SmoothingParams::default());
        assert_eq!(out.times(), input.times());
        assert_close(out.values(), &[0.2, 0.2, 0.4, 0.6, 0.8, 0.8]);
    }

    #[test]
    fn prominent_spike_survives_smoothing() {
        let input = agg(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[0.5, 0.5, 0.5, 0.9, 0.5, 0.5, 0.5],
        );
        let out = smooth(&input, &SmoothingParams::default());
        assert_close(out.values(), &[0.5, 0.5, 0.5, 0.9, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn small_wiggle_is_smoothed_away() {
        let input = agg(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[0.5, 0.5, 0.5, 0.53, 0.5, 0.5, 0.5],
        );
        let out = smooth(&input, &SmoothingParams::default());
        assert_close(out.values(), &[0.5; 7]);
    }

    #[test]
    fn prominence_threshold_is_tunable() {
        let input = agg(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[0.5, 0.5, 0.5, 0.53, 0.5, 0.5, 0.5],
        );
        let params = SmoothingParams { prominence_threshold: 0.01, ..Default::default() };
        assert!((smooth(&input, &params).values()[3] - 0.53).abs() < 1e-12);
    }

    #[test]
    fn smoothing_is_not_idempotent() {
        let input = agg(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[0.2, 0.2, 0.2, 0.8, 0.8, 0.8]);
        let params = SmoothingParams::default();
        let once = smooth(&input, &params);
        let twice = smooth(&once, &params);
        assert_eq!(twice.len(), once.len());
        assert!((twice.values()[2] - 3.8 / 9.0).abs() < 1e-9);
        assert_ne!(once, twice);
    }

    #[test]
    fn value_near_picks_closest_sample() {
        let series = agg(&[0.0, 2.0, 4.0], &[0.1, 0.5, 0.9]);
        assert_eq!(series.value_near(-1.0), Some(0.1));
        assert_eq!(series.value_near(1.2), Some(0.5));
        assert_eq!(series.value_near(3.9), Some(0.9));
        assert_eq!(series.value_near(10.0), Some(0.9));
        assert_eq!(series.value_near(f64::NAN), None);
    }
}
