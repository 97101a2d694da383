pub mod catalog;
pub mod comments;
pub mod export;
pub mod series;
pub mod store;

pub use comments::{COMMENT_WINDOW_MINUTES, filter_comments, format_minute};
pub use series::{AggregatedSeries, Series, SmoothingParams, aggregate, normalize, smooth};
pub use store::{DataError, DataResult, DatasetStore};

// ---------------------------------------------------------------------------
// Domain types, independent of the export JSON shape
// ---------------------------------------------------------------------------

/// A single fan comment pulled from the export: text, sentiment score in
/// [0,1], and the game minute it was posted at.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comment {
    pub text: String,
    pub score: f64,
    pub minute: f64,
}

/// A validated per-game export. Built once at load time; the series is
/// already normalized (equal lengths, values clamped to [0,1]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameExport {
    pub key: String,
    pub series: Series,
    pub worst: Vec<Comment>,
    pub best: Vec<Comment>,
}

impl GameExport {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// (min, max) of the export's time axis, in minutes.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.series.time_range()
    }

    /// (min, max) of the normalized sentiment values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series.value_range()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Upcoming => "UPCOMING",
            GameStatus::Live => "LIVE",
            GameStatus::Completed => "FINAL",
        }
    }
}

/// Entry in the game selection list. `export_key` names the export file
/// (e.g. "lsuvolemiss.json") holding the game's sentiment series.
#[derive(Debug, Clone, Default)]
pub struct Matchup {
    pub id: &'static str,
    pub home: &'static str,
    pub away: &'static str,
    pub date: &'static str,
    pub kickoff: &'static str,
    pub week: &'static str,
    pub venue: &'static str,
    pub status: GameStatus,
    pub export_key: &'static str,
}

impl Matchup {
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }
}

/// Dashboard card for a live or upcoming game.
#[derive(Debug, Clone, Default)]
pub struct LiveGame {
    pub id: &'static str,
    pub home: &'static str,
    pub away: &'static str,
    pub score: &'static str,
    /// Fan sentiment in [-100, 100].
    pub sentiment: i8,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Twitter,
    Reddit,
    Facebook,
    Instagram,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Reddit => "Reddit",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommunityPost {
    pub id: &'static str,
    pub platform: Platform,
    pub content: &'static str,
    pub engagement: u32,
    pub age: &'static str,
    /// Post sentiment in [-100, 100].
    pub sentiment: i8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FanSentiment {
    pub bullish: u8,
    pub bearish: u8,
    pub neutral: u8,
    pub total_posts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Over,
    Under,
    NoBet,
}

impl Lean {
    pub fn label(&self) -> &'static str {
        match self {
            Lean::Over => "OVER",
            Lean::Under => "UNDER",
            Lean::NoBet => "NO BET",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BetRecommendation {
    pub game_id: &'static str,
    pub matchup: &'static str,
    pub total: f32,
    pub lean: Lean,
    pub confidence: u8,
    pub reasoning: &'static str,
    pub expected_value: f32,
    pub fan_sentiment: FanSentiment,
}

/// Posted over/under line for one game.
#[derive(Debug, Clone)]
pub struct BettingOdds {
    pub game_id: &'static str,
    pub over_under: f32,
    /// American odds, e.g. `-110`.
    pub over_odds: i16,
    pub under_odds: i16,
    pub sportsbook: &'static str,
    pub last_updated: &'static str,
}

/// One hourly snapshot of the over/under line.
#[derive(Debug, Clone, Copy)]
pub struct OddsPoint {
    pub hour: &'static str,
    pub over_under: f32,
    pub over_odds: i16,
    pub under_odds: i16,
}

/// How much one input contributes to the model's confidence.
#[derive(Debug, Clone)]
pub struct ConfidenceFactor {
    pub category: &'static str,
    pub confidence: u8,
    /// Hex color for the factor's bar.
    pub color: &'static str,
}

/// American odds with an explicit sign for positive prices.
pub fn format_american(odds: i16) -> String {
    if odds > 0 { format!("+{odds}") } else { odds.to_string() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
}

#[derive(Debug, Clone)]
pub struct KeyMetric {
    pub label: &'static str,
    pub value: &'static str,
    pub tone: Tone,
}

/// Hourly point of the pre-game sentiment trend.
#[derive(Debug, Clone, Copy)]
pub struct TrendPoint {
    pub hour: &'static str,
    pub sentiment: u8,
    pub confidence: u8,
}

/// Bucket a [-100, 100] sentiment into its display tone.
pub fn sentiment_tone(sentiment: i8) -> Tone {
    if sentiment > 30 {
        Tone::Positive
    } else if sentiment < -30 {
        Tone::Negative
    } else {
        Tone::Warning
    }
}

pub fn sentiment_label(sentiment: i8) -> &'static str {
    match sentiment_tone(sentiment) {
        Tone::Positive => "Positive",
        Tone::Negative => "Negative",
        Tone::Warning => "Neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn american_odds_carry_sign() {
        assert_eq!(format_american(-110), "-110");
        assert_eq!(format_american(150), "+150");
        assert_eq!(format_american(0), "0");
    }

    #[test]
    fn sentiment_buckets_use_thirty_point_cutoffs() {
        assert_eq!(sentiment_label(78), "Positive");
        assert_eq!(sentiment_label(-34), "Negative");
        assert_eq!(sentiment_label(30), "Neutral");
        assert_eq!(sentiment_label(-30), "Neutral");
    }

    #[test]
    fn matchup_title_joins_teams() {
        let m = Matchup { home: "LSU", away: "Ole Miss", ..Default::default() };
        assert_eq!(m.title(), "LSU vs Ole Miss");
    }
}
