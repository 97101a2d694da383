//! Static mock catalog shown until a live sentiment service is wired in.

use crate::{
    BetRecommendation, BettingOdds, CommunityPost, ConfidenceFactor, FanSentiment, GameStatus,
    KeyMetric, Lean, LiveGame, Matchup, OddsPoint, Platform, Tone, TrendPoint,
};

pub static MATCHUPS: &[Matchup] = &[
    Matchup {
        id: "1",
        home: "Cincinnati",
        away: "Kansas",
        date: "Nov 22, 2024",
        kickoff: "6:00 PM EST",
        week: "Week 13",
        venue: "Nippert Stadium",
        status: GameStatus::Completed,
        export_key: "cincinativskansas.json",
    },
    Matchup {
        id: "2",
        home: "Duke",
        away: "Syracuse",
        date: "Nov 22, 2024",
        kickoff: "2:00 PM EST",
        week: "Week 13",
        venue: "Wallace Wade Stadium",
        status: GameStatus::Completed,
        export_key: "dukevsyracuse.json",
    },
    Matchup {
        id: "3",
        home: "FSU",
        away: "Virginia",
        date: "Nov 22, 2024",
        kickoff: "1:00 PM EST",
        week: "Week 13",
        venue: "Doak Campbell Stadium",
        status: GameStatus::Completed,
        export_key: "fsuvsvirginia.json",
    },
    Matchup {
        id: "4",
        home: "Louisville",
        away: "Pittsburgh",
        date: "Nov 23, 2024",
        kickoff: "3:30 PM EST",
        week: "Week 13",
        venue: "Cardinal Stadium",
        status: GameStatus::Completed,
        export_key: "louisvillevspittsburgh.json",
    },
    Matchup {
        id: "5",
        home: "LSU",
        away: "Ole Miss",
        date: "Nov 23, 2024",
        kickoff: "7:00 PM EST",
        week: "Week 13",
        venue: "Tiger Stadium",
        status: GameStatus::Completed,
        export_key: "lsuvolemiss.json",
    },
    Matchup {
        id: "6",
        home: "Notre Dame",
        away: "Arkansas",
        date: "Nov 23, 2024",
        kickoff: "12:00 PM EST",
        week: "Week 13",
        venue: "Notre Dame Stadium",
        status: GameStatus::Completed,
        export_key: "notredamevsarkansas.json",
    },
    Matchup {
        id: "7",
        home: "Syracuse",
        away: "Clemson",
        date: "Nov 23, 2024",
        kickoff: "4:30 PM EST",
        week: "Week 13",
        venue: "Carrier Dome",
        status: GameStatus::Completed,
        export_key: "syracusevsclemson.json",
    },
    Matchup {
        id: "8",
        home: "UCLA",
        away: "Northwestern",
        date: "Nov 22, 2024",
        kickoff: "8:00 PM EST",
        week: "Week 13",
        venue: "Rose Bowl",
        status: GameStatus::Completed,
        export_key: "uclavsnorthwestern.json",
    },
    Matchup {
        id: "9",
        home: "USC",
        away: "Illinois",
        date: "Nov 23, 2024",
        kickoff: "5:00 PM EST",
        week: "Week 13",
        venue: "Los Angeles Memorial Coliseum",
        status: GameStatus::Completed,
        export_key: "uscvillinois.json",
    },
    Matchup {
        id: "10",
        home: "Utah",
        away: "Vanderbilt",
        date: "Nov 23, 2024",
        kickoff: "6:30 PM EST",
        week: "Week 13",
        venue: "Rice-Eccles Stadium",
        status: GameStatus::Completed,
        export_key: "utahvsvandy.json",
    },
];

pub static LIVE_GAMES: &[LiveGame] = &[
    LiveGame {
        id: "1",
        home: "Alabama",
        away: "Georgia",
        score: "21-17",
        sentiment: 78,
        status: GameStatus::Live,
    },
    LiveGame {
        id: "2",
        home: "Ohio State",
        away: "Michigan",
        score: "14-10",
        sentiment: -34,
        status: GameStatus::Live,
    },
    LiveGame {
        id: "3",
        home: "Texas",
        away: "Oklahoma",
        score: "vs",
        sentiment: 45,
        status: GameStatus::Upcoming,
    },
];

pub static COMMUNITY_POSTS: &[CommunityPost] = &[
    CommunityPost {
        id: "1",
        platform: Platform::Twitter,
        content: "ROLL TIDE! What a touchdown pass! Alabama looking unstoppable tonight!",
        engagement: 23847,
        age: "3m ago",
        sentiment: 89,
    },
    CommunityPost {
        id: "2",
        platform: Platform::Reddit,
        content: "These refs are absolutely blind! Worst call I've seen all season. Michigan got robbed!",
        engagement: 18293,
        age: "7m ago",
        sentiment: -76,
    },
    CommunityPost {
        id: "3",
        platform: Platform::Instagram,
        content: "The crowd at Memorial Stadium is ELECTRIC! Best college football atmosphere in the country!",
        engagement: 12556,
        age: "12m ago",
        sentiment: 82,
    },
];

pub static RECOMMENDATIONS: &[BetRecommendation] = &[
    BetRecommendation {
        game_id: "1",
        matchup: "Georgia @ Alabama",
        total: 52.5,
        lean: Lean::Over,
        confidence: 87,
        reasoning: "Strong fan bullish sentiment (68%) aligns with ESPN positive coverage.",
        expected_value: 0.12,
        fan_sentiment: FanSentiment { bullish: 68, bearish: 22, neutral: 10, total_posts: 2847 },
    },
    BetRecommendation {
        game_id: "2",
        matchup: "Penn State @ Ohio State",
        total: 48.5,
        lean: Lean::Under,
        confidence: 65,
        reasoning: "Mixed fan sentiment but ESPN leans under. Defensive matchup expected.",
        expected_value: 0.08,
        fan_sentiment: FanSentiment { bullish: 45, bearish: 38, neutral: 17, total_posts: 1923 },
    },
    BetRecommendation {
        game_id: "3",
        matchup: "Florida State @ Clemson",
        total: 55.5,
        lean: Lean::Over,
        confidence: 92,
        reasoning: "Extremely bullish fan sentiment (72%) + positive ESPN tone.",
        expected_value: 0.18,
        fan_sentiment: FanSentiment { bullish: 72, bearish: 18, neutral: 10, total_posts: 3421 },
    },
    BetRecommendation {
        game_id: "4",
        matchup: "Oklahoma @ Texas",
        total: 44.5,
        lean: Lean::Under,
        confidence: 78,
        reasoning: "Strong bearish fan sentiment (52%) supported by negative ESPN commentary.",
        expected_value: 0.11,
        fan_sentiment: FanSentiment { bullish: 35, bearish: 52, neutral: 13, total_posts: 1654 },
    },
    BetRecommendation {
        game_id: "5",
        matchup: "USC @ Michigan",
        total: 51.0,
        lean: Lean::Over,
        confidence: 71,
        reasoning: "Moderate bullish fan sentiment with positive ESPN lean suggests scoring potential.",
        expected_value: 0.09,
        fan_sentiment: FanSentiment { bullish: 58, bearish: 28, neutral: 14, total_posts: 2156 },
    },
];

pub static KEY_METRICS: &[KeyMetric] = &[
    KeyMetric { label: "Average Positive Sentiment", value: "+67%", tone: Tone::Positive },
    KeyMetric { label: "Peak Negative Sentiment", value: "-89%", tone: Tone::Negative },
    KeyMetric { label: "Sentiment Volatility", value: "High", tone: Tone::Warning },
];

pub static SENTIMENT_TREND: &[TrendPoint] = &[
    TrendPoint { hour: "09:00", sentiment: 15, confidence: 75 },
    TrendPoint { hour: "10:00", sentiment: 28, confidence: 82 },
    TrendPoint { hour: "11:00", sentiment: 45, confidence: 88 },
    TrendPoint { hour: "12:00", sentiment: 38, confidence: 79 },
    TrendPoint { hour: "13:00", sentiment: 52, confidence: 91 },
    TrendPoint { hour: "14:00", sentiment: 41, confidence: 85 },
];

/// Current lines for the recommendation games, keyed by `game_id`.
pub static ODDS: &[BettingOdds] = &[
    BettingOdds {
        game_id: "1",
        over_under: 52.5,
        over_odds: -110,
        under_odds: -110,
        sportsbook: "DraftKings",
        last_updated: "2025-09-27 14:30 UTC",
    },
    BettingOdds {
        game_id: "2",
        over_under: 48.5,
        over_odds: -105,
        under_odds: -115,
        sportsbook: "FanDuel",
        last_updated: "2025-09-27 14:25 UTC",
    },
    BettingOdds {
        game_id: "3",
        over_under: 55.5,
        over_odds: -112,
        under_odds: -108,
        sportsbook: "BetMGM",
        last_updated: "2025-09-27 14:45 UTC",
    },
    BettingOdds {
        game_id: "4",
        over_under: 44.5,
        over_odds: -110,
        under_odds: -110,
        sportsbook: "Caesars",
        last_updated: "2025-09-27 14:20 UTC",
    },
    BettingOdds {
        game_id: "5",
        over_under: 51.0,
        over_odds: -108,
        under_odds: -112,
        sportsbook: "DraftKings",
        last_updated: "2025-09-27 14:35 UTC",
    },
];

/// Hourly over/under line movement.
pub static ODDS_MOVEMENT: &[OddsPoint] = &[
    OddsPoint { hour: "09:00", over_under: 52.5, over_odds: -110, under_odds: -110 },
    OddsPoint { hour: "10:00", over_under: 53.0, over_odds: -108, under_odds: -112 },
    OddsPoint { hour: "11:00", over_under: 53.5, over_odds: -105, under_odds: -115 },
    OddsPoint { hour: "12:00", over_under: 53.0, over_odds: -110, under_odds: -110 },
    OddsPoint { hour: "13:00", over_under: 54.0, over_odds: -115, under_odds: -105 },
    OddsPoint { hour: "14:00", over_under: 53.5, over_odds: -110, under_odds: -110 },
];

pub static CONFIDENCE_FACTORS: &[ConfidenceFactor] = &[
    ConfidenceFactor { category: "AI Model Confidence", confidence: 87, color: "#2196f3" },
    ConfidenceFactor { category: "Fan Sentiment Reliability", confidence: 72, color: "#ff9800" },
    ConfidenceFactor { category: "Historical Pattern Match", confidence: 94, color: "#4caf50" },
    ConfidenceFactor { category: "Weather Impact Factor", confidence: 65, color: "#9c27b0" },
    ConfidenceFactor { category: "Injury Report Influence", confidence: 78, color: "#f44336" },
];

/// Hex team colors used to tint matchup rows.
pub static TEAM_COLORS: &[(&str, &str)] = &[
    ("Clemson", "#F56600"),
    ("Syracuse", "#F76900"),
    ("Kansas", "#0051ba"),
    ("Cincinnati", "#e00122"),
    ("Pittsburgh", "#003594"),
    ("Louisville", "#AD0000"),
    ("Duke", "#012169"),
    ("Arkansas", "#9D2235"),
    ("Notre Dame", "#ae9142"),
    ("Vanderbilt", "#CFAE70"),
    ("Utah", "#CC0000"),
    ("LSU", "#461D7C"),
    ("Ole Miss", "#CE1126"),
    ("Northwestern", "#4E2A84"),
    ("UCLA", "#2774AE"),
    ("Illinois", "#FF5F05"),
    ("USC", "#990000"),
    ("Virginia", "#E57200"),
    ("FSU", "#782F40"),
];

pub fn team_color(team: &str) -> Option<&'static str> {
    TEAM_COLORS.iter().find(|(name, _)| *name == team).map(|(_, hex)| *hex)
}

pub fn odds_for(game_id: &str) -> Option<&'static BettingOdds> {
    ODDS.iter().find(|o| o.game_id == game_id)
}

pub fn find_matchup(id: &str) -> Option<&'static Matchup> {
    MATCHUPS.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matchup_ids_are_unique() {
        let mut ids: Vec<&str> = MATCHUPS.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MATCHUPS.len());
    }

    #[test]
    fn fan_sentiment_splits_sum_to_one_hundred() {
        for rec in RECOMMENDATIONS {
            let s = rec.fan_sentiment;
            assert_eq!(u16::from(s.bullish) + u16::from(s.bearish) + u16::from(s.neutral), 100, "{}", rec.game_id);
        }
    }

    #[test]
    fn every_recommendation_has_posted_odds() {
        for rec in RECOMMENDATIONS {
            let odds = odds_for(rec.game_id).expect("odds for recommendation");
            assert_eq!(odds.over_under, rec.total, "{}", rec.game_id);
        }
        assert!(odds_for("99").is_none());
    }

    #[test]
    fn team_color_lookup() {
        assert_eq!(team_color("LSU"), Some("#461D7C"));
        assert_eq!(team_color("Nowhere State"), None);
        assert_eq!(find_matchup("5").map(|m| m.export_key), Some("lsuvolemiss.json"));
    }
}
