//! Export file wire shape: what the sentiment scraper writes per game.
//! Every field is loose JSON; [`RawExport::validate`] turns it into a
//! [`GameExport`], degrading bad shapes to empty data instead of failing.
use crate::{Comment, GameExport, series};
use serde::Deserialize;
use serde_json::Value;

pub const WORST_LIMIT: usize = 15;
pub const BEST_LIMIT: usize = 5;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RawExport {
    #[serde(default)]
    pub times: Option<Value>,
    #[serde(default)]
    pub avgs: Option<Value>,
    /// `[comment, sentiment, minute]` triples, most negative first.
    #[serde(default)]
    pub worst15: Option<Value>,
    /// `[comment, sentiment, minute]` triples, most positive last.
    #[serde(default)]
    pub best5: Option<Value>,
}

impl RawExport {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn validate(&self, key: &str) -> GameExport {
        GameExport {
            key: key.to_string(),
            series: series::normalize(self),
            worst: parse_comments(self.worst15.as_ref(), WORST_LIMIT),
            best: parse_comments(self.best5.as_ref(), BEST_LIMIT),
        }
    }
}

fn parse_comments(value: Option<&Value>, limit: usize) -> Vec<Comment> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items.iter().filter_map(parse_comment).take(limit).collect()
}

fn parse_comment(value: &Value) -> Option<Comment> {
    let [text, score, minute, ..] = value.as_array()?.as_slice() else {
        return None;
    };
    Some(Comment {
        text: text.as_str()?.to_string(),
        score: score.as_f64()?,
        minute: minute.as_f64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_triples_are_validated_and_capped() {
        let raw = RawExport::from_json(
            r#"{
                "times": [1, 2], "avgs": [0.1, 0.2],
                "best5": [["a", 0.9, 1.5], ["b", 0.8], [3, 0.7, 2], ["c", 0.95, 4, "extra"],
                          ["d", 0.9, 5], ["e", 0.9, 6], ["f", 0.9, 7], ["g", 0.9, 8]],
                "worst15": "nope"
            }"#,
        )
        .expect("valid json");
        let export = raw.validate("x.json");
        let texts: Vec<&str> = export.best.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c", "d", "e", "f"]);
        assert_eq!(export.best[0].minute, 1.5);
        assert!(export.worst.is_empty());
        assert_eq!(export.series.len(), 2);
        assert_eq!(export.key, "x.json");
    }

    #[test]
    fn unknown_fields_and_nulls_are_tolerated() {
        let raw = RawExport::from_json(r#"{"times": null, "window_size": 120}"#).expect("valid json");
        let export = raw.validate("y.json");
        assert!(export.is_empty());
        assert!(export.time_range().is_none());
    }
}
