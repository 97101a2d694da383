use crate::Comment;

/// Comments within this many minutes of the cursor time are shown.
pub const COMMENT_WINDOW_MINUTES: f64 = 2.0;

/// Whether `comment` falls inside the cursor window around `time`.
/// Non-finite or negative comment times never match.
pub fn is_near(comment: &Comment, time: f64) -> bool {
    let minute = comment.minute;
    if !minute.is_finite() || minute < 0.0 || !time.is_finite() {
        return false;
    }
    (minute - time).abs() <= COMMENT_WINDOW_MINUTES
}

/// Narrow `comments` to those near `time`. No time (or a NaN one) keeps all.
pub fn filter_comments(comments: &[Comment], time: Option<f64>) -> Vec<&Comment> {
    match time {
        Some(t) if !t.is_nan() => comments.iter().filter(|c| is_near(c, t)).collect(),
        _ => comments.iter().collect(),
    }
}

/// Game minute as `m:ss`. Negative and non-finite minutes render as "0:00".
pub fn format_minute(minute: f64) -> String {
    if !minute.is_finite() || minute < 0.0 {
        return "0:00".to_string();
    }
    let mut whole = minute.floor() as u64;
    let mut secs = ((minute - minute.floor()) * 60.0).round() as u64;
    if secs == 60 {
        whole += 1;
        secs = 0;
    }
    format!("{whole}:{secs:02}")
}
