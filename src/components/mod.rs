pub mod sentiment_chart;
pub mod video;
