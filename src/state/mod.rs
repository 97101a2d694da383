pub mod app_settings;
pub mod app_state;
pub mod cursor;
pub mod messages;
pub mod refresher;
pub mod series_cache;
pub mod worker;
