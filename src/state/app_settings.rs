use crate::components::video::VideoCapability;
use cfb_data::SmoothingParams;
use cfb_data::store::EXPORTS_DIR_ENV;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub exports_dir: Option<PathBuf>,
    pub dark_theme: bool,
    pub smoothing: SmoothingParams,
    pub smoothing_enabled: bool,
    /// Forced video capability; `None` means detect at startup.
    pub video: Option<VideoCapability>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            exports_dir: None,
            dark_theme: true,
            smoothing: SmoothingParams::default(),
            smoothing_enabled: true,
            video: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a `CFBTUI_*` variable lookup. Unparseable values
    /// fall back to the default for that field.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        settings.exports_dir = get(EXPORTS_DIR_ENV).map(PathBuf::from);
        if let Some(theme) = get("CFBTUI_THEME") {
            settings.dark_theme = !theme.eq_ignore_ascii_case("light");
        }
        settings.log_level = get("CFBTUI_LOG_LEVEL").and_then(|v| LevelFilter::from_str(&v).ok());
        if let Some(threshold) = get("CFBTUI_PROMINENCE").and_then(|v| v.parse::<f64>().ok())
            && threshold.is_finite()
            && threshold >= 0.0
        {
            settings.smoothing.prominence_threshold = threshold;
        }
        if let Some(raw) = get("CFBTUI_RAW") {
            settings.smoothing_enabled = !matches!(raw.as_str(), "1" | "true" | "yes");
        }
        settings.video = get("CFBTUI_VIDEO").and_then(|v| VideoCapability::parse(&v));

        settings
    }
}
