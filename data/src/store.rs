use crate::GameExport;
use crate::export::RawExport;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

pub type DataResult<T> = Result<T, DataError>;

pub const EXPORTS_DIR_ENV: &str = "CFBTUI_EXPORTS_DIR";

/// Exports compiled into the binary so the dashboard works offline.
const EMBEDDED_EXPORTS: &[(&str, &str)] = &[
    ("dukevsyracuse.json", include_str!("../exports/dukevsyracuse.json")),
    ("lsuvolemiss.json", include_str!("../exports/lsuvolemiss.json")),
    ("notredamevsarkansas.json", include_str!("../exports/notredamevsarkansas.json")),
    ("uclavsnorthwestern.json", include_str!("../exports/uclavsnorthwestern.json")),
    ("utahvsvandy.json", include_str!("../exports/utahvsvandy.json")),
];

#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error, String),
    Parse(serde_json::Error, String),
    NotFound(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
            DataError::Parse(e, source) => write!(f, "Invalid export json in {source}: {e}"),
            DataError::NotFound(key) => write!(f, "No export found for {key}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e, _) => Some(e),
            DataError::Parse(e, _) => Some(e),
            DataError::NotFound(_) => None,
        }
    }
}

/// Lookup of per-game exports by file name.
///
/// Resolution order for a key:
/// 1) `<exports_dir>/<key>` when an exports directory is configured and the file exists.
/// 2) The embedded export of the same name.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    exports_dir: Option<PathBuf>,
}

impl DatasetStore {
    pub fn new(exports_dir: Option<PathBuf>) -> Self {
        Self { exports_dir }
    }

    /// Store honoring `CFBTUI_EXPORTS_DIR`.
    pub fn from_env() -> Self {
        let dir = std::env::var(EXPORTS_DIR_ENV)
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        Self::new(dir)
    }

    pub fn exports_dir(&self) -> Option<&Path> {
        self.exports_dir.as_deref()
    }

    /// Every key this store can resolve, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = EMBEDDED_EXPORTS.iter().map(|(k, _)| k.to_string()).collect();
        if let Some(dir) = &self.exports_dir
            && let Ok(entries) = std::fs::read_dir(dir)
        {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json")
                    && let Some(name) = path.file_name().and_then(|n| n.to_str())
                {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        keys.dedup();
        keys
    }

    pub fn contains(&self, key: &str) -> bool {
        is_plain_file_name(key) && (self.override_path(key).is_some() || embedded(key).is_some())
    }

    pub fn load_raw(&self, key: &str) -> DataResult<RawExport> {
        if !is_plain_file_name(key) {
            return Err(DataError::NotFound(key.to_string()));
        }

        if let Some(path) = self.override_path(key) {
            let source = path.display().to_string();
            debug!("loading export {key} from {source}");
            let content =
                std::fs::read_to_string(&path).map_err(|e| DataError::Io(e, source.clone()))?;
            return RawExport::from_json(&content).map_err(|e| DataError::Parse(e, source));
        }

        let content = embedded(key).ok_or_else(|| DataError::NotFound(key.to_string()))?;
        debug!("loading embedded export {key}");
        RawExport::from_json(content).map_err(|e| DataError::Parse(e, format!("embedded {key}")))
    }

    /// Load and validate an export. Shape problems inside valid JSON yield
    /// empty data rather than an error.
    pub fn load(&self, key: &str) -> DataResult<GameExport> {
        Ok(self.load_raw(key)?.validate(key))
    }

    fn override_path(&self, key: &str) -> Option<PathBuf> {
        let path = self.exports_dir.as_ref()?.join(key);
        path.is_file().then_some(path)
    }
}

fn embedded(key: &str) -> Option<&'static str> {
    EMBEDDED_EXPORTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, content)| *content)
}

fn is_plain_file_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['/', '\\']) && key != "." && key != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cfb-data-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn embedded_exports_parse_into_non_empty_series() {
        let store = DatasetStore::default();
        for (key, _) in EMBEDDED_EXPORTS {
            let export = store.load(key).expect("embedded export should load");
            assert!(!export.is_empty(), "{key} has no samples");
            assert!(export.worst.len() <= 15);
            assert!(export.best.len() <= 5);
        }
    }

    #[test]
    fn unknown_key_is_not_found() {
        let store = DatasetStore::default();
        assert!(matches!(store.load("fsuvsvirginia.json"), Err(DataError::NotFound(_))));
        assert!(matches!(store.load("../Cargo.toml"), Err(DataError::NotFound(_))));
        assert!(!store.contains("fsuvsvirginia.json"));
        assert!(store.contains("lsuvolemiss.json"));
    }

    #[test]
    fn exports_dir_overrides_and_extends_embedded() {
        let dir = scratch_dir("override");
        std::fs::write(dir.join("lsuvolemiss.json"), r#"{"times": [1, 1], "avgs": [0.2, 0.4]}"#)
            .expect("write override");
        std::fs::write(dir.join("fsuvsvirginia.json"), r#"{"times": [3], "avgs": [2.0]}"#)
            .expect("write extra");
        std::fs::write(dir.join("notes.txt"), "ignored").expect("write noise");

        let store = DatasetStore::new(Some(dir.clone()));
        assert_eq!(store.load("lsuvolemiss.json").expect("override").series.len(), 2);
        assert_eq!(store.load("fsuvsvirginia.json").expect("extra").series.values(), &[1.0]);
        let keys = store.keys();
        assert!(keys.contains(&"fsuvsvirginia.json".to_string()));
        assert!(!keys.contains(&"notes.txt".to_string()));
        assert_eq!(keys.iter().filter(|k| *k == "lsuvolemiss.json").count(), 1);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = scratch_dir("invalid");
        std::fs::write(dir.join("broken.json"), "{ not json").expect("write broken");
        let store = DatasetStore::new(Some(dir.clone()));
        let err = store.load("broken.json").expect_err("broken json should fail");
        assert!(matches!(err, DataError::Parse(_, _)));
        assert!(err.to_string().contains("broken.json"));
        let _ = std::fs::remove_dir_all(dir);
    }
}
