use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::DisplayContext;

pub const DEFAULT_CONFIG_FILE: &str = "pano.toml";
/// Environment variable naming the settings file when no path is given.
pub const CONFIG_PATH_ENV: &str = "PANO_CONFIG";
pub const DEFAULT_DATA_PATH: &str = "data/data.json";
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;

/// Top-level settings (pano.toml + PANO_* env overrides).
///
/// These describe how the board runs, not what it shows; the shown content
/// lives in the persisted document handled by `pano-store`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanoConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayContext,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Location of the persisted board document.
    #[serde(default = "default_data_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between two snapshots in `pano watch`.
    #[serde(default = "default_watch_interval")]
    pub interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
        }
    }
}

fn default_data_path() -> String {
    DEFAULT_DATA_PATH.to_string()
}

fn default_watch_interval() -> u64 {
    DEFAULT_WATCH_INTERVAL_SECS
}

fn default_config_path() -> String {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
}

impl PanoConfig {
    /// Load settings from a TOML file with PANO_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. $PANO_CONFIG
    ///   3. ./pano.toml
    ///
    /// A missing file is not an error; defaults fill every field. Nested keys
    /// use a double underscore in the environment, e.g.
    /// `PANO_STORE__PATH=/srv/pano/data.json`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: PanoConfig = Figment::from(Serialized::defaults(PanoConfig::default()))
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PANO_").split("__"))
            .extract()
            .map_err(|e| crate::error::PanoError::Config(e.to_string()))?;

        tracing::debug!(file = %path, data = %config.store.path, "settings loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = PanoConfig::load(path.to_str()).unwrap();
        assert_eq!(config.store.path, DEFAULT_DATA_PATH);
        assert_eq!(config.watch.interval_secs, DEFAULT_WATCH_INTERVAL_SECS);
        assert_eq!(config.display.outside_label, "Ders Dışı");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pano.toml");
        std::fs::write(
            &path,
            r#"
[store]
path = "/srv/board/data.json"

[display]
outside_label = "Off hours"
lesson_markers = ["Lesson", "Study"]
"#,
        )
        .unwrap();

        let config = PanoConfig::load(path.to_str()).unwrap();
        assert_eq!(config.store.path, "/srv/board/data.json");
        assert_eq!(config.display.outside_label, "Off hours");
        assert!(config.display.is_teaching("3. Lesson"));
        // untouched sections keep their defaults
        assert_eq!(config.display.day_names.len(), 7);
        assert_eq!(config.watch.interval_secs, DEFAULT_WATCH_INTERVAL_SECS);
    }

    #[test]
    fn config_env_var_names_the_file_when_no_path_given() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiosk.toml");
        std::fs::write(&path, "[watch]\ninterval_secs = 15\n").unwrap();

        // the only test that touches this variable
        std::env::set_var(CONFIG_PATH_ENV, &path);
        let config = PanoConfig::load(None);
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(config.unwrap().watch.interval_secs, 15);
    }
}
