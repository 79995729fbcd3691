//! Data-path and logging configuration.

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::constants::MAP_FAN_TYPE_MAX;

pub const ENV_BASICDAT_DIR: &str = "EGO_BASICDAT_DIR";
pub const ENV_LOG_LEVEL: &str = "EGO_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "EGO_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDataConfig {
    pub basicdat_dir: PathBuf,
    pub fans_file: String,
    pub scancode_file: String,
    pub controls_file: String,
    /// Caller cap on the tile dictionary size.
    pub max_tile_defs: usize,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for GameDataConfig {
    fn default() -> Self {
        Self {
            basicdat_dir: PathBuf::from("basicdat"),
            fans_file: "fans.txt".to_string(),
            scancode_file: "scancode.txt".to_string(),
            controls_file: "controls.txt".to_string(),
            max_tile_defs: MAP_FAN_TYPE_MAX,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

pub fn parse_log_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

impl GameDataConfig {
    /// Reads a JSON config. A missing or malformed file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!(
                    "Failed to read config {}: {err}, using defaults",
                    path.display()
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<GameDataConfig>(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "Failed to parse config {}: {err}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        use anyhow::Context;

        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Applies overrides from `lookup`, which maps an environment key to its
    /// value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_BASICDAT_DIR) {
            self.basicdat_dir = PathBuf::from(dir.trim());
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            if parse_log_level(&level).is_some() {
                self.log_level = level.trim().to_string();
            } else {
                log::warn!("Ignoring unknown {ENV_LOG_LEVEL} value '{level}'");
            }
        }

        if let Some(file) = lookup(ENV_LOG_FILE) {
            let trimmed = file.trim();
            self.log_file = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
    }

    /// Applies the process environment, after loading `.env` when present.
    pub fn apply_process_env(&mut self) {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                log::warn!("Failed to load .env: {err}");
            }
        }
        self.apply_env(|key| std::env::var(key).ok());
    }

    pub fn level_filter(&self) -> LevelFilter {
        parse_log_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn fans_path(&self) -> PathBuf {
        self.basicdat_dir.join(&self.fans_file)
    }

    pub fn scancode_path(&self) -> PathBuf {
        self.basicdat_dir.join(&self.scancode_file)
    }

    pub fn controls_path(&self) -> PathBuf {
        self.basicdat_dir.join(&self.controls_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASICDAT_DIR, "/data/basicdat"),
            (ENV_LOG_LEVEL, "DEBUG"),
            (ENV_LOG_FILE, "none"),
        ]
        .into_iter()
        .collect();

        let mut config = GameDataConfig {
            log_file: Some("ego.log".to_string()),
            ..Default::default()
        };
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.fans_path(), PathBuf::from("/data/basicdat/fans.txt"));
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn bad_level_is_ignored() {
        let mut config = GameDataConfig::default();
        config.apply_env(|key| (key == ENV_LOG_LEVEL).then(|| "loud".to_string()));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "max_tile_defs": 32 }"#).unwrap();

        let config = GameDataConfig::load(&path);
        assert_eq!(config.max_tile_defs, 32);
        assert_eq!(config.controls_file, "controls.txt");
    }

    #[test]
    fn malformed_json_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(GameDataConfig::load(&path), GameDataConfig::default());

        assert_eq!(
            GameDataConfig::load(dir.path().join("missing.json")),
            GameDataConfig::default()
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = GameDataConfig {
            log_file: Some("ego.log".to_string()),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(GameDataConfig::load(&path), config);
    }
}
