//! Startup configuration.
//!
//! Values come from an optional `vnl-explorer.json` in the working directory;
//! `VNL_EXPLORER_DATA` overrides the data path. Anything missing falls back
//! to the defaults below.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "vnl-explorer.json";
pub const DATA_PATH_ENV: &str = "VNL_EXPLORER_DATA";

/// Bounds of the "top players" slider.
pub const TOP_N_RANGE: RangeInclusive<usize> = 5..=20;
/// Bounds of the "minimum players per country" slider.
pub const MIN_PLAYERS_RANGE: RangeInclusive<usize> = 1..=10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSV with one row per player.
    pub data_path: PathBuf,
    /// Initial value of the top-attackers slider.
    pub default_top_n: usize,
    /// Initial value of the country threshold slider.
    pub default_min_players: usize,
    /// Columns initially ticked in the correlation panel, by CSV header name.
    pub default_correlation_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("VNL2023.csv"),
            default_top_n: 10,
            default_min_players: 3,
            default_correlation_columns: ["Attack", "Block", "Serve", "Dig"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Config {
    /// Read [`CONFIG_FILE`] if present, then apply the environment override.
    /// A broken config file is logged and ignored.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        let base = if path.exists() {
            match Self::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Ignoring {CONFIG_FILE}: {e:#}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        base.with_env_override(std::env::var_os(DATA_PATH_ENV).map(PathBuf::from))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&text).context("parsing config JSON")?;
        Ok(cfg.clamped())
    }

    fn with_env_override(mut self, data_path: Option<PathBuf>) -> Self {
        if let Some(p) = data_path {
            log::debug!("{DATA_PATH_ENV} overrides data path with {}", p.display());
            self.data_path = p;
        }
        self
    }

    /// Pull slider defaults into the ranges the widgets accept.
    fn clamped(mut self) -> Self {
        let top_n = clamp(self.default_top_n, &TOP_N_RANGE);
        let min_players = clamp(self.default_min_players, &MIN_PLAYERS_RANGE);
        if top_n != self.default_top_n || min_players != self.default_min_players {
            log::warn!(
                "Slider defaults out of range, using top_n={top_n} min_players={min_players}"
            );
        }
        self.default_top_n = top_n;
        self.default_min_players = min_players;
        self
    }
}

fn clamp(value: usize, range: &RangeInclusive<usize>) -> usize {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "data/vnl.csv" }"#).unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/vnl.csv"));
        assert_eq!(cfg.default_top_n, 10);
        assert_eq!(cfg.default_min_players, 3);
        assert_eq!(cfg.default_correlation_columns, vec!["Attack", "Block", "Serve", "Dig"]);
    }

    #[test]
    fn slider_defaults_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "default_top_n": 50, "default_min_players": 0 }"#).unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.default_top_n, 20);
        assert_eq!(cfg.default_min_players, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "datapath": "x.csv" }"#).unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn env_override_replaces_data_path() {
        let cfg = Config::default().with_env_override(Some(PathBuf::from("/tmp/other.csv")));
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/other.csv"));
        assert_eq!(Config::default().with_env_override(None), Config::default());
    }
}
