use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "events";
pub const DEFAULT_CONFIG_FILE: &str = "datebook.toml";

/// Palette the event form offers and the grid falls back to; the first entry
/// is the default color for untagged events.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#3b82f6", // blue
    "#8b5cf6", // purple
    "#ec4899", // pink
    "#f97316", // orange
    "#22c55e", // green
    "#ef4444", // red
];

/// Explicit configuration for the store and grid. Multiple independent
/// instances (e.g. one per test) get their own storage key and palette
/// instead of sharing file-scoped constants.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_key: String,
    pub palette: Vec<String>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    storage_key: Option<String>,
    palette: Option<Vec<String>>,
    data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from `datebook.toml`, falling back to defaults
    /// when the file is absent. An explicit override path must exist.
    #[tracing::instrument(skip(config_override))]
    pub fn load(config_override: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = Config::default();

        let Some(path) = resolve_config_path(config_override) else {
            warn!("no config file found; using defaults");
            return Ok(cfg);
        };

        info!(config = %path.display(), "loading config file");
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if let Some(key) = file.storage_key {
            cfg.storage_key = key;
        }
        if let Some(palette) = file.palette
            && !palette.is_empty()
        {
            cfg.palette = palette;
        }
        if let Some(dir) = file.data_dir {
            cfg.data_dir = Some(dir);
        }

        debug!(storage_key = %cfg.storage_key, palette_len = cfg.palette.len(), "config loaded");
        Ok(cfg)
    }

    /// The color assigned to events with no tag: the first palette entry.
    pub fn default_color(&self) -> &str {
        self.palette.first().map(String::as_str).unwrap_or(DEFAULT_PALETTE[0])
    }
}

fn resolve_config_path(config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }

    let candidate = std::env::current_dir().ok()?.join(DEFAULT_CONFIG_FILE);
    candidate.exists().then_some(candidate)
}

/// Resolves the backing-store directory: explicit override, then the config
/// value, then the platform data directory. Creates it when missing.
pub fn resolve_data_dir(cfg: &Config, override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let dir = if let Some(path) = override_dir {
        path.to_path_buf()
    } else if let Some(cfg_dir) = &cfg.data_dir {
        cfg_dir.clone()
    } else {
        default_data_dir()?
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(dir)
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine platform data directory")?;
    Ok(base.join("datebook"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{Config, DEFAULT_PALETTE, DEFAULT_STORAGE_KEY, resolve_data_dir};

    #[test]
    fn defaults_without_config_file() {
        let cfg = Config::default();
        assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(cfg.palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(cfg.default_color(), "#3b82f6");
    }

    #[test]
    fn config_file_overrides_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("datebook.toml");
        fs::write(
            &path,
            "storage_key = \"scratch\"\npalette = [\"#111111\", \"#222222\"]\n",
        )
        .expect("write config");

        let cfg = Config::load(Some(&path)).expect("load config");
        assert_eq!(cfg.storage_key, "scratch");
        assert_eq!(cfg.palette, vec!["#111111", "#222222"]);
        assert_eq!(cfg.default_color(), "#111111");
    }

    #[test]
    fn data_dir_override_wins_and_is_created() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("nested").join("store");

        let cfg = Config::default();
        let dir = resolve_data_dir(&cfg, Some(&target)).expect("resolve data dir");
        assert_eq!(dir, target);
        assert!(dir.exists());
    }
}
