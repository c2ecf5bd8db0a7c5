use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::explorer::logic::dataset::DEFAULT_SEED;

/// Environment variable that overrides the synthetic dataset seed.
pub const SEED_ENV_VAR: &str = "EDA_DASHBOARD_SEED";

/// Which dataset the dashboard opens with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Synthetic,
    Upload,
}

/// Application-wide defaults. These are not user selections; selections live
/// in the per-session inputs and are never written to disk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardSettings {
    /// Seed for the synthetic dataset
    pub seed: u64,
    /// Initial sample-count slider value (50..=500)
    pub default_sample_count: usize,
    /// Initial row cap for uploaded previews
    pub default_row_cap: usize,
    /// Upper bound on simultaneously selected columns
    pub max_selected_columns: usize,
    /// Number of leading columns selected by default
    pub default_selected_columns: usize,
    /// Whether logs are also written to rolling files
    pub log_to_file: bool,
    pub start_source: DataSource,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            default_sample_count: 200,
            default_row_cap: 100,
            max_selected_columns: 6,
            default_selected_columns: 4,
            log_to_file: true,
            start_source: DataSource::Synthetic,
        }
    }
}

impl DashboardSettings {
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(_) => tracing::warn!("Ignoring invalid {SEED_ENV_VAR} value: {raw}"),
            }
        }
        self
    }
}

/// Default location: `<config_dir>/eda-dashboard/config.json`.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("eda-dashboard").join("config.json"))
}

fn read_settings(path: &Path) -> Result<DashboardSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Loads settings from `path`, or from the default location when `None`.
///
/// A missing default file yields defaults. An explicitly given file must exist
/// and parse.
///
/// # Errors
///
/// Returns error if an explicit file is missing or any file is malformed.
pub fn load_settings(path: Option<&Path>) -> Result<DashboardSettings> {
    let settings = match path {
        Some(p) => read_settings(p)?,
        None => match get_config_path() {
            Some(p) if p.exists() => read_settings(&p)?,
            _ => DashboardSettings::default(),
        },
    };
    Ok(settings.apply_env_overrides())
}

/// Writes settings as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns error if the directory or file cannot be written.
pub fn save_settings(settings: &DashboardSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_round_trip_through_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("config.json");
        let settings = DashboardSettings {
            default_sample_count: 300,
            start_source: DataSource::Upload,
            ..Default::default()
        };
        save_settings(&settings, &path)?;
        let loaded = read_settings(&path)?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "default_row_cap": 50 }"#)?;
        let loaded = read_settings(&path)?;
        assert_eq!(loaded.default_row_cap, 50);
        assert_eq!(loaded.max_selected_columns, 6);
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let missing = std::env::temp_dir().join("eda-dashboard-missing-config.json");
        let result = load_settings(Some(&missing));
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_malformed_file_is_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json")?;
        assert!(read_settings(&path).is_err());
        Ok(())
    }
}
