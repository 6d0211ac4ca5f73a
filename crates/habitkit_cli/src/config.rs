//! Runtime configuration resolved from flags, environment and defaults.
//!
//! # Invariants
//! - `data_dir` and `log_dir` are absolute.
//! - The database file always lives directly under `data_dir`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "habitkit";
const DB_FILE_NAME: &str = "habitkit.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves the data directory: explicit value, else the platform data
    /// dir, else `./.habitkit`.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .map(|base| base.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(".habitkit")),
        };
        let data_dir = absolutize(&data_dir)?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory `{}`", data_dir.display()))?;

        Ok(Self {
            data_dir,
            log_level: log_level
                .unwrap_or_else(|| habitkit_core::default_log_level().to_string()),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::path::PathBuf;

    #[test]
    fn explicit_dir_is_used_and_files_hang_off_it() {
        let base = std::env::temp_dir().join(format!("habitkit-config-{}", std::process::id()));
        let config = AppConfig::resolve(Some(base.clone()), Some("warn".to_string())).unwrap();

        assert_eq!(config.data_dir, base);
        assert_eq!(config.db_path(), base.join("habitkit.sqlite3"));
        assert_eq!(config.log_dir(), base.join("logs"));
        assert_eq!(config.log_level, "warn");
        let _ = std::fs::remove_dir_all(base);
    }

    #[test]
    fn relative_dir_becomes_absolute() {
        let relative = PathBuf::from(format!("target/habitkit-config-rel-{}", std::process::id()));
        let config = AppConfig::resolve(Some(relative.clone()), None).unwrap();
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with(&relative));
        let _ = std::fs::remove_dir_all(config.data_dir);
    }
}
