use crate::db::page::Page;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::{ensure_parent_dir, expand_tilde};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const APP_DIR: &str = "protrak";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Default `--limit` for listings; -1 lists everything.
    #[serde(default = "default_page_limit")]
    pub page_limit: i64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_page_limit() -> i64 {
    Page::NO_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            page_limit: default_page_limit(),
        }
    }
}

impl Config {
    /// Platform config directory plus `protrak`.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("protrak.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("protrak.sqlite")
    }

    /// Read the config file; a missing file yields the defaults.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.database = cfg.database_path().to_string_lossy().to_string();
        Ok(cfg)
    }

    /// `database` with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the config file (skipped in test mode) and make sure the
    /// database directory exists. Returns the database path.
    ///
    /// A relative `custom_db` is placed inside the config directory.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() || is_test { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };
        ensure_parent_dir(&db_path)?;

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                page_limit: default_page_limit(),
            };
            fs::write(Self::config_file(), config.to_yaml()?)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(db_path)
    }
}
