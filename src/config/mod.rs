use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;

const APP_DIR_UNIX: &str = ".timepunch";
const APP_DIR_WINDOWS: &str = "timepunch";
const CONFIG_FILE: &str = "timepunch.conf";
const DATABASE_FILE: &str = "timepunch.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// Directory for exports written without `--file`.
    pub export_dir: String,
    /// Refresh period of `watch`, in milliseconds.
    pub tick_millis: u64,
    /// tracing filter directive, e.g. "info" or "timepunch=debug".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            export_dir: ".".to_string(),
            tick_millis: default_tick_millis(),
            log_level: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR_WINDOWS)
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(APP_DIR_UNIX)
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load the configuration file. A missing file gives defaults; an
    /// unreadable or malformed one gives defaults with a warning.
    pub fn load() -> Self {
        let path = Self::config_file();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!(
                    "Ignoring configuration file {}: {e}",
                    path.display()
                ));
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        if cfg.tick_millis == 0 {
            cfg.tick_millis = default_tick_millis();
        }
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create the config directory, write the config file (skipped in test
    /// mode) and return the database path to initialise.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() || is_test {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join(DATABASE_FILE),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Self::load()
            };
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if db_path.is_dir() {
            return Err(AppError::Config(format!(
                "database path is a directory: {}",
                db_path.display()
            )));
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tmp(name: &str, body: &str) -> PathBuf {
        let p = env::temp_dir().join(format!("timepunch-cfg-{name}-{}.conf", std::process::id()));
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p = write_tmp("partial", "database: /tmp/x.sqlite\n");
        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.tick_millis, 1000);
        assert_eq!(cfg.export_dir, ".");
        assert!(cfg.log_level.is_none());
        fs::remove_file(p).ok();
    }

    #[test]
    fn malformed_file_is_an_error_for_load_from() {
        let p = write_tmp("broken", "tick_millis: [not, a, number\n");
        assert!(Config::load_from(&p).is_err());
        fs::remove_file(p).ok();
    }

    #[test]
    fn zero_tick_is_replaced() {
        let p = write_tmp("zero", "tick_millis: 0\nlog_level: debug\n");
        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.tick_millis, 1000);
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        fs::remove_file(p).ok();
    }
}
