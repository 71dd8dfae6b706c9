use crate::ui::messages::warning;
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate;

pub const DEFAULT_STORAGE_KEY: &str = "datos_clase_asesoria_programacion_01";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub allow_past_schedule: bool,
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_minutes: i64,
    #[serde(default = "default_follow_interval")]
    pub follow_interval_secs: u64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_urgent_threshold() -> i64 {
    10
}
fn default_follow_interval() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            storage_key: default_storage_key(),
            tick_interval_ms: default_tick_interval_ms(),
            allow_past_schedule: false,
            urgent_threshold_minutes: default_urgent_threshold(),
            follow_interval_secs: default_follow_interval(),
        }
    }
}

impl Config {
    /// Keys every config file is expected to carry.
    pub const KEYS: [&'static str; 6] = [
        "database",
        "storage_key",
        "tick_interval_ms",
        "allow_past_schedule",
        "urgent_threshold_minutes",
        "follow_interval_secs",
    ];

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("classclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".classclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("classclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("classclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found or unreadable
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Config::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warning(format!(
                    "Cannot read configuration file {}: {} (using defaults)",
                    path.display(),
                    e
                ));
                return Config::default();
            }
        };

        Self::from_yaml(&content).unwrap_or_else(|e| {
            warning(format!(
                "Cannot parse configuration file {}: {} (using defaults)",
                path.display(),
                e
            ));
            Config::default()
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn follow_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.follow_interval_secs.max(1))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => resolve_in(&dir, &name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
