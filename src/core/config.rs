use crate::config::Config;
use crate::config::migrate;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    /// Editor to use: `--editor`, then $EDITOR/$VISUAL, then the platform default.
    pub fn pick_editor(requested: &Option<String>) -> String {
        requested.clone().unwrap_or_else(Self::default_editor)
    }

    fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let requested = Self::pick_editor(editor);

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    requested
                ));
                return Ok(());
            }
            _ => {}
        }

        let fallback = Self::default_editor();
        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            requested, fallback
        ));

        let status = Command::new(&fallback)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if status.success() {
            success(format!(
                "Configuration file edited successfully using fallback '{}'",
                fallback
            ));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "Failed to edit configuration file using fallback '{}'",
                fallback
            )))
        }
    }

    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        let missing = migrate::check_file(path).map_err(|_| AppError::ConfigLoad)?;
        if missing.is_empty() {
            success("Configuration file has all fields.");
        } else {
            for key in &missing {
                warning(format!("Missing field: {}", key));
            }
            info("Run `classclock config --migrate` to add them with default values.");
        }
        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<&'static str>> {
        migrate::fill_missing_keys(path).map_err(|_| AppError::ConfigSave)
    }
}
