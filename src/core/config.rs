use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        if path.exists() {
            println!("{}", fs::read_to_string(path)?);
        } else {
            info(format!("{} not found, showing defaults:", path.display()));
            println!("{}", serde_yaml::to_string(cfg)?);
        }
        Ok(())
    }

    /// Report keys missing from the file (their defaults apply).
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::Config(format!("{} does not exist (run init)", path.display())));
        }
        let missing = Config::missing_fields(&fs::read_to_string(path)?)?;
        if missing.is_empty() {
            success("Configuration is complete.");
        } else {
            for k in &missing {
                warning(format!("Missing key '{k}' (default value in use)"));
            }
        }
        Ok(missing)
    }

    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let ed = editor.map(str::to_string).unwrap_or(default_editor);

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start editor '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        success(format!("Configuration file edited with '{ed}'"));
        Ok(())
    }
}
