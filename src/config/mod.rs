use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Application settings.
///
/// Loaded once per invocation and passed explicitly to every component
/// that needs it (report generation, imports, CLI handlers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Default shift template used for managers on leave/holiday days.
    #[serde(default = "default_manager_shift")]
    pub manager_shift: String,
    /// Default shift template used for everybody else.
    #[serde(default = "default_staff_shift")]
    pub staff_shift: String,
    /// Positions treated as managerial (case-insensitive).
    #[serde(default = "default_manager_positions")]
    pub manager_positions: Vec<String>,
    /// chrono format used for dates written into reports.
    #[serde(default = "default_report_date_format")]
    pub report_date_format: String,
    #[serde(default = "default_uppercase_names")]
    pub uppercase_names: bool,
}

fn default_company_name() -> String {
    "My Company".to_string()
}
fn default_manager_shift() -> String {
    "Manager Shift".to_string()
}
fn default_staff_shift() -> String {
    "Mid Shift".to_string()
}
fn default_manager_positions() -> Vec<String> {
    vec!["Manager".to_string(), "Team Lead".to_string()]
}
fn default_report_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_uppercase_names() -> bool {
    true
}

/// Keys every config file is expected to carry (used by `config --check`).
pub const CONFIG_KEYS: &[&str] = &[
    "database",
    "company_name",
    "manager_shift",
    "staff_shift",
    "manager_positions",
    "report_date_format",
    "uppercase_names",
];

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            company_name: default_company_name(),
            manager_shift: default_manager_shift(),
            staff_shift: default_staff_shift(),
            manager_positions: default_manager_positions(),
            report_date_format: default_report_date_format(),
            uppercase_names: default_uppercase_names(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("SHIFTDESK_HOME") {
            return PathBuf::from(dir);
        }
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shiftdesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shiftdesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftdesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftdesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail halfway through a report.
    pub fn validate(&self) -> AppResult<()> {
        use std::fmt::Write as _;

        let sample = NaiveDate::from_ymd_opt(2000, 1, 31)
            .ok_or_else(|| AppError::Config("invalid sample date".into()))?;
        let mut out = String::new();
        write!(out, "{}", sample.format(&self.report_date_format)).map_err(|_| {
            AppError::Config(format!(
                "report_date_format '{}' is not a valid date format",
                self.report_date_format
            ))
        })
    }

    /// List the keys missing from a raw YAML config (defaults will be used).
    pub fn missing_fields(raw_yaml: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(raw_yaml)?;
        let map = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration is not a YAML mapping".into()))?;

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    pub fn is_manager_position(&self, position: &str) -> bool {
        self.manager_positions
            .iter()
            .any(|p| p.eq_ignore_ascii_case(position.trim()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("shiftdesk.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Self::with_database(db_path.to_string_lossy().to_string());

        // Test runs never touch the user's config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(config)
    }
}
