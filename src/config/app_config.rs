//! Application configuration: server, intake bounds and report layout
//!
//! Every section implements `Default`, so an empty or missing file behaves
//! exactly like the built-in values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use super::validation::ValidationWarning;
use crate::types::RuleGroup;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$DIABETES_CHECK_CONFIG` env var
/// 2. `./diabetes_check.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Input validation applied before the engine is called
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Text report layout
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file that fails to load or validate is logged and skipped.
    pub fn load() -> Self {
        let Some(path) = Self::discover_path() else {
            info!("No config file found, using built-in defaults");
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using built-in defaults");
                Self::default()
            }
        }
    }

    /// Config file `load()` would read, from the environment and current directory.
    pub fn discover_path() -> Option<PathBuf> {
        let env = std::env::var(defaults::CONFIG_PATH_ENV).ok();
        Self::discover_path_in(env.as_deref(), Path::new("."))
    }

    /// Search order with explicit inputs:
    /// 1. `env_path` if that file exists
    /// 2. `dir/diabetes_check.toml` if it exists
    pub fn discover_path_in(env_path: Option<&str>, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = env_path {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
            warn!(path = %path, "{} points to non-existent file, ignoring", defaults::CONFIG_PATH_ENV);
        }

        let local = dir.join(defaults::LOCAL_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = read_config(path)?;
        Self::from_toml_str(&contents).map_err(|e| e.at(path))
    }

    /// Read and validate a file without logging anything about its keys.
    ///
    /// Unknown-key warnings are collected even when validation fails, so a
    /// caller can report both. Only an unreadable file is an outer error.
    pub fn check_file(path: &Path) -> Result<ConfigCheck, ConfigError> {
        let contents = read_config(path)?;
        Ok(ConfigCheck {
            warnings: super::validation::validate_unknown_keys(&contents),
            outcome: Self::parse_validated(&contents).map_err(|e| e.at(path)),
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        Self::parse_validated(contents)
    }

    fn parse_validated(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate bounds and layout values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for group in RuleGroup::ALL {
            let max = self.intake.max_for(group);
            if !max.is_finite() {
                errors.push(format!(
                    "intake.{}_max must be a finite number (got {max})",
                    group.field_name()
                ));
            } else if max <= 0.0 {
                errors.push(format!(
                    "intake.{}_max = {max} must be > 0",
                    group.field_name()
                ));
            }
        }

        if self.report.bar_width == 0 {
            errors.push("report.bar_width must be > 0".to_string());
        }

        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }

        let (range_errors, range_warnings) = super::validation::validate_clinical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Result of [`AppConfig::check_file`].
#[derive(Debug)]
pub struct ConfigCheck {
    pub warnings: Vec<ValidationWarning>,
    pub outcome: Result<AppConfig, ConfigError>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    /// Attach the source file to a parse error.
    fn at(self, path: &Path) -> Self {
        match self {
            Self::Parse(_, err) => Self::Parse(path.to_path_buf(), err),
            other => other,
        }
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
}

// ============================================================================
// Server Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_addr")]
    pub addr: String,
}

fn default_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

// ============================================================================
// Intake Config
// ============================================================================

/// Bounds enforced on user input before scoring.
///
/// Lower bound is always 0. `require_positive` additionally treats 0 as a
/// field that was never filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_require_positive")]
    pub require_positive: bool,
    #[serde(default = "default_glucose_max")]
    pub glucose_max: f64,
    #[serde(default = "default_bmi_max")]
    pub bmi_max: f64,
    #[serde(default = "default_age_max")]
    pub age_max: f64,
    #[serde(default = "default_insulin_max")]
    pub insulin_max: f64,
}

fn default_require_positive() -> bool { true }
fn default_glucose_max() -> f64 { defaults::GLUCOSE_MAX }
fn default_bmi_max() -> f64 { defaults::BMI_MAX }
fn default_age_max() -> f64 { defaults::AGE_MAX }
fn default_insulin_max() -> f64 { defaults::INSULIN_MAX }

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            require_positive: default_require_positive(),
            glucose_max: default_glucose_max(),
            bmi_max: default_bmi_max(),
            age_max: default_age_max(),
            insulin_max: default_insulin_max(),
        }
    }
}

impl IntakeConfig {
    pub const fn max_for(&self, group: RuleGroup) -> f64 {
        match group {
            RuleGroup::Glucose => self.glucose_max,
            RuleGroup::Bmi => self.bmi_max,
            RuleGroup::Age => self.age_max,
            RuleGroup::Insulin => self.insulin_max,
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Append the reference comparison chart to text reports
    #[serde(default = "default_show_comparison")]
    pub show_comparison: bool,
    /// Width in characters of the longest bar
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_show_comparison() -> bool { true }
fn default_bar_width() -> usize { defaults::BAR_WIDTH }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_comparison: default_show_comparison(),
            bar_width: default_bar_width(),
        }
    }
}
