//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Environment variable overriding the server address.
pub const SERVER_ADDR_ENV: &str = "DIABETES_CHECK_ADDR";

/// Maximum number of measurement sets accepted by one batch request.
pub const MAX_BATCH_SIZE: usize = 1_000;

// ============================================================================
// Config Files
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const CONFIG_PATH_ENV: &str = "DIABETES_CHECK_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "diabetes_check.toml";

// ============================================================================
// Intake Bounds
// ============================================================================

/// Fasting glucose upper bound (mg/dL).
pub const GLUCOSE_MAX: f64 = 500.0;

/// BMI upper bound (kg/m²).
pub const BMI_MAX: f64 = 100.0;

/// Age upper bound (years).
pub const AGE_MAX: f64 = 120.0;

/// Insulin upper bound (μIU/mL).
pub const INSULIN_MAX: f64 = 900.0;

// ============================================================================
// Report
// ============================================================================

/// Width in characters of the longest comparison bar.
pub const BAR_WIDTH: usize = 40;
