//! Application Configuration Module
//!
//! Configuration for the adapters around the scoring engine, loaded from
//! TOML. The rule table itself is fixed and not configurable.
//!
//! ## Loading Order
//!
//! 1. `DIABETES_CHECK_CONFIG` environment variable (path to TOML file)
//! 2. `diabetes_check.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(AppConfig::load());
//! let bound = config::get().intake.glucose_max;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;

use std::sync::OnceLock;

/// Global configuration, initialized once at startup.
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: AppConfig) {
    if APP_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Falls back to built-in defaults when `init()` was never called.
pub fn get() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    APP_CONFIG.get().is_some()
}
