//! Configuration module for license-scanner.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use license_scanner::config::{AppConfig, Validatable};
//!
//! let config = AppConfig::builder()
//!     .directory("/work/project")
//!     .lookup_enabled(false)
//!     .build();
//! assert!(config.validate().is_empty());
//! ```
//!
//! # Configuration File
//!
//! Place a `.license-scanner.yaml` file in your project root or
//! `~/.config/license-scanner/`:
//!
//! ```yaml
//! scan:
//!   skip_prefix: Tests/
//!   license_label: spdx-id
//! lookup:
//!   timeout_secs: 30
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, LookupConfig, RegistryConfig, ScanConfig, SourcesConfig,
    DEFAULT_OUTPUT, DEFAULT_SKIP_PREFIX,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.license-scanner.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
