//! Configuration validation for license-scanner.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::*;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scan.validate());
        errors.extend(self.lookup.validate());
        errors.extend(self.registry.validate());
        errors.extend(self.sources.validate());
        errors
    }
}

impl Validatable for ScanConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.output.as_os_str().is_empty() {
            errors.push(ConfigError::new("scan.output", "Output path must not be empty"));
        }

        // Matched against file names, not paths
        let manual = self.manual_licenses.trim();
        if manual.is_empty() {
            errors.push(ConfigError::new(
                "scan.manual_licenses",
                "Manual license file name must not be empty",
            ));
        } else if manual.contains('/') || manual.contains('\\') {
            errors.push(ConfigError::new(
                "scan.manual_licenses",
                format!("Expected a file name, got path '{}'", manual),
            ));
        }

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(ConfigError::new("scan.name", "Module name must not be blank"));
            }
        }

        errors
    }
}

impl Validatable for LookupConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.api_base) {
            Ok(base) if matches!(base.scheme(), "http" | "https") => {}
            Ok(base) => errors.push(ConfigError::new(
                "lookup.api_base",
                format!("Unsupported URL scheme '{}'", base.scheme()),
            )),
            Err(e) => errors.push(ConfigError::new(
                "lookup.api_base",
                format!("Invalid URL '{}': {}", self.api_base, e),
            )),
        }

        if self.timeout_secs == Some(0) {
            errors.push(ConfigError::new(
                "lookup.timeout_secs",
                "Timeout must be greater than 0 when set",
            ));
        }

        errors
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(path) = &self.license_list {
            if !path.exists() {
                errors.push(ConfigError::new(
                    "registry.license_list",
                    format!("License list not found: {}", path.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for SourcesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(platform) = &self.prereqs_platform {
            if platform.trim().is_empty() || platform.contains('/') {
                errors.push(ConfigError::new(
                    "sources.prereqs_platform",
                    format!("Expected an <OS>-<arch> directory name, got '{}'", platform),
                ));
            }
        }
        errors
    }
}
