//! Configuration types for license-scanner operations.

use crate::aggregate::LicenseLabel;
use crate::enrichment::github::DEFAULT_API_BASE;
use crate::sources::DEFAULT_MANUAL_FILE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the inventory, relative to the scanned directory.
pub const DEFAULT_OUTPUT: &str = "Dependencies/prereqs-licenses.json";

/// Default directory prefix excluded from file discovery.
pub const DEFAULT_SKIP_PREFIX: &str = "Tests/";

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI values are layered over file values with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Project scanning
    pub scan: ScanConfig,
    /// Repository license lookup
    pub lookup: LookupConfig,
    /// License registry source
    pub registry: RegistryConfig,
    /// Source driver options
    pub sources: SourcesConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Module name recorded as the requester of the project's dependencies.
    ///
    /// Falls back to the scanned directory's base name, resolving `.` and
    /// similar relative paths against the current directory.
    #[must_use]
    pub fn module_name(&self) -> String {
        if let Some(name) = self.scan.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let dir = std::fs::canonicalize(&self.scan.directory)
            .unwrap_or_else(|_| self.scan.directory.clone());
        dir.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    /// Inventory path; relative paths are taken from the scanned directory.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if self.scan.output.is_absolute() {
            self.scan.output.clone()
        } else {
            self.scan.directory.join(&self.scan.output)
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the directory to scan.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.scan.directory = directory.into();
        self
    }

    /// Set the requesting module name.
    pub fn name(mut self, name: Option<String>) -> Self {
        self.config.scan.name = name;
        self
    }

    /// Set the inventory output path.
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.scan.output = output.into();
        self
    }

    /// Set the file name of manual license lists.
    pub fn manual_licenses(mut self, file_name: impl Into<String>) -> Self {
        self.config.scan.manual_licenses = file_name.into();
        self
    }

    /// Set the excluded directory prefix.
    pub fn skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.scan.skip_prefix = prefix.into();
        self
    }

    /// Set which registry field labels an identified license.
    pub const fn license_label(mut self, label: LicenseLabel) -> Self {
        self.config.scan.license_label = label;
        self
    }

    /// Enable or disable the repository license lookup.
    pub const fn lookup_enabled(mut self, enabled: bool) -> Self {
        self.config.lookup.enabled = enabled;
        self
    }

    /// Set the API token for the repository lookup.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.config.lookup.token = token;
        self
    }

    /// Set the lookup request timeout in seconds.
    pub const fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.lookup.timeout_secs = secs;
        self
    }

    /// Load the registry from an SPDX license list file.
    pub fn license_list(mut self, path: Option<PathBuf>) -> Self {
        self.config.registry.license_list = path;
        self
    }

    /// Override the prerequisite checkout platform.
    pub fn prereqs_platform(mut self, platform: Option<String>) -> Self {
        self.config.sources.prereqs_platform = platform;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Project scanning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directory of the project
    pub directory: PathBuf,
    /// Requesting module name (defaults to the directory's base name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inventory output path, relative to `directory` unless absolute
    pub output: PathBuf,
    /// File name of manually maintained license lists
    pub manual_licenses: String,
    /// Relative directory prefix excluded from discovery
    pub skip_prefix: String,
    /// Which registry field becomes `moduleLicense` after identification
    pub license_label: LicenseLabel,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            name: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            manual_licenses: DEFAULT_MANUAL_FILE.to_string(),
            skip_prefix: DEFAULT_SKIP_PREFIX.to_string(),
            license_label: LicenseLabel::default(),
        }
    }
}

/// Repository license lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LookupConfig {
    /// Query the repository host when the registry has no match
    pub enabled: bool,
    /// API base URL
    pub api_base: String,
    /// Request timeout in seconds (no timeout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// API token (also read from `GITHUB_TOKEN`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: None,
            token: None,
        }
    }
}

/// License registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RegistryConfig {
    /// SPDX `licenses.json` document to load instead of the built-in list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_list: Option<PathBuf>,
}

/// Source driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourcesConfig {
    /// `<OS>-<arch>` checkout directory for prerequisites (host platform when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prereqs_platform: Option<String>,
}
