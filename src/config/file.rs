//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, LookupConfig, ScanConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".license-scanner.yaml",
    ".license-scanner.yml",
    "license-scanner.yaml",
    "license-scanner.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/license-scanner/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join(env!("CARGO_PKG_NAME"))) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// An unreadable file is logged and the defaults are used instead.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// A field of `other` only wins when it differs from its default, which
    /// lets CLI args built on `AppConfig::default()` layer over file config.
    pub fn merge(&mut self, other: &Self) {
        let scan_defaults = ScanConfig::default();
        if other.scan.directory != scan_defaults.directory {
            self.scan.directory.clone_from(&other.scan.directory);
        }
        if other.scan.name.is_some() {
            self.scan.name.clone_from(&other.scan.name);
        }
        if other.scan.output != scan_defaults.output {
            self.scan.output.clone_from(&other.scan.output);
        }
        if other.scan.manual_licenses != scan_defaults.manual_licenses {
            self.scan.manual_licenses.clone_from(&other.scan.manual_licenses);
        }
        if other.scan.skip_prefix != scan_defaults.skip_prefix {
            self.scan.skip_prefix.clone_from(&other.scan.skip_prefix);
        }
        if other.scan.license_label != scan_defaults.license_label {
            self.scan.license_label = other.scan.license_label;
        }

        let lookup_defaults = LookupConfig::default();
        if !other.lookup.enabled {
            self.lookup.enabled = false;
        }
        if other.lookup.api_base != lookup_defaults.api_base {
            self.lookup.api_base.clone_from(&other.lookup.api_base);
        }
        if other.lookup.timeout_secs.is_some() {
            self.lookup.timeout_secs = other.lookup.timeout_secs;
        }
        if other.lookup.token.is_some() {
            self.lookup.token.clone_from(&other.lookup.token);
        }

        if other.registry.license_list.is_some() {
            self.registry.license_list.clone_from(&other.registry.license_list);
        }

        if other.sources.prereqs_platform.is_some() {
            self.sources
                .prereqs_platform
                .clone_from(&other.sources.prereqs_platform);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# license-scanner configuration
# ==============================
#
# Place this file at:
#   - .license-scanner.yaml in your project root
#   - ~/.config/license-scanner/license-scanner.yaml for global config
#
# CLI arguments always override file settings.

scan:
  # Project root to scan
  directory: .
  # Requesting module name (defaults to the directory name)
  # name: MyProject
  # Inventory path, relative to the project root unless absolute
  output: Dependencies/prereqs-licenses.json
  # File name of manually maintained license lists
  manual_licenses: manual-licenses.json
  # Directories under this relative prefix are not searched
  skip_prefix: Tests/
  # Label for identified licenses: full-name or spdx-id
  license_label: full-name

# Repository license lookup (GitHub)
lookup:
  enabled: true
  api_base: https://api.github.com
  # Request timeout in seconds (no timeout when unset)
  # timeout_secs: 30
  # API token; GITHUB_TOKEN is used when unset
  # token: ghp_xxx

# License registry
# SPDX licenses.json to use instead of the built-in list:
#   license_list: ./licenses.json
registry: {}

# Source drivers
# Checkout directory under .prereqs (host platform when unset):
#   prereqs_platform: Darwin-arm64
sources: {}
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::LicenseLabel;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".license-scanner.yaml");
        std::fs::write(&config_path, "scan:\n  skip_prefix: Spec/\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("license-scanner.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".license-scanner.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path()).unwrap();
        assert!(found.ends_with(".license-scanner.yml"));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
scan:
  name: Viewer
  license_label: spdx-id
lookup:
  enabled: false
  timeout_secs: 10
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.scan.name.as_deref(), Some("Viewer"));
        assert_eq!(config.scan.license_label, LicenseLabel::SpdxId);
        assert!(!config.lookup.enabled);
        assert_eq!(config.lookup.timeout_secs, Some(10));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "scan: [not, a, map]").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .name(Some("FromFile".to_string()))
            .skip_prefix("Spec/")
            .timeout_secs(Some(5))
            .build();
        let overrides = AppConfig::builder()
            .license_label(LicenseLabel::SpdxId)
            .lookup_enabled(false)
            .build();

        base.merge(&overrides);

        assert_eq!(base.scan.name.as_deref(), Some("FromFile"));
        assert_eq!(base.scan.skip_prefix, "Spec/");
        assert_eq!(base.scan.license_label, LicenseLabel::SpdxId);
        assert!(!base.lookup.enabled);
        assert_eq!(base.lookup.timeout_secs, Some(5));
    }

    #[test]
    fn test_generated_example_parses() {
        let example = generate_example_config();
        let config: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "lookup:\n  enabled: false\n").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
