//! Scan command handler.
//!
//! Implements the `scan` subcommand: run every source driver over a project
//! and write the merged inventory.

use crate::aggregate::Aggregator;
use crate::config::{AppConfig, LookupConfig, RegistryConfig};
use crate::enrichment::{LicenseResolver, NoOpResolver};
use crate::model::GeneratedMetadata;
use crate::pipeline::{exit_codes, scan, write_inventory, ScanOutcome};
use crate::registry::LicenseRegistry;
use crate::sources::{default_sources, ProjectTree};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Run the scan command.
///
/// `args` is recorded in the inventory's `generated.process` field.
pub fn run_scan(config: &AppConfig, args: &[String]) -> Result<i32> {
    let outcome = scan_project(config)?;
    let output = config.output_path();
    write_inventory(&output, &outcome.inventory, Some(GeneratedMetadata::current(args)))
        .with_context(|| format!("Failed to write inventory to {}", output.display()))?;
    Ok(exit_codes::SUCCESS)
}

/// Scan the configured project without writing anything.
pub fn scan_project(config: &AppConfig) -> Result<ScanOutcome> {
    let registry = Arc::new(load_registry(&config.registry)?);
    let resolver = build_resolver(&config.lookup)?;
    let mut aggregator =
        Aggregator::new(registry, resolver).with_license_label(config.scan.license_label);

    let tree = ProjectTree::new(&config.scan.directory)
        .with_skip_prefix(config.scan.skip_prefix.clone());
    let mut sources = default_sources(
        &tree,
        &config.scan.manual_licenses,
        config.sources.prereqs_platform.as_deref(),
    );

    let module_name = config.module_name();
    tracing::info!(
        "Scanning '{}' as module '{}'",
        config.scan.directory.display(),
        module_name
    );
    let outcome = scan(&mut aggregator, &module_name, &mut sources)
        .with_context(|| format!("Failed to scan {}", config.scan.directory.display()))?;
    if outcome.sources_run.is_empty() {
        tracing::warn!("No scanner applied to {}", config.scan.directory.display());
    }
    outcome.log_summary(aggregator.resolver_name());
    Ok(outcome)
}

/// The configured license list, or the built-in registry.
pub fn load_registry(config: &RegistryConfig) -> Result<LicenseRegistry> {
    match &config.license_list {
        Some(path) => LicenseRegistry::load(path)
            .with_context(|| format!("Failed to load license list {}", path.display())),
        None => Ok(LicenseRegistry::builtin()),
    }
}

fn build_resolver(lookup: &LookupConfig) -> Result<Box<dyn LicenseResolver>> {
    if !lookup.enabled {
        tracing::debug!("Repository license lookup disabled");
        return Ok(Box::new(NoOpResolver));
    }
    lookup_resolver(lookup)
}

#[cfg(feature = "enrichment")]
fn lookup_resolver(lookup: &LookupConfig) -> Result<Box<dyn LicenseResolver>> {
    use crate::enrichment::{GitHubClientConfig, GitHubResolver};

    let client_config = GitHubClientConfig {
        api_base: lookup.api_base.clone(),
        timeout: lookup.timeout_secs.map(std::time::Duration::from_secs),
        token: lookup.token.clone(),
    };
    let resolver = GitHubResolver::from_config(client_config)
        .context("Failed to create the GitHub client")?;
    Ok(Box::new(resolver))
}

#[cfg(not(feature = "enrichment"))]
fn lookup_resolver(_lookup: &LookupConfig) -> Result<Box<dyn LicenseResolver>> {
    tracing::warn!(
        "Repository lookup requested but the 'enrichment' feature is not enabled; \
         licenses will only be identified from the registry"
    );
    Ok(Box::new(NoOpResolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_registry_by_default() {
        let registry = load_registry(&RegistryConfig::default()).unwrap();
        assert!(registry.get_by_id("MIT").is_some());
    }

    #[test]
    fn test_missing_license_list_is_error() {
        let config = RegistryConfig {
            license_list: Some(PathBuf::from("/nonexistent/licenses.json")),
        };
        let err = load_registry(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to load license list"));
    }

    #[test]
    fn test_disabled_lookup_uses_noop() {
        let lookup = LookupConfig {
            enabled: false,
            ..LookupConfig::default()
        };
        assert_eq!(build_resolver(&lookup).unwrap().name(), NoOpResolver.name());
    }

    #[test]
    fn test_scan_empty_project() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::builder()
            .directory(dir.path())
            .lookup_enabled(false)
            .build();
        let code = run_scan(&config, &[]).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let written = std::fs::read_to_string(config.output_path()).unwrap();
        assert!(written.contains("\"dependencies\": []"));
        assert!(written.contains("\"generated\""));
    }
}
