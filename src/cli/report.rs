//! Report command handler.
//!
//! Implements the `report` subcommand: render an inventory file as HTML.

use crate::config::RegistryConfig;
use crate::pipeline::{exit_codes, read_inventory, write_output, OutputTarget};
use crate::reports::HtmlReporter;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Inputs of the `report` subcommand.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Inventory file to render
    pub input: PathBuf,
    /// Destination; stdout when unset
    pub output: Option<PathBuf>,
    /// The project's own license text, shown above the dependencies
    pub local_license: Option<PathBuf>,
    /// Page title
    pub title: Option<String>,
    /// Suppress the "written to" message
    pub quiet: bool,
}

/// Run the report command
pub fn run_report(config: &ReportConfig, registry: &RegistryConfig) -> Result<i32> {
    let document = read_inventory(&config.input)
        .with_context(|| format!("Failed to read inventory {}", config.input.display()))?;
    let registry = super::scan::load_registry(registry)?;

    let mut reporter = HtmlReporter::new();
    if let Some(title) = &config.title {
        reporter = reporter.with_title(title.clone());
    }
    if let Some(path) = &config.local_license {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read local license {}", path.display()))?;
        reporter = reporter.with_local_license(text);
    }

    let html = reporter.generate(&document, &registry)?;
    if let Some(path) = &config.output {
        tracing::info!("Writing HTML to '{}'", path.display());
    }
    write_output(&html, &OutputTarget::from_option(config.output.clone()), config.quiet)?;
    Ok(exit_codes::SUCCESS)
}
