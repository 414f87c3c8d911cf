//! Output handling for inventories and reports.
//!
//! Provides inventory file I/O and a stdout-or-file writer for rendered text.

use crate::error::{ErrorContext, Result, ScanError};
use crate::model::{GeneratedMetadata, Inventory, InventoryDocument};
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> anyhow::Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{}", content);
            Ok(())
        }
        OutputTarget::File(path) => {
            create_parent_dir(path)?;
            std::fs::write(path, content).map_err(|e| ScanError::io(path, e))?;
            if !quiet {
                tracing::info!("Report written to {:?}", path);
            }
            Ok(())
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Write the inventory document, creating the parent directory if needed.
pub fn write_inventory(
    path: &Path,
    inventory: &Inventory,
    generated: Option<GeneratedMetadata>,
) -> Result<()> {
    let json = InventoryDocument::from_inventory(inventory, generated).to_json_pretty()?;
    create_parent_dir(path)?;
    std::fs::write(path, json).map_err(|e| ScanError::io(path, e))?;
    tracing::info!("Wrote {} dependencies to {}", inventory.len(), path.display());
    Ok(())
}

/// Read and validate an inventory document.
pub fn read_inventory(path: &Path) -> Result<InventoryDocument> {
    tracing::info!("Reading licenses from '{}'", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    let origin = path.display().to_string();
    InventoryDocument::parse(&content, &origin).context(origin)
}
