//! **Third-party license inventories for project trees.**
//!
//! `license-scanner` discovers the dependencies a project declares through
//! several independent sources, identifies each dependency's license, and
//! reconciles everything into one deduplicated inventory. The inventory is
//! persisted as JSON and can be rendered as an HTML page.
//!
//! ## Core Concepts & Modules
//!
//! - **[`sources`]**: drivers that each know one way of finding dependencies
//!   (manual license lists, Swift `Package.resolved` files, build
//!   prerequisites). They produce [`CandidateRecord`]s.
//! - **[`aggregate`]**: the [`Aggregator`] folds batches of candidates into an
//!   [`Inventory`]. The first source to mention a dependency decides its
//!   license; later mentions only add to its `x-usedBy` list.
//! - **[`identification`]**: maps raw license text to an SPDX entry through
//!   the [`LicenseRegistry`], falling back to a repository host lookup.
//! - **[`enrichment`]**: the [`LicenseResolver`] seam and the GitHub
//!   implementation. Requires the `enrichment` feature for network access.
//! - **[`pipeline`]**: runs the drivers in order and reads or writes
//!   inventory files.
//! - **[`reports`]**: the HTML report.
//!
//! ## Merging Candidates
//!
//! ```
//! use std::sync::Arc;
//! use license_scanner::{Aggregator, CandidateRecord, Inventory, LicenseRegistry, NoOpResolver};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(LicenseRegistry::builtin());
//!     let mut aggregator = Aggregator::new(registry, Box::new(NoOpResolver));
//!     let mut inventory = Inventory::new();
//!
//!     let batch = vec![
//!         CandidateRecord::new("Alpha").with_license("0BSD"),
//!         CandidateRecord::new("Beta").with_license("spdxBSD3"),
//!     ];
//!     aggregator.merge_batch("MyApp", batch, &mut inventory)?;
//!
//!     let beta = inventory.get("Beta").ok_or("missing Beta")?;
//!     assert_eq!(beta.spdx_id.as_deref(), Some("BSD-3-Clause"));
//!     assert_eq!(beta.used_by.as_ref().map(|u| u.len()), Some(1));
//!     Ok(())
//! }
//! ```
//!
//! ## Scanning a Project
//!
//! ```no_run
//! use license_scanner::cli::run_scan;
//! use license_scanner::config::AppConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::builder()
//!         .directory("path/to/project")
//!         .lookup_enabled(false)
//!         .build();
//!     run_scan(&config, &[])?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `enrichment` (default): the GitHub license lookup. This adds the
//!   `reqwest` network dependency. Without it, licenses the registry cannot
//!   identify stay `Unknown`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod identification;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod reports;
pub mod sources;

// Re-export main types for convenience
pub use aggregate::{Aggregator, LicenseLabel, MergeStats};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use enrichment::{LicenseResolver, LookupOutcome, NoOpResolver, ResolverStats};
pub use error::{ErrorContext, Result, ScanError};
pub use identification::{Identification, IdentificationMethod, LicenseIdentifier};
pub use model::{
    CandidateRecord, GeneratedMetadata, Inventory, InventoryDocument, InventoryEntry, UsedBy,
    UNKNOWN_LICENSE,
};
pub use pipeline::{scan, ScanOutcome};
pub use registry::{LicenseRegistry, RegistryEntry};
pub use reports::HtmlReporter;
pub use sources::{default_sources, LicenseSource, ProjectTree};
