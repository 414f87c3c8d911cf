//! Reconciliation of candidate records into the inventory.
//!
//! Every source hands its records to the [`Aggregator`] one batch at a time,
//! in a fixed source order. The first record seen for a name decides the
//! entry's license, version, and URL; later records for the same name only
//! add provenance. License identification runs once, when an entry is
//! created.
//!
//! The set of ignored names lives as long as the aggregator: an ignore
//! directive from any source suppresses the name for every later batch.

mod stats;

pub use stats::MergeStats;

use crate::enrichment::{LicenseResolver, ResolverStats};
use crate::error::{Result, ScanError};
use crate::identification::{Identification, LicenseIdentifier};
use crate::model::{CandidateRecord, Inventory, InventoryEntry, UNKNOWN_LICENSE};
use crate::registry::LicenseRegistry;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Which registry field becomes `moduleLicense` once a license is identified.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseLabel {
    /// Canonical license name, e.g. "BSD Zero Clause License"
    #[default]
    FullName,
    /// SPDX identifier, e.g. "0BSD"
    SpdxId,
}

impl std::fmt::Display for LicenseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullName => write!(f, "full-name"),
            Self::SpdxId => write!(f, "spdx-id"),
        }
    }
}

/// Merges candidate batches into an inventory.
pub struct Aggregator {
    identifier: LicenseIdentifier,
    ignored: BTreeSet<String>,
    label: LicenseLabel,
    stats: MergeStats,
}

impl Aggregator {
    /// Create an aggregator over a shared registry and an owned resolver.
    pub fn new(registry: Arc<LicenseRegistry>, resolver: Box<dyn LicenseResolver>) -> Self {
        Self {
            identifier: LicenseIdentifier::new(registry, resolver),
            ignored: BTreeSet::new(),
            label: LicenseLabel::default(),
            stats: MergeStats::new(),
        }
    }

    #[must_use]
    pub fn with_license_label(mut self, label: LicenseLabel) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &LicenseRegistry {
        self.identifier.registry()
    }

    /// Whether a name has been ignored during this run
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// Ignored names in ascending order
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Totals over every batch merged so far
    #[must_use]
    pub const fn stats(&self) -> &MergeStats {
        &self.stats
    }

    #[must_use]
    pub fn resolver_stats(&self) -> ResolverStats {
        self.identifier.resolver_stats()
    }

    #[must_use]
    pub fn resolver_name(&self) -> &'static str {
        self.identifier.resolver_name()
    }

    /// Merge one source's records into `inventory`.
    ///
    /// `requesting_module` is the module whose dependencies the batch lists;
    /// it is recorded as the user of every record that carries no provenance
    /// of its own.
    ///
    /// # Errors
    ///
    /// Fails before touching the inventory if `requesting_module` is blank or
    /// any record has no name. Lookup problems never fail a batch.
    pub fn merge_batch(
        &mut self,
        requesting_module: &str,
        records: impl IntoIterator<Item = CandidateRecord>,
        inventory: &mut Inventory,
    ) -> Result<MergeStats> {
        if requesting_module.trim().is_empty() {
            return Err(ScanError::validation("requesting module name is empty"));
        }
        let records: Vec<CandidateRecord> = records.into_iter().collect();
        if let Some(index) = records.iter().position(|r| r.key().is_none()) {
            return Err(ScanError::missing_field(
                "moduleName",
                format!("record {index} of batch for '{requesting_module}'"),
            ));
        }

        let mut batch = MergeStats::new();
        for record in records {
            self.merge_record(requesting_module, record, inventory, &mut batch);
        }
        self.stats.merge(&batch);
        Ok(batch)
    }

    fn merge_record(
        &mut self,
        requesting_module: &str,
        record: CandidateRecord,
        inventory: &mut Inventory,
        batch: &mut MergeStats,
    ) {
        let Some(name) = record.key().map(str::to_string) else {
            return;
        };

        if self.ignored.contains(&name) {
            tracing::info!("   Entry '{}' is already marked as ignored", name);
            batch.dropped += 1;
            return;
        }

        if record.ignored {
            if inventory.contains(&name) {
                tracing::warn!(
                    "   Ignoring '{}' by request, but an earlier source already added it",
                    name
                );
            } else {
                tracing::info!("   Ignoring '{}' by request", name);
            }
            self.ignored.insert(name);
            batch.ignored += 1;
            return;
        }

        if let Some(existing) = inventory.get_mut(&name) {
            merge_provenance(requesting_module, &record, existing);
            tracing::info!("   Entry '{}' already exists", name);
            batch.merged += 1;
            return;
        }

        let entry = self.resolve_new_entry(requesting_module, name, record);
        if entry.spdx_id.is_none() {
            batch.unknown += 1;
        }
        tracing::info!("   Added '{}' as '{}'", entry.name, entry.license);
        inventory.insert(entry);
        batch.added += 1;
    }

    /// Build the entry for a first sighting and identify its license.
    fn resolve_new_entry(
        &mut self,
        requesting_module: &str,
        name: String,
        record: CandidateRecord,
    ) -> InventoryEntry {
        let raw_license = record
            .license
            .filter(|text| !text.trim().is_empty());
        let url = record.url;

        let identification = self
            .identifier
            .identify(raw_license.as_deref(), url.as_deref());

        let mut entry = InventoryEntry {
            license: raw_license.unwrap_or_else(|| UNKNOWN_LICENSE.to_string()),
            name,
            url,
            version: record.version,
            is_osi_approved: None,
            spdx_id: None,
            used_by: record.used_by,
        };
        if entry.used_by.is_none() {
            entry.ensure_used_by(requesting_module);
        }
        if let Some(identification) = identification {
            self.apply_identification(&mut entry, identification);
        }
        entry
    }

    fn apply_identification(&self, entry: &mut InventoryEntry, identification: Identification) {
        entry.license = match self.label {
            LicenseLabel::FullName => identification.name,
            LicenseLabel::SpdxId => identification.spdx_id.clone(),
        };
        entry.spdx_id = Some(identification.spdx_id);
        entry.is_osi_approved = Some(identification.is_osi_approved);
    }
}

/// Fold the provenance of a repeat sighting into the existing entry.
///
/// A record without its own `usedBy` was requested directly by the current
/// module; one with `usedBy` came through another module and carries that
/// chain instead.
fn merge_provenance(requesting_module: &str, record: &CandidateRecord, existing: &mut InventoryEntry) {
    match &record.used_by {
        None => {
            existing.ensure_used_by(requesting_module);
        }
        Some(used_by) => {
            for user in used_by {
                existing.ensure_used_by(user.as_str());
            }
        }
    }
}
