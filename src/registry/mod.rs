//! Known-license lookup table.
//!
//! The registry is built once per process, either from the license list
//! compiled into the `spdx` crate or from an SPDX `licenses.json` document,
//! and is read-only afterwards. Share it behind an `Arc`.

mod aliases;

pub use aliases::{alias_target, HEURISTIC_PREFIX};

use crate::error::{RegistryErrorKind, Result, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One license known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// SPDX short identifier, e.g. `Apache-2.0`
    pub license_id: String,
    /// Full canonical name, e.g. `Apache License 2.0`
    pub name: String,
    #[serde(default)]
    pub is_osi_approved: bool,
    #[serde(default, rename = "isDeprecatedLicenseId")]
    pub is_deprecated: bool,
    /// Reference URLs for the license text
    #[serde(default)]
    pub see_also: Vec<String>,
}

/// Shape of the SPDX `licenses.json` document.
#[derive(Debug, Deserialize)]
struct LicenseList {
    licenses: Vec<RegistryEntry>,
}

/// Immutable index of licenses by identifier and by canonical name.
#[derive(Debug, Clone)]
pub struct LicenseRegistry {
    by_id: HashMap<String, RegistryEntry>,
    /// Canonical name to license id
    by_name: HashMap<String, String>,
}

/// SPDX placeholders that are listed alongside licenses but name none.
pub const PLACEHOLDER_IDS: &[&str] = &["NOASSERTION", "NONE"];

/// Whether `id` is an SPDX placeholder rather than a license.
#[must_use]
pub fn is_placeholder_id(id: &str) -> bool {
    PLACEHOLDER_IDS.contains(&id)
}

impl LicenseRegistry {
    /// Build the registry from the SPDX license list bundled with the `spdx` crate.
    ///
    /// `seeAlso` points at the license's page on spdx.org. The `NOASSERTION`
    /// and `NONE` placeholders are left out.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = spdx::identifiers::LICENSES.iter().filter_map(|lic| {
            let short = lic.0;
            if is_placeholder_id(short) {
                return None;
            }
            // license_id() folds a trailing '+' onto the base id
            spdx::license_id(short)
                .filter(|id| id.name == short)
                .map(|id| RegistryEntry {
                    license_id: id.name.to_string(),
                    name: id.full_name.to_string(),
                    is_osi_approved: id.is_osi_approved(),
                    is_deprecated: id.is_deprecated(),
                    see_also: vec![format!("https://spdx.org/licenses/{}.html", id.name)],
                })
        });

        let mut registry = Self::empty();
        for entry in entries {
            registry.index(entry);
        }
        tracing::debug!("Loaded {} licenses from the bundled SPDX list", registry.len());
        registry
    }

    /// Build the registry from explicit entries.
    ///
    /// Rejects an empty list and duplicate identifiers.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Result<Self> {
        let mut registry = Self::empty();
        for entry in entries {
            if registry.by_id.contains_key(&entry.license_id) {
                return Err(ScanError::registry(
                    "building license registry",
                    RegistryErrorKind::DuplicateId(entry.license_id),
                ));
            }
            registry.index(entry);
        }
        if registry.is_empty() {
            return Err(ScanError::registry(
                "building license registry",
                RegistryErrorKind::Empty,
            ));
        }
        Ok(registry)
    }

    /// Parse an SPDX `licenses.json` document.
    pub fn from_license_list_json(content: &str) -> Result<Self> {
        let list: LicenseList = serde_json::from_str(content).map_err(|e| {
            ScanError::registry(
                "parsing license list",
                RegistryErrorKind::InvalidList(e.to_string()),
            )
        })?;
        Self::from_entries(list.licenses)
    }

    /// Load an SPDX `licenses.json` document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Reading SPDX data from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Self::from_license_list_json(&content)
    }

    fn empty() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Add an entry to both indices.
    ///
    /// When two ids share a canonical name, the non-deprecated one owns the
    /// name; otherwise the later one wins.
    fn index(&mut self, entry: RegistryEntry) {
        let keep_existing = self
            .by_name
            .get(&entry.name)
            .and_then(|id| self.by_id.get(id))
            .is_some_and(|existing| !existing.is_deprecated && entry.is_deprecated);
        if !keep_existing {
            self.by_name
                .insert(entry.name.clone(), entry.license_id.clone());
        }
        self.by_id.insert(entry.license_id.clone(), entry);
    }

    /// Exact lookup by SPDX identifier.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&RegistryEntry> {
        self.by_id.get(id)
    }

    /// Exact, case-sensitive lookup by canonical name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Resolve free-form license text.
    ///
    /// Tries, in order: the text as an identifier, as a canonical name, as a
    /// known heuristic alias, and finally with the heuristic prefix stripped
    /// as an identifier.
    #[must_use]
    pub fn search_by_name_or_id(&self, text: &str) -> Option<&RegistryEntry> {
        let entry = self
            .get_by_id(text)
            .or_else(|| self.get_by_name(text))
            .or_else(|| alias_target(text).and_then(|id| self.get_by_id(id)))
            .or_else(|| aliases::strip_heuristic_prefix(text).and_then(|id| self.get_by_id(id)));
        if let Some(entry) = entry {
            tracing::debug!(
                "SPDX identified '{}' as '{}' (id='{}')",
                text,
                entry.name,
                entry.license_id
            );
        }
        entry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
