//! The reconciled dependency inventory and its persisted document form.

use super::UsedBy;
use crate::error::{Result, ScanError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// License name recorded when no identification succeeded.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// A resolved dependency in the inventory.
///
/// Fields are declared in serialized-key order so the written document has
/// sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Canonical license name, or [`UNKNOWN_LICENSE`]
    #[serde(rename = "moduleLicense")]
    pub license: String,
    #[serde(rename = "moduleName")]
    pub name: String,
    #[serde(rename = "moduleUrl", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "moduleVersion", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "x-isOsiApproved", default, skip_serializing_if = "Option::is_none")]
    pub is_osi_approved: Option<bool>,
    #[serde(rename = "x-spdxId", default, skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,
    #[serde(rename = "x-usedBy", default, skip_serializing_if = "Option::is_none")]
    pub used_by: Option<UsedBy>,
}

impl InventoryEntry {
    /// Create an entry with an unknown license
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            license: UNKNOWN_LICENSE.to_string(),
            name: name.into(),
            url: None,
            version: None,
            is_osi_approved: None,
            spdx_id: None,
            used_by: None,
        }
    }

    /// Whether license identification failed for this entry
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.spdx_id.is_none() && self.license == UNKNOWN_LICENSE
    }

    /// Add a requesting module to the provenance list, creating it if needed.
    ///
    /// Returns `false` when the module was already listed.
    pub fn ensure_used_by(&mut self, module: impl Into<String>) -> bool {
        self.used_by.get_or_insert_with(UsedBy::new).insert(module)
    }
}

/// Dependencies keyed by name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: IndexMap<String, InventoryEntry>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InventoryEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut InventoryEntry> {
        self.entries.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert an entry under its own name, returning any entry it replaced.
    pub fn insert(&mut self, entry: InventoryEntry) -> Option<InventoryEntry> {
        self.entries.insert(entry.name.clone(), entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    /// Entries sorted ascending by name
    #[must_use]
    pub fn sorted(&self) -> Vec<&InventoryEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Number of entries whose license could not be identified
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_unknown()).count()
    }
}

impl FromIterator<InventoryEntry> for Inventory {
    fn from_iter<I: IntoIterator<Item = InventoryEntry>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for entry in iter {
            inventory.insert(entry);
        }
        inventory
    }
}

/// Provenance of a written inventory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    /// Command line that produced the document
    pub process: String,
    /// Name of the directory the scan ran in
    pub project: String,
    /// RFC 3339 local timestamp
    pub time: String,
}

impl GeneratedMetadata {
    /// Describe the current process invocation.
    #[must_use]
    pub fn current(args: &[String]) -> Self {
        let process = if args.is_empty() {
            env!("CARGO_PKG_NAME").to_string()
        } else {
            format!("{} {}", env!("CARGO_PKG_NAME"), args.join(" "))
        };
        let project = std::env::current_dir()
            .ok()
            .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        Self {
            process,
            project,
            time: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// The persisted inventory: `{"dependencies": [...], "generated": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDocument {
    /// Entries sorted ascending by name
    pub dependencies: Vec<InventoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedMetadata>,
}

impl InventoryDocument {
    /// Snapshot an inventory, sorting entries by name.
    #[must_use]
    pub fn from_inventory(inventory: &Inventory, generated: Option<GeneratedMetadata>) -> Self {
        Self {
            dependencies: inventory.sorted().into_iter().cloned().collect(),
            generated,
        }
    }

    /// Parse and validate a persisted inventory.
    ///
    /// A document without a `dependencies` array, or with entries missing
    /// `moduleName` / `moduleLicense`, is rejected.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let Some(object) = value.as_object() else {
            return Err(ScanError::unexpected_shape(origin, "should contain a JSON object"));
        };
        match object.get("dependencies") {
            None => {
                return Err(ScanError::unexpected_shape(
                    origin,
                    "should contain a dependencies item",
                ))
            }
            Some(deps) if !deps.is_array() => {
                return Err(ScanError::unexpected_shape(
                    origin,
                    "dependencies should contain a JSON list",
                ))
            }
            Some(_) => {}
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Render as pretty JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| ScanError::report(e.to_string()))
    }

    /// Rebuild an in-memory inventory from the document.
    #[must_use]
    pub fn into_inventory(self) -> Inventory {
        self.dependencies.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputErrorKind;

    fn entry(name: &str, license: &str) -> InventoryEntry {
        InventoryEntry {
            license: license.to_string(),
            ..InventoryEntry::new(name)
        }
    }

    #[test]
    fn test_new_entry_is_unknown() {
        let entry = InventoryEntry::new("lib");
        assert_eq!(entry.license, UNKNOWN_LICENSE);
        assert!(entry.is_unknown());
    }

    #[test]
    fn test_ensure_used_by_creates_list() {
        let mut entry = InventoryEntry::new("lib");
        assert!(entry.ensure_used_by("root"));
        assert!(!entry.ensure_used_by("root"));
        assert!(entry.ensure_used_by("app"));
        assert_eq!(entry.used_by.unwrap().as_slice(), ["app", "root"]);
    }

    #[test]
    fn test_inventory_sorted() {
        let inventory: Inventory = vec![entry("zeta", "MIT"), entry("Alpha", "MIT"), entry("beta", "MIT")]
            .into_iter()
            .collect();
        let names: Vec<_> = inventory.sorted().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "zeta"]);
        let first_seen: Vec<_> = inventory.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(first_seen, ["zeta", "Alpha", "beta"]);
    }

    #[test]
    fn test_document_json_shape() {
        let mut alpha = entry("Alpha", "BSD Zero Clause License");
        alpha.spdx_id = Some("0BSD".to_string());
        alpha.is_osi_approved = Some(true);
        alpha.ensure_used_by("root");
        let inventory: Inventory = std::iter::once(alpha).collect();

        let doc = InventoryDocument::from_inventory(&inventory, None);
        let json = doc.to_json_pretty().unwrap();
        let expected = r#"{
    "dependencies": [
        {
            "moduleLicense": "BSD Zero Clause License",
            "moduleName": "Alpha",
            "x-isOsiApproved": true,
            "x-spdxId": "0BSD",
            "x-usedBy": [
                "root"
            ]
        }
    ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{"dependencies": [{"moduleName": "a", "moduleLicense": "MIT", "x-usedBy": ["z", "y"]}],
                       "generated": {"process": "license-scanner", "project": "p", "time": "t"}}"#;
        let doc = InventoryDocument::parse(json, "in.json").unwrap();
        assert_eq!(doc.dependencies.len(), 1);
        assert_eq!(
            doc.dependencies[0].used_by.as_ref().unwrap().as_slice(),
            ["y", "z"]
        );
        assert_eq!(doc.generated.unwrap().project, "p");
    }

    #[test]
    fn test_parse_rejects_missing_dependencies() {
        let err = InventoryDocument::parse(r#"{"generated": {}}"#, "in.json").unwrap_err();
        assert!(err.to_string().contains("in.json"));
        assert!(matches!(
            err,
            ScanError::Input {
                source: InputErrorKind::UnexpectedShape(_),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_non_list_dependencies() {
        assert!(InventoryDocument::parse(r#"{"dependencies": {}}"#, "in.json").is_err());
        assert!(InventoryDocument::parse(r#"[]"#, "in.json").is_err());
    }

    #[test]
    fn test_parse_rejects_entry_without_license() {
        let err = InventoryDocument::parse(r#"{"dependencies": [{"moduleName": "a"}]}"#, "in.json")
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Input {
                source: InputErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_generated_metadata_process() {
        let meta = GeneratedMetadata::current(&["--directory".to_string(), "x".to_string()]);
        assert_eq!(meta.process, "license-scanner --directory x");
        assert!(!meta.time.is_empty());
    }
}
