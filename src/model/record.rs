//! Candidate records produced by license sources.

use super::{InventoryEntry, UsedBy};
use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};

/// A raw, not yet reconciled license observation from one source.
///
/// Field names follow the persisted inventory format so that manually written
/// entries and nested inventories deserialize directly. The name is optional
/// here only so that a nameless record can be reported as an input error
/// instead of failing deserialization of the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "moduleName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "moduleVersion", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "moduleUrl", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form license text as reported by the source
    #[serde(rename = "moduleLicense", default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "x-ignored", default, skip_serializing_if = "std::ops::Not::not")]
    pub ignored: bool,
    /// Present only when the source propagated provenance itself
    #[serde(rename = "x-usedBy", default, skip_serializing_if = "Option::is_none")]
    pub used_by: Option<UsedBy>,
}

impl CandidateRecord {
    /// Create a record for the named dependency
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    #[must_use]
    pub fn with_used_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used_by = Some(names.into_iter().map(Into::<String>::into).collect());
        self
    }

    /// Mark the dependency as ignored for the rest of the run
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// The dependency name, if one was given and it is not blank
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Parse a JSON array of candidate records.
    ///
    /// The document must be an array; anything else means a broken source
    /// file and is rejected rather than skipped.
    pub fn parse_list(content: &str, origin: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_array() {
            return Err(ScanError::unexpected_shape(
                origin,
                "should contain a JSON list",
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl From<InventoryEntry> for CandidateRecord {
    fn from(entry: InventoryEntry) -> Self {
        Self {
            name: Some(entry.name),
            version: entry.version,
            url: entry.url,
            license: Some(entry.license),
            ignored: false,
            used_by: entry.used_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputErrorKind;

    #[test]
    fn test_builder() {
        let record = CandidateRecord::new("Alpha")
            .with_version("1.0")
            .with_license("MIT")
            .with_used_by(["b", "a"]);
        assert_eq!(record.key(), Some("Alpha"));
        assert_eq!(record.version.as_deref(), Some("1.0"));
        assert_eq!(record.used_by.unwrap().as_slice(), ["a", "b"]);
        assert!(!record.ignored);
    }

    #[test]
    fn test_blank_name_has_no_key() {
        let record = CandidateRecord::new("   ");
        assert_eq!(record.key(), None);
        assert_eq!(CandidateRecord::default().key(), None);
    }

    #[test]
    fn test_parse_list() {
        let json = r#"[
            {"moduleName": "zlib", "moduleLicense": "Zlib", "moduleUrl": "https://zlib.net"},
            {"moduleName": "internal", "x-ignored": true},
            {"moduleName": "nested", "x-usedBy": ["lib2", "lib1"], "x-spdxId": "MIT"}
        ]"#;
        let records = CandidateRecord::parse_list(json, "manual-licenses.json").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].license.as_deref(), Some("Zlib"));
        assert!(records[1].ignored);
        assert_eq!(
            records[2].used_by.as_ref().unwrap().as_slice(),
            ["lib1", "lib2"]
        );
    }

    #[test]
    fn test_parse_list_keeps_nameless_records() {
        let records = CandidateRecord::parse_list(r#"[{"moduleLicense": "MIT"}]"#, "x").unwrap();
        assert_eq!(records[0].key(), None);
    }

    #[test]
    fn test_parse_list_rejects_object() {
        let err = CandidateRecord::parse_list(r#"{"moduleName": "x"}"#, "manual.json").unwrap_err();
        assert!(matches!(
            err,
            ScanError::Input {
                source: InputErrorKind::UnexpectedShape(_),
                ..
            }
        ));
        assert!(err.to_string().contains("manual.json"));
    }

    #[test]
    fn test_serialize_skips_defaults() {
        let json = serde_json::to_string(&CandidateRecord::new("a")).unwrap();
        assert_eq!(json, r#"{"moduleName":"a"}"#);
    }
}
