//! Swift Package Manager dependencies.
//!
//! Reads the pins of every `Package.resolved` in the project. Both the
//! original layout (`{"object": {"pins": [...]}, "version": 1}`) and the
//! flattened one used from version 2 on (`{"pins": [...]}`) are understood.

use super::{LicenseSource, ProjectTree};
use crate::error::{ErrorContext, Result, ScanError};
use crate::model::CandidateRecord;
use serde::Deserialize;
use std::path::PathBuf;

const RESOLVED_FILE: &str = "Package.resolved";

#[derive(Debug, Deserialize)]
struct ResolvedFile {
    #[serde(default)]
    object: Option<LegacyObject>,
    #[serde(default)]
    pins: Option<Vec<Pin>>,
}

#[derive(Debug, Deserialize)]
struct LegacyObject {
    pins: Vec<LegacyPin>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPin {
    package: String,
    #[serde(rename = "repositoryURL", default)]
    repository_url: Option<String>,
    #[serde(default)]
    state: PinState,
}

#[derive(Debug, Deserialize)]
struct Pin {
    identity: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    state: PinState,
}

#[derive(Debug, Default, Deserialize)]
struct PinState {
    #[serde(default)]
    version: Option<String>,
}

impl ResolvedFile {
    fn into_records(self, origin: &str) -> Result<Vec<CandidateRecord>> {
        let records = match (self.object, self.pins) {
            (Some(object), _) => object
                .pins
                .into_iter()
                .map(|pin| record(pin.package, pin.state.version, pin.repository_url))
                .collect(),
            (None, Some(pins)) => pins
                .into_iter()
                .map(|pin| record(pin.identity, pin.state.version, pin.location))
                .collect(),
            (None, None) => {
                return Err(ScanError::unexpected_shape(
                    origin,
                    "should contain a pins list",
                ))
            }
        };
        Ok(records)
    }
}

fn record(name: String, version: Option<String>, url: Option<String>) -> CandidateRecord {
    CandidateRecord {
        version,
        url,
        ..CandidateRecord::new(name)
    }
}

/// Parse the pins of one `Package.resolved` document, sorted by name.
pub fn parse_package_resolved(content: &str, origin: &str) -> Result<Vec<CandidateRecord>> {
    let resolved: ResolvedFile = serde_json::from_str(content)?;
    let mut records = resolved.into_records(origin)?;
    records.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(records)
}

/// Reads Swift package pins.
///
/// No license text is available from a pin; identification relies on the
/// repository URL.
pub struct SwiftPackageSource {
    tree: ProjectTree,
    files: Vec<PathBuf>,
}

impl SwiftPackageSource {
    pub fn new(tree: ProjectTree) -> Self {
        Self {
            tree,
            files: Vec::new(),
        }
    }
}

impl LicenseSource for SwiftPackageSource {
    fn name(&self) -> &'static str {
        "swift"
    }

    fn should_run(&mut self) -> bool {
        self.files = self.tree.find_files(RESOLVED_FILE);
        !self.files.is_empty()
    }

    fn produce(&mut self) -> Result<Vec<CandidateRecord>> {
        let mut records = Vec::new();
        for path in &self.files {
            let origin = self.tree.relative(path);
            tracing::info!("   searching '{}'", origin);
            let content = std::fs::read_to_string(path).context(origin.clone())?;
            let found = parse_package_resolved(&content, &origin).context(origin.clone())?;
            tracing::info!(
                "      found {:?}",
                found.iter().filter_map(CandidateRecord::key).collect::<Vec<_>>()
            );
            records.extend(found);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: &str = r#"{
        "object": {
            "pins": [
                {
                    "package": "swift-nio",
                    "repositoryURL": "https://github.com/apple/swift-nio.git",
                    "state": {"branch": null, "revision": "abc", "version": "2.40.0"}
                },
                {
                    "package": "Logging",
                    "repositoryURL": "https://github.com/apple/swift-log.git",
                    "state": {"branch": "main", "revision": "def", "version": null}
                }
            ]
        },
        "version": 1
    }"#;

    const V2: &str = r#"{
        "pins": [
            {
                "identity": "swift-argument-parser",
                "kind": "remoteSourceControl",
                "location": "https://github.com/apple/swift-argument-parser",
                "state": {"revision": "123", "version": "1.2.0"}
            }
        ],
        "version": 2
    }"#;

    #[test]
    fn test_parse_v1_sorted() {
        let records = parse_package_resolved(V1, "Package.resolved").unwrap();
        let names: Vec<_> = records.iter().filter_map(CandidateRecord::key).collect();
        assert_eq!(names, ["Logging", "swift-nio"]);
        assert_eq!(records[0].version, None);
        assert_eq!(records[1].version.as_deref(), Some("2.40.0"));
        assert_eq!(
            records[1].url.as_deref(),
            Some("https://github.com/apple/swift-nio.git")
        );
        assert!(records.iter().all(|r| r.license.is_none()));
    }

    #[test]
    fn test_parse_v2() {
        let records = parse_package_resolved(V2, "Package.resolved").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key(), Some("swift-argument-parser"));
        assert_eq!(records[0].version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_missing_pins_is_fatal() {
        assert!(parse_package_resolved(r#"{"version": 1}"#, "Package.resolved").is_err());
        assert!(parse_package_resolved("[]", "Package.resolved").is_err());
    }

    #[test]
    fn test_source_discovers_files() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("App.xcodeproj/project.xcworkspace/xcshareddata/swiftpm");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join(RESOLVED_FILE), V2).unwrap();

        let mut source = SwiftPackageSource::new(ProjectTree::new(dir.path()));
        assert!(source.should_run());
        assert_eq!(source.produce().unwrap().len(), 1);
    }
}
