//! Build-system prerequisites (`prereqs.json`).
//!
//! A prerequisites file is a JSON array whose items name a dependency by one
//! of three keys:
//!
//! ```json
//! [
//!     {"git": "https://github.com/madler/zlib.git"},
//!     {"tarball": "https://example.org/dl/libfoo-1.2.tar.gz", "filename": "libfoo-1.2.tar.gz"},
//!     {"pip": "requests"}
//! ]
//! ```
//!
//! Checkouts live under `.prereqs/<OS>-<arch>/<dir>`. A checkout that was
//! itself scanned carries `Dependencies/prereqs-licenses.json`; those entries
//! are reported ahead of the checkout's own record so that transitive
//! dependencies keep their provenance.

use super::{LicenseSource, ProjectTree};
use crate::error::{ErrorContext, Result, ScanError};
use crate::model::{CandidateRecord, InventoryDocument};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const PREREQS_FILE: &str = "prereqs.json";
const PREREQS_DIR: &str = ".prereqs";
const REVISION_FILE: &str = "REVISION";
const TARBALL_SUFFIX: &str = ".tar.gz";

/// Path of a scanned project's inventory, relative to its directory.
pub const NESTED_INVENTORY: &str = "Dependencies/prereqs-licenses.json";

/// One item of a prerequisites file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrereqEntry {
    #[serde(default)]
    pub git: Option<String>,
    #[serde(default)]
    pub tarball: Option<String>,
    /// Local file name of a tarball, when it differs from the URL's
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub pip: Option<String>,
}

/// A dependency discovered from a prerequisites file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    pub name: String,
    pub version: Option<String>,
    pub url: String,
    /// Checkout directory, when one was found
    pub directory: Option<PathBuf>,
}

impl Prerequisite {
    fn to_record(&self) -> CandidateRecord {
        CandidateRecord {
            version: self.version.clone(),
            url: Some(self.url.clone()),
            ..CandidateRecord::new(self.name.clone())
        }
    }
}

/// `<OS>-<arch>` as `uname -s` and `uname -m` would spell it.
#[must_use]
pub fn host_platform() -> String {
    let os = match std::env::consts::OS {
        "macos" => "Darwin",
        "linux" => "Linux",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    };
    let arch = match (std::env::consts::OS, std::env::consts::ARCH) {
        ("macos", "aarch64") => "arm64",
        (_, arch) => arch,
    };
    format!("{os}-{arch}")
}

/// Last non-empty path segment of a URL, or of a plain path.
fn url_basename(text: &str) -> Option<String> {
    let path = url::Url::parse(text)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| text.to_string());
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Split `name-version` at the first dash.
fn split_tarball_name(stem: &str) -> (String, Option<String>) {
    match stem.split_once('-') {
        Some((name, version)) => (name.to_string(), Some(version.to_string())),
        None => (stem.to_string(), None),
    }
}

/// Reads build-system prerequisites.
pub struct PrereqsSource {
    tree: ProjectTree,
    platform: String,
    files: Vec<PathBuf>,
}

impl PrereqsSource {
    /// Create a source looking for checkouts of the running host's platform.
    pub fn new(tree: ProjectTree) -> Self {
        Self::with_platform(tree, host_platform())
    }

    /// Create a source looking for checkouts under a specific `<OS>-<arch>`.
    pub fn with_platform(tree: ProjectTree, platform: impl Into<String>) -> Self {
        Self {
            tree,
            platform: platform.into(),
            files: Vec::new(),
        }
    }

    /// Locate the checkout directory for `dir_name` under any `.prereqs`.
    fn find_checkout(&self, dir_name: &str) -> Option<PathBuf> {
        let found = self
            .tree
            .find_dirs(PREREQS_DIR)
            .into_iter()
            .map(|prereqs| prereqs.join(&self.platform).join(dir_name))
            .find(|path| path.is_dir());
        if let Some(path) = &found {
            tracing::debug!("Found project in {}", path.display());
        }
        found
    }

    fn git_prerequisite(&self, url: &str) -> Option<Prerequisite> {
        let base = url_basename(url)?;
        let name = base.strip_suffix(".git").unwrap_or(&base).to_string();
        let directory = self.find_checkout(&name);
        let version = directory
            .as_deref()
            .and_then(|dir| read_revision(&dir.join(REVISION_FILE)));
        Some(Prerequisite {
            name,
            version,
            url: url.to_string(),
            directory,
        })
    }

    fn tarball_prerequisite(&self, url: &str, filename: Option<&str>) -> Option<Prerequisite> {
        let file = match filename.filter(|f| !f.is_empty()) {
            Some(file) => file.to_string(),
            None => url_basename(url)?,
        };
        let stem = file.strip_suffix(TARBALL_SUFFIX).unwrap_or(&file);
        let directory = self.find_checkout(stem);
        let (name, version) = split_tarball_name(stem);
        Some(Prerequisite {
            name,
            version,
            url: url.to_string(),
            directory,
        })
    }

    /// Parse one prerequisites file into projects and pip package names.
    fn read_prereqs_file(&self, path: &Path) -> Result<(Vec<Prerequisite>, Vec<String>)> {
        let origin = self.tree.relative(path);
        let content = std::fs::read_to_string(path).context(origin.clone())?;
        let value: serde_json::Value = serde_json::from_str(&content).context(origin.clone())?;
        if !value.is_array() {
            return Err(ScanError::unexpected_shape(origin, "should contain a JSON list"));
        }
        let entries: Vec<PrereqEntry> = serde_json::from_value(value).context(origin.clone())?;

        let mut projects = Vec::new();
        let mut pips = Vec::new();
        for entry in entries {
            if let Some(git) = &entry.git {
                projects.extend(self.git_prerequisite(git));
            } else if let Some(tarball) = &entry.tarball {
                projects.extend(self.tarball_prerequisite(tarball, entry.filename.as_deref()));
            } else if let Some(pip) = entry.pip {
                pips.push(pip);
            } else {
                tracing::debug!("Skipping unrecognized entry in {}", origin);
            }
        }
        Ok((projects, pips))
    }
}

/// Contents of a `REVISION` file with line breaks removed.
fn read_revision(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let revision = content.replace('\n', "").trim().to_string();
    (!revision.is_empty()).then_some(revision)
}

/// Entries of a checkout's own inventory, with their provenance.
fn nested_records(directory: &Path) -> Result<Vec<CandidateRecord>> {
    let path = directory.join(NESTED_INVENTORY);
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(&path).context(origin.clone())?;
    let document = InventoryDocument::parse(&content, &origin).context(origin)?;
    Ok(document
        .dependencies
        .into_iter()
        .map(CandidateRecord::from)
        .collect())
}

impl LicenseSource for PrereqsSource {
    fn name(&self) -> &'static str {
        "prereqs"
    }

    fn should_run(&mut self) -> bool {
        self.files = self.tree.find_files(PREREQS_FILE);
        !self.files.is_empty()
    }

    fn produce(&mut self) -> Result<Vec<CandidateRecord>> {
        let mut projects = Vec::new();
        let mut pips = Vec::new();
        for path in &self.files {
            tracing::info!("   searching '{}'", self.tree.relative(path));
            let (mut found, mut found_pips) = self.read_prereqs_file(path)?;
            if !found.is_empty() {
                found.sort_by(|a, b| a.name.cmp(&b.name));
                tracing::info!(
                    "      found {:?}",
                    found.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
                );
                projects.extend(found);
            }
            if !found_pips.is_empty() {
                found_pips.sort();
                tracing::info!("      found {:?}", found_pips);
                pips.extend(found_pips);
            }
        }

        let mut records = Vec::new();
        for project in &projects {
            tracing::info!("   examining '{}'", project.name);
            if let Some(directory) = &project.directory {
                let nested = nested_records(directory)?;
                if !nested.is_empty() {
                    let mut names: Vec<_> = nested.iter().filter_map(CandidateRecord::key).collect();
                    names.sort_unstable();
                    tracing::info!("      also found {:?}", names);
                }
                records.extend(nested);
            }
            records.push(project.to_record());
        }

        // pip metadata is not inspected; the packages are still reported
        for pip in pips {
            tracing::debug!("   recording pip package '{}' without license details", pip);
            records.push(CandidateRecord::new(pip));
        }
        Ok(records)
    }
}
