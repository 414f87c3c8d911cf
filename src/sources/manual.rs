//! Hand-written license entries.

use super::{LicenseSource, ProjectTree};
use crate::error::{ErrorContext, Result};
use crate::model::CandidateRecord;
use std::path::PathBuf;

/// Default file name for manual entries.
pub const DEFAULT_MANUAL_FILE: &str = "manual-licenses.json";

/// Reads every manual entries file in the project.
///
/// Each file holds a JSON array of records in inventory form. Manual entries
/// run first, so they take precedence over anything a later source reports
/// for the same name, and they are where ignore directives usually live.
pub struct ManualSource {
    tree: ProjectTree,
    file_name: String,
    files: Vec<PathBuf>,
}

impl ManualSource {
    pub fn new(tree: ProjectTree, file_name: impl Into<String>) -> Self {
        Self {
            tree,
            file_name: file_name.into(),
            files: Vec::new(),
        }
    }
}

impl LicenseSource for ManualSource {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn should_run(&mut self) -> bool {
        self.files = self.tree.find_files(&self.file_name);
        !self.files.is_empty()
    }

    fn produce(&mut self) -> Result<Vec<CandidateRecord>> {
        let mut records = Vec::new();
        for path in &self.files {
            let origin = self.tree.relative(path);
            tracing::info!("   searching '{}'", origin);
            let content = std::fs::read_to_string(path).context(origin.clone())?;
            let found = CandidateRecord::parse_list(&content, &origin).context(origin.clone())?;
            tracing::info!(
                "      found {:?}",
                found.iter().filter_map(CandidateRecord::key).collect::<Vec<_>>()
            );
            records.extend(found);
        }
        Ok(records)
    }
}
