//! GitHub REST API response types.
//!
//! Only the fields the resolver reads are modeled.
//! See: https://docs.github.com/en/rest/repos/repos

use crate::registry::is_placeholder_id;
use serde::{Deserialize, Serialize};

/// Response of `GET /rate_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    pub rate: RateBudget,
}

/// Core API call budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateBudget {
    #[serde(default)]
    pub limit: u64,
    pub remaining: u64,
}

/// One entry of `GET /orgs/{org}/repos` or `GET /users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub license: Option<RepositoryLicense>,
}

impl RepositorySummary {
    /// The declared SPDX id, if the repository has a real one.
    ///
    /// GitHub answers `NOASSERTION` for license files it cannot classify.
    #[must_use]
    pub fn spdx_id(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|license| license.spdx_id.as_deref())
            .filter(|id| !id.is_empty() && !is_placeholder_id(id))
    }
}

/// License block of a repository summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
}
