//! GitHub license lookup.
//!
//! Resolves a repository URL to the SPDX id GitHub reports for it. Each
//! owner's repository list is fetched once and cached for the life of the
//! resolver, and every listing request is charged against the API call
//! budget reported by `GET /rate_limit`.
//!
//! See: <https://docs.github.com/en/rest/repos/repos>

#[cfg(feature = "enrichment")]
mod client;
pub mod response;
mod repo_url;

#[cfg(feature = "enrichment")]
pub use client::{GitHubClient, GitHubClientConfig};
pub use repo_url::{RepositoryUrl, GITHUB_HOST};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

use super::stats::ResolverStats;
use super::traits::{LicenseResolver, LookupOutcome, UnavailableReason};
use crate::error::{LookupErrorKind, Result, ScanError};
use response::{RateLimitResponse, RepositorySummary};
use std::collections::HashMap;

/// Which listing endpoint an owner is queried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Organization,
    User,
}

impl OwnerKind {
    /// Endpoints in the order they are tried.
    pub const LOOKUP_ORDER: [Self; 2] = [Self::Organization, Self::User];

    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Organization => "orgs",
            Self::User => "users",
        }
    }
}

/// The repository hosting API the resolver talks to.
///
/// Implemented by [`GitHubClient`] over HTTP; tests substitute an in-memory
/// host.
pub trait RepositoryHost {
    /// Fetch the current API call budget.
    fn rate_limit(&mut self) -> Result<RateLimitResponse>;

    /// List an owner's repositories; `Ok(None)` when the owner does not exist
    /// under this endpoint.
    fn list_repositories(
        &mut self,
        kind: OwnerKind,
        owner: &str,
    ) -> Result<Option<Vec<RepositorySummary>>>;
}

/// License resolver backed by the GitHub repository listing API.
pub struct GitHubLicenseResolver<H> {
    host: H,
    /// Repository lists by owner
    cache: HashMap<String, Vec<RepositorySummary>>,
    /// Remaining API calls; fetched lazily on first use
    remaining: Option<u64>,
    stats: ResolverStats,
}

/// The resolver wired to the real HTTP client.
#[cfg(feature = "enrichment")]
pub type GitHubResolver = GitHubLicenseResolver<GitHubClient>;

#[cfg(feature = "enrichment")]
impl GitHubLicenseResolver<GitHubClient> {
    /// Create a resolver that talks to the GitHub API.
    pub fn from_config(config: GitHubClientConfig) -> Result<Self> {
        Ok(Self::new(GitHubClient::new(config)?))
    }
}

impl<H: RepositoryHost> GitHubLicenseResolver<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            cache: HashMap::new(),
            remaining: None,
            stats: ResolverStats::new(),
        }
    }

    /// The underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Owners whose repository lists are cached
    #[must_use]
    pub fn cached_owners(&self) -> usize {
        self.cache.len()
    }

    /// Charge one call against the budget, fetching it first if unknown.
    fn take_budget(&mut self) -> std::result::Result<(), UnavailableReason> {
        let remaining = match self.remaining {
            Some(remaining) => remaining,
            None => {
                let response = self.host.rate_limit().map_err(|e| {
                    tracing::warn!("Could not read GitHub rate limit: {}", e);
                    unavailable_reason(&e)
                })?;
                response.rate.remaining
            }
        };
        tracing::debug!("GitHub API calls remaining: {}", remaining);

        if remaining == 0 {
            self.remaining = Some(0);
            return Err(UnavailableReason::RateLimited);
        }
        self.remaining = Some(remaining - 1);
        self.stats.api_calls += 1;
        Ok(())
    }

    /// Fetch an owner's repositories, organization endpoint first.
    ///
    /// An owner unknown to both endpoints has no repositories.
    fn fetch_owner(
        &mut self,
        owner: &str,
    ) -> std::result::Result<Vec<RepositorySummary>, UnavailableReason> {
        let mut last_error = None;
        for kind in OwnerKind::LOOKUP_ORDER {
            self.take_budget()?;
            match self.host.list_repositories(kind, owner) {
                Ok(Some(repos)) => return Ok(repos),
                Ok(None) => {
                    tracing::debug!("No GitHub {} named '{}'", kind.path_segment(), owner);
                }
                Err(e) => {
                    tracing::debug!("Listing {}/{} failed: {}", kind.path_segment(), owner, e);
                    last_error = Some(unavailable_reason(&e));
                }
            }
        }
        last_error.map_or_else(|| Ok(Vec::new()), Err)
    }

    fn license_from_list(&mut self, owner: &str, project: &str) -> LookupOutcome {
        let license = self
            .cache
            .get(owner)
            .and_then(|repos| repos.iter().find(|repo| repo.name == project))
            .and_then(RepositorySummary::spdx_id)
            .map(str::to_string);
        match license {
            Some(id) => {
                tracing::debug!("GitHub identified license as '{}'", id);
                self.stats.found += 1;
                LookupOutcome::Found(id)
            }
            None => LookupOutcome::NotFound,
        }
    }
}

impl<H: RepositoryHost> LicenseResolver for GitHubLicenseResolver<H> {
    fn lookup_license_for_url(&mut self, url: &str) -> LookupOutcome {
        self.stats.lookups += 1;
        let Some(repo) = RepositoryUrl::parse(url).filter(RepositoryUrl::is_github) else {
            self.stats.unsupported += 1;
            return LookupOutcome::NotFound;
        };

        if self.cache.contains_key(&repo.owner) {
            self.stats.cache_hits += 1;
            return self.license_from_list(&repo.owner, &repo.project);
        }

        tracing::info!("Looking up '{}' in GitHub", url);
        match self.fetch_owner(&repo.owner) {
            Ok(repos) => {
                self.cache.insert(repo.owner.clone(), repos);
                self.license_from_list(&repo.owner, &repo.project)
            }
            Err(reason) => {
                match reason {
                    UnavailableReason::RateLimited => self.stats.rate_limited += 1,
                    _ => self.stats.unavailable += 1,
                }
                tracing::warn!("GitHub lookup for '{}' unavailable: {}", url, reason);
                LookupOutcome::Unavailable(reason)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats {
            remaining_budget: self.remaining,
            ..self.stats.clone()
        }
    }
}

fn unavailable_reason(err: &ScanError) -> UnavailableReason {
    match err {
        ScanError::Lookup {
            source: LookupErrorKind::InvalidResponse(msg),
            ..
        } => UnavailableReason::UnexpectedResponse(msg.clone()),
        other => UnavailableReason::Transport(other.to_string()),
    }
}
