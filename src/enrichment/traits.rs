//! Resolver traits for looking up a license by repository URL.
//!
//! This module provides the `LicenseResolver` trait, the outcome type every
//! resolver reports, and a null resolver for when lookups are disabled.

use super::ResolverStats;
use std::fmt;

/// Why a lookup could not be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The remaining-call budget is spent
    RateLimited,
    /// The request did not complete
    Transport(String),
    /// The service answered with something unexpected
    UnexpectedResponse(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "API rate limit exhausted"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::UnexpectedResponse(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

/// Result of a single URL lookup.
///
/// Service failures are values, not errors: a scan degrades to an unknown
/// license instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The repository declares this license id
    Found(String),
    /// Unsupported host, unknown repository, or no declared license
    NotFound,
    /// The service could not be asked
    Unavailable(UnavailableReason),
}

impl LookupOutcome {
    /// The license id, when one was found
    #[must_use]
    pub fn license_id(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound | Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Trait for license resolvers.
///
/// Resolvers own mutable state (caches, call budgets), so lookups take
/// `&mut self` and a resolver is driven by a single owner.
///
/// # Example
///
/// ```ignore
/// use license_scanner::enrichment::{LicenseResolver, NoOpResolver, GitHubResolver};
///
/// let resolver: Box<dyn LicenseResolver> = if config.lookup.enabled {
///     Box::new(GitHubResolver::from_config(client_config)?)
/// } else {
///     Box::new(NoOpResolver)
/// };
/// ```
pub trait LicenseResolver {
    /// Look up the license declared by the repository at `url`.
    fn lookup_license_for_url(&mut self, url: &str) -> LookupOutcome;

    /// Get the name of this resolver (e.g., "GitHub").
    fn name(&self) -> &'static str;

    /// Counters accumulated so far.
    fn stats(&self) -> ResolverStats;
}

/// A resolver that never finds anything.
///
/// Use this when lookups are disabled or the `enrichment` feature is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl NoOpResolver {
    /// Create a new no-op resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LicenseResolver for NoOpResolver {
    fn lookup_license_for_url(&mut self, _url: &str) -> LookupOutcome {
        LookupOutcome::NotFound
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats::empty()
    }
}

impl<R: LicenseResolver + ?Sized> LicenseResolver for Box<R> {
    fn lookup_license_for_url(&mut self, url: &str) -> LookupOutcome {
        (**self).lookup_license_for_url(url)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn stats(&self) -> ResolverStats {
        (**self).stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_resolver() {
        let mut resolver = NoOpResolver::new();
        assert_eq!(resolver.name(), "NoOp");
        assert_eq!(
            resolver.lookup_license_for_url("https://github.com/a/b"),
            LookupOutcome::NotFound
        );
        assert_eq!(resolver.stats(), ResolverStats::empty());
    }

    #[test]
    fn test_outcome_license_id() {
        assert_eq!(LookupOutcome::Found("MIT".into()).license_id(), Some("MIT"));
        assert_eq!(LookupOutcome::NotFound.license_id(), None);
        let unavailable = LookupOutcome::Unavailable(UnavailableReason::RateLimited);
        assert_eq!(unavailable.license_id(), None);
        assert!(unavailable.is_unavailable());
    }

    #[test]
    fn test_boxed_resolver() {
        let mut resolver: Box<dyn LicenseResolver> = Box::new(NoOpResolver);
        assert_eq!(resolver.name(), "NoOp");
        assert!(resolver.lookup_license_for_url("x").license_id().is_none());
    }
}
