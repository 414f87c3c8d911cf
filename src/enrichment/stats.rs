//! License lookup statistics.

use serde::{Deserialize, Serialize};

/// Counters kept by a license resolver over its lifetime.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverStats {
    /// Number of URLs passed to the resolver
    pub lookups: usize,
    /// URLs whose host the resolver does not serve
    pub unsupported: usize,
    /// Lookups answered from the per-owner cache
    pub cache_hits: usize,
    /// Listing requests sent to the hosting service
    pub api_calls: usize,
    /// Lookups that returned a license id
    pub found: usize,
    /// Lookups that failed because the call budget was spent
    pub rate_limited: usize,
    /// Lookups that failed for any other service reason
    pub unavailable: usize,
    /// Remaining call budget, once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_budget: Option<u64>,
}

impl ResolverStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty stats (alias for default, for the null resolver)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lookups that could not be answered because of the service
    #[must_use]
    pub const fn degraded(&self) -> usize {
        self.rate_limited + self.unavailable
    }

    /// Log a summary of the lookups made during a scan
    pub fn log_summary(&self, resolver: &str) {
        if self.lookups == 0 {
            return;
        }
        tracing::info!(
            "{} lookups: {} requested, {} found, {} cache hits, {} API calls, {} unsupported hosts",
            resolver,
            self.lookups,
            self.found,
            self.cache_hits,
            self.api_calls,
            self.unsupported
        );
        if self.degraded() > 0 {
            tracing::warn!(
                "{} lookups degraded: {} rate limited, {} unavailable",
                resolver,
                self.rate_limited,
                self.unavailable
            );
        }
        if let Some(remaining) = self.remaining_budget {
            tracing::debug!("{} API calls remaining: {}", resolver, remaining);
        }
    }
}
