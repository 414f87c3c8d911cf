//! License identification.
//!
//! Turns the raw license text and repository URL of a dependency into a
//! registry entry. Local text is always tried first; the resolver is only
//! consulted when the text is missing or unrecognized.

use crate::enrichment::{LicenseResolver, LookupOutcome, ResolverStats};
use crate::registry::{LicenseRegistry, RegistryEntry};
use std::sync::Arc;

/// How a license was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentificationMethod {
    /// The license text matched the registry
    Registry,
    /// The hosting service reported a license id for the repository URL
    RepositoryLookup,
}

/// A successfully identified license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// Canonical license name
    pub name: String,
    pub spdx_id: String,
    pub is_osi_approved: bool,
    pub method: IdentificationMethod,
}

impl Identification {
    fn from_entry(entry: &RegistryEntry, method: IdentificationMethod) -> Self {
        Self {
            name: entry.name.clone(),
            spdx_id: entry.license_id.clone(),
            is_osi_approved: entry.is_osi_approved,
            method,
        }
    }
}

/// Registry search with a resolver fallback.
pub struct LicenseIdentifier {
    registry: Arc<LicenseRegistry>,
    resolver: Box<dyn LicenseResolver>,
}

impl LicenseIdentifier {
    pub fn new(registry: Arc<LicenseRegistry>, resolver: Box<dyn LicenseResolver>) -> Self {
        Self { registry, resolver }
    }

    #[must_use]
    pub fn registry(&self) -> &LicenseRegistry {
        &self.registry
    }

    #[must_use]
    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    #[must_use]
    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    /// Identify a license from its raw text and the repository URL.
    ///
    /// Returns `None` when neither source yields a registry entry, including
    /// when the lookup service is unavailable.
    pub fn identify(&mut self, raw: Option<&str>, url: Option<&str>) -> Option<Identification> {
        if let Some(entry) = raw.and_then(|text| self.registry.search_by_name_or_id(text)) {
            return Some(Identification::from_entry(
                entry,
                IdentificationMethod::Registry,
            ));
        }

        let url = url.filter(|url| !url.trim().is_empty())?;
        match self.resolver.lookup_license_for_url(url) {
            LookupOutcome::Found(id) => {
                let entry = self.registry.get_by_id(&id);
                if entry.is_none() {
                    tracing::debug!("License id '{}' reported for {} is not in the registry", id, url);
                }
                entry.map(|entry| {
                    Identification::from_entry(entry, IdentificationMethod::RepositoryLookup)
                })
            }
            LookupOutcome::NotFound => None,
            LookupOutcome::Unavailable(reason) => {
                tracing::debug!("No license lookup for {}: {}", url, reason);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{NoOpResolver, UnavailableReason};

    /// Resolver answering every URL with a fixed outcome.
    struct FixedResolver(LookupOutcome);

    impl LicenseResolver for FixedResolver {
        fn lookup_license_for_url(&mut self, _url: &str) -> LookupOutcome {
            self.0.clone()
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn stats(&self) -> ResolverStats {
            ResolverStats::empty()
        }
    }

    /// Resolver that must never be asked.
    struct PanickingResolver;

    impl LicenseResolver for PanickingResolver {
        fn lookup_license_for_url(&mut self, url: &str) -> LookupOutcome {
            panic!("resolver consulted for {url}");
        }

        fn name(&self) -> &'static str {
            "Panicking"
        }

        fn stats(&self) -> ResolverStats {
            ResolverStats::empty()
        }
    }

    fn with_resolver(resolver: impl LicenseResolver + 'static) -> LicenseIdentifier {
        LicenseIdentifier::new(Arc::new(LicenseRegistry::builtin()), Box::new(resolver))
    }

    #[test]
    fn test_registry_match_skips_resolver() {
        let mut identifier = with_resolver(PanickingResolver);
        let found = identifier
            .identify(Some("0BSD"), Some("https://github.com/a/b"))
            .unwrap();
        assert_eq!(found.spdx_id, "0BSD");
        assert_eq!(found.method, IdentificationMethod::Registry);
        assert!(found.is_osi_approved);
    }

    #[test]
    fn test_lookup_when_text_missing() {
        let mut identifier = with_resolver(FixedResolver(LookupOutcome::Found("MIT".into())));
        let found = identifier.identify(None, Some("https://github.com/a/b")).unwrap();
        assert_eq!(found.spdx_id, "MIT");
        assert_eq!(found.name, "MIT License");
        assert_eq!(found.method, IdentificationMethod::RepositoryLookup);
    }

    #[test]
    fn test_lookup_when_text_unrecognized() {
        let mut identifier = with_resolver(FixedResolver(LookupOutcome::Found("Zlib".into())));
        let found = identifier
            .identify(Some("Custom License"), Some("https://github.com/madler/zlib"))
            .unwrap();
        assert_eq!(found.spdx_id, "Zlib");
    }

    #[test]
    fn test_lookup_id_not_in_registry() {
        let mut identifier = with_resolver(FixedResolver(LookupOutcome::Found("NOASSERTION".into())));
        assert!(identifier.identify(None, Some("https://github.com/a/b")).is_none());
    }

    #[test]
    fn test_unavailable_degrades_to_none() {
        let mut identifier = with_resolver(FixedResolver(LookupOutcome::Unavailable(
            UnavailableReason::RateLimited,
        )));
        assert!(identifier.identify(None, Some("https://github.com/a/b")).is_none());
    }

    #[test]
    fn test_nothing_to_go_on() {
        let mut identifier = with_resolver(PanickingResolver);
        assert!(identifier.identify(None, None).is_none());
        assert!(identifier.identify(None, Some("  ")).is_none());

        let mut identifier = with_resolver(NoOpResolver);
        assert!(identifier.identify(Some("Proprietary"), Some("https://x.org/a/b")).is_none());
    }
}
