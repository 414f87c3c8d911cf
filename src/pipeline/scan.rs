//! Scan stage: run each source driver and merge its batch.

use crate::aggregate::{Aggregator, MergeStats};
use crate::enrichment::ResolverStats;
use crate::error::{ErrorContext, Result};
use crate::model::Inventory;
use crate::sources::LicenseSource;

/// What a scan produced.
#[derive(Debug)]
pub struct ScanOutcome {
    pub inventory: Inventory,
    /// Drivers that applied to the project, in run order
    pub sources_run: Vec<&'static str>,
    pub merge_stats: MergeStats,
    pub resolver_stats: ResolverStats,
}

impl ScanOutcome {
    /// Log the per-scan summary lines
    pub fn log_summary(&self, resolver_name: &str) {
        self.merge_stats.log_summary();
        self.resolver_stats.log_summary(resolver_name);
        let unknown = self.inventory.unknown_count();
        if unknown > 0 {
            tracing::warn!(
                "{} of {} dependencies have an unknown license",
                unknown,
                self.inventory.len()
            );
        }
    }
}

/// Run drivers strictly in order, merging each batch before the next driver.
///
/// A driver whose `should_run` is false is skipped entirely.
pub fn run_sources(
    aggregator: &mut Aggregator,
    module_name: &str,
    sources: &mut [Box<dyn LicenseSource>],
    inventory: &mut Inventory,
) -> Result<Vec<&'static str>> {
    let mut ran = Vec::new();
    for source in sources.iter_mut() {
        if !source.should_run() {
            tracing::debug!("Skipping the scanner '{}'", source.name());
            continue;
        }
        tracing::info!("Running the scanner '{}'", source.name());
        let records = source
            .produce()
            .with_context(|| format!("{} scanner", source.name()))?;
        aggregator
            .merge_batch(module_name, records, inventory)
            .with_context(|| format!("{} scanner", source.name()))?;
        ran.push(source.name());
    }
    Ok(ran)
}

/// Scan into a fresh inventory and collect the statistics.
pub fn scan(
    aggregator: &mut Aggregator,
    module_name: &str,
    sources: &mut [Box<dyn LicenseSource>],
) -> Result<ScanOutcome> {
    let mut inventory = Inventory::new();
    let sources_run = run_sources(aggregator, module_name, sources, &mut inventory)?;
    Ok(ScanOutcome {
        inventory,
        sources_run,
        merge_stats: *aggregator.stats(),
        resolver_stats: aggregator.resolver_stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::NoOpResolver;
    use crate::model::CandidateRecord;
    use crate::registry::LicenseRegistry;
    use std::sync::Arc;

    /// Driver returning a fixed batch.
    struct StaticSource {
        name: &'static str,
        applies: bool,
        records: Vec<CandidateRecord>,
    }

    impl LicenseSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn should_run(&mut self) -> bool {
            self.applies
        }

        fn produce(&mut self) -> Result<Vec<CandidateRecord>> {
            assert!(self.applies, "produce called on a skipped source");
            Ok(std::mem::take(&mut self.records))
        }
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(Arc::new(LicenseRegistry::builtin()), Box::new(NoOpResolver))
    }

    #[test]
    fn test_sources_run_in_order_and_skip() {
        let mut sources: Vec<Box<dyn LicenseSource>> = vec![
            Box::new(StaticSource {
                name: "first",
                applies: true,
                records: vec![CandidateRecord::new("lib").with_license("MIT")],
            }),
            Box::new(StaticSource {
                name: "skipped",
                applies: false,
                records: vec![CandidateRecord::new("other")],
            }),
            Box::new(StaticSource {
                name: "last",
                applies: true,
                records: vec![CandidateRecord::new("lib").with_license("Apache-2.0")],
            }),
        ];
        let mut agg = aggregator();
        let outcome = scan(&mut agg, "root", &mut sources).unwrap();
        assert_eq!(outcome.sources_run, ["first", "last"]);
        assert_eq!(outcome.inventory.len(), 1);
        assert_eq!(outcome.inventory.get("lib").unwrap().spdx_id.as_deref(), Some("MIT"));
        assert_eq!(outcome.merge_stats.added, 1);
        assert_eq!(outcome.merge_stats.merged, 1);
    }

    #[test]
    fn test_bad_batch_aborts_scan() {
        let mut sources: Vec<Box<dyn LicenseSource>> = vec![Box::new(StaticSource {
            name: "broken",
            applies: true,
            records: vec![CandidateRecord::default()],
        })];
        let err = scan(&mut aggregator(), "root", &mut sources).unwrap_err();
        assert!(err.to_string().contains("broken scanner"));
    }
}
