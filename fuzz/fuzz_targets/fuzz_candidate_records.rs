#![no_main]
use libfuzzer_sys::fuzz_target;
use license_scanner::{Aggregator, CandidateRecord, Inventory, LicenseRegistry, NoOpResolver};
use std::sync::{Arc, OnceLock};

static REGISTRY: OnceLock<Arc<LicenseRegistry>> = OnceLock::new();

/// Fuzz manual license list parsing and the merge that follows it.
///
/// Any list that parses must either merge cleanly or be rejected as a
/// whole, and every used-by list must stay sorted.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(records) = CandidateRecord::parse_list(s, "fuzz") else {
        return;
    };
    let registry = REGISTRY.get_or_init(|| Arc::new(LicenseRegistry::builtin()));
    let mut aggregator = Aggregator::new(Arc::clone(registry), Box::new(NoOpResolver));
    let mut inventory = Inventory::new();
    if aggregator.merge_batch("fuzz", records, &mut inventory).is_err() {
        assert!(inventory.is_empty());
        return;
    }
    for entry in inventory.iter() {
        if let Some(used_by) = &entry.used_by {
            assert!(used_by.as_slice().windows(2).all(|w| w[0] < w[1]));
        }
    }
});
