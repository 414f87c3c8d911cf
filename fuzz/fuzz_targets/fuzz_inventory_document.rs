#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz persisted inventory parsing, including nested checkout inventories.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = license_scanner::InventoryDocument::parse(s, "fuzz") {
            let _ = doc.to_json_pretty();
        }
    }
});
