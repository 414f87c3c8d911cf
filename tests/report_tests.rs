//! HTML report generation from inventory files.

use license_scanner::cli::{run_report, ReportConfig};
use license_scanner::config::RegistryConfig;
use license_scanner::pipeline::{read_inventory, write_inventory};
use license_scanner::{HtmlReporter, Inventory, InventoryEntry, LicenseRegistry};
use std::fs;
use std::path::PathBuf;

fn entry(name: &str, license: &str, spdx_id: Option<&str>) -> InventoryEntry {
    let mut e = InventoryEntry::new(name);
    e.license = license.to_string();
    e.spdx_id = spdx_id.map(str::to_string);
    e
}

fn sample_inventory() -> Inventory {
    let mut zlib = entry("zlib", "zlib License", Some("Zlib"));
    zlib.url = Some("https://github.com/madler/zlib".to_string());
    vec![
        zlib,
        entry("libfoo", "Unknown", None),
        entry("swift-log", "Apache License 2.0", Some("Apache-2.0")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn report_lists_every_dependency_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prereqs-licenses.json");
    write_inventory(&input, &sample_inventory(), None).unwrap();

    let doc = read_inventory(&input).unwrap();
    let html = HtmlReporter::new()
        .generate(&doc, &LicenseRegistry::builtin())
        .unwrap();

    let libfoo = html.find("<span class='caret'>libfoo</span>").unwrap();
    let swift_log = html.find("<span class='caret'>swift-log</span>").unwrap();
    let zlib = html.find("<span class='caret'>zlib</span>").unwrap();
    assert!(libfoo < swift_log && swift_log < zlib);

    assert!(html.contains("<a href='https://github.com/madler/zlib'>"));
    assert!(html.contains("https://spdx.org/licenses/Zlib.html"));
    assert!(html.contains("https://spdx.org/licenses/Apache-2.0.html"));
    assert_eq!(html.matches("See Also:").count(), 2);
}

#[test]
fn report_command_writes_file_with_local_license() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prereqs-licenses.json");
    write_inventory(&input, &sample_inventory(), None).unwrap();
    let license = dir.path().join("LICENSE");
    fs::write(&license, "Copyright (c) Example & Co.").unwrap();
    let output = dir.path().join("site").join("licenses.html");

    let config = ReportConfig {
        input,
        output: Some(output.clone()),
        local_license: Some(license),
        title: Some("Example Licenses".to_string()),
        quiet: true,
    };
    run_report(&config, &RegistryConfig::default()).unwrap();

    let html = fs::read_to_string(output).unwrap();
    assert!(html.contains("<title>Example Licenses</title>"));
    assert!(html.contains("This software is subject to the following license agreement."));
    assert!(html.contains("Copyright (c) Example &amp; Co."));
}

#[test]
fn report_uses_loaded_license_list_for_links() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("licenses.json");
    fs::write(
        &list,
        r#"{"licenseListVersion": "3.24", "licenses": [
            {"licenseId": "Zlib", "name": "zlib License", "isOsiApproved": true,
             "isDeprecatedLicenseId": false, "seeAlso": ["https://www.zlib.net/zlib_license.html"]}
        ]}"#,
    )
    .unwrap();
    let input = dir.path().join("prereqs-licenses.json");
    write_inventory(&input, &sample_inventory(), None).unwrap();
    let output = dir.path().join("licenses.html");

    let config = ReportConfig {
        input,
        output: Some(output.clone()),
        local_license: None,
        title: None,
        quiet: true,
    };
    let registry = RegistryConfig {
        license_list: Some(list),
    };
    run_report(&config, &registry).unwrap();

    let html = fs::read_to_string(output).unwrap();
    assert!(html.contains("https://www.zlib.net/zlib_license.html"));
    assert!(!html.contains("https://spdx.org/licenses/Apache-2.0.html"));
}

#[test]
fn report_rejects_missing_inventory() {
    let config = ReportConfig {
        input: PathBuf::from("/nonexistent/prereqs-licenses.json"),
        output: None,
        local_license: None,
        title: None,
        quiet: true,
    };
    assert!(run_report(&config, &RegistryConfig::default()).is_err());
}
