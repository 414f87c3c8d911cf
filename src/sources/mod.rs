//! Source drivers.
//!
//! Each driver knows one way of discovering a project's dependencies. The
//! scan runs them in a fixed order (manual entries, Swift packages, build
//! prerequisites) and merges each driver's batch before the next one runs,
//! so an earlier driver's view of a dependency wins.

mod manual;
mod prereqs;
mod swift;
mod traits;
mod walk;

pub use manual::{ManualSource, DEFAULT_MANUAL_FILE};
pub use prereqs::{host_platform, PrereqEntry, Prerequisite, PrereqsSource, NESTED_INVENTORY};
pub use swift::{parse_package_resolved, SwiftPackageSource};
pub use traits::LicenseSource;
pub use walk::ProjectTree;

/// The standard drivers in priority order.
///
/// `platform` overrides the `<OS>-<arch>` checkout directory of the prereqs
/// driver; the running host's is used otherwise.
#[must_use]
pub fn default_sources(
    tree: &ProjectTree,
    manual_file: &str,
    platform: Option<&str>,
) -> Vec<Box<dyn LicenseSource>> {
    let prereqs = match platform {
        Some(platform) => PrereqsSource::with_platform(tree.clone(), platform),
        None => PrereqsSource::new(tree.clone()),
    };
    vec![
        Box::new(ManualSource::new(tree.clone(), manual_file)),
        Box::new(SwiftPackageSource::new(tree.clone())),
        Box::new(prereqs),
    ]
}
