//! External license lookup.
//!
//! When a dependency carries no usable license text, its repository URL can
//! still identify it: the hosting service knows which license the repository
//! declares. Lookups go through the [`LicenseResolver`] trait so that the
//! identification pipeline never sees HTTP, and service problems come back as
//! [`LookupOutcome::Unavailable`] rather than as errors.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "enrichment")]
//! # {
//! use license_scanner::enrichment::{GitHubClientConfig, GitHubResolver, LicenseResolver};
//!
//! let mut resolver = GitHubResolver::from_config(GitHubClientConfig::default()).unwrap();
//! let outcome = resolver.lookup_license_for_url("https://github.com/madler/zlib");
//! println!("{:?}", outcome.license_id());
//! # }
//! ```

pub mod github;
mod stats;
mod traits;

#[cfg(feature = "enrichment")]
pub use github::{GitHubClient, GitHubClientConfig, GitHubResolver};
pub use github::{GitHubLicenseResolver, OwnerKind, RepositoryHost, RepositoryUrl};
pub use stats::ResolverStats;
pub use traits::{LicenseResolver, LookupOutcome, NoOpResolver, UnavailableReason};
