//! Pipeline orchestration for scan and report workflows.
//!
//! This module holds the orchestration shared by the CLI command handlers:
//! running the source drivers against an aggregator and reading or writing
//! the resulting inventory.

mod output;
mod scan;

pub use output::{read_inventory, write_inventory, write_output, OutputTarget};
pub use scan::{run_sources, scan, ScanOutcome};

/// Process exit codes
pub mod exit_codes {
    /// The command completed
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
    /// Invalid configuration
    pub const CONFIG_ERROR: i32 = 2;
}
