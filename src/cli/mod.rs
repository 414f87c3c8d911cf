//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod report;
mod scan;

pub use report::{run_report, ReportConfig};
pub use scan::{load_registry, run_scan, scan_project};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
