//! Report generation for license inventories.
//!
//! The HTML report lists every dependency as a collapsible item with its
//! project URL, license name and the registry's reference links.
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Inventory data is escaped before it is embedded, and only http(s) URLs
//! become links.

pub mod escape;
mod html;

pub use html::HtmlReporter;
