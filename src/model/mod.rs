//! Data model for license candidates and the reconciled inventory.
//!
//! Sources emit [`CandidateRecord`]s; the aggregator folds them into an
//! [`Inventory`] of [`InventoryEntry`] values, which is persisted as an
//! [`InventoryDocument`].

mod inventory;
mod record;
mod used_by;

pub use inventory::*;
pub use record::*;
pub use used_by::*;
