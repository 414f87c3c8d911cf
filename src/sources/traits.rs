//! Source driver trait.

use crate::error::Result;
use crate::model::CandidateRecord;

/// A mechanism for discovering dependencies and their license claims.
///
/// A driver is asked whether it applies to the project first; `produce` is
/// only called when `should_run` returned `true`, so a driver may remember
/// what it discovered in `should_run` and reuse it.
pub trait LicenseSource {
    /// Short name used in log output (e.g., "manual", "swift")
    fn name(&self) -> &'static str;

    /// Whether this driver finds anything to scan in the project.
    fn should_run(&mut self) -> bool;

    /// Produce the driver's candidate records, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Fails when a discovered input file breaks its format contract.
    fn produce(&mut self) -> Result<Vec<CandidateRecord>>;
}
