//! A lightweight data patch framework for SQLite.
//!
//! A data patch is a one-shot setup operation (schema change or seed data)
//! that must run at most once per database. Applied patches are tracked in a
//! `_patches` ledger table; the runner linearizes patches by their declared
//! dependencies and executes each pending one inside its own transaction.

mod ledger;
mod runner;
mod setup;

pub use crate::ledger::{applied_patches, ensure_ledger_table, has_applied, record_applied};
pub use crate::runner::apply_all;
pub use crate::setup::DataSetup;

pub use rusqlite::types::Value;

use thiserror::Error;

/// Custom error type for patch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Patch execution failed
    #[error("patch '{id}' failed: {message}")]
    PatchFailed { id: String, message: String },

    /// A patch names a dependency that is not registered
    #[error("patch '{id}' depends on unknown patch '{dependency}'")]
    UnknownDependency { id: String, dependency: String },

    /// The declared dependencies form a cycle
    #[error("dependency cycle involving patch '{id}'")]
    DependencyCycle { id: String },

    /// A row passed to a multi-row insert does not match the column list
    #[error("multi-row insert expects {columns} values per row, got {values}")]
    ArityMismatch { columns: usize, values: usize },
}

pub type PatchResult<T> = std::result::Result<T, Error>;

/// A single setup operation, identified by a stable name.
///
/// Patches carry no built-in idempotency: `apply` performs its side effect
/// unconditionally. Running a patch at most once per database is the runner's
/// job, via the `_patches` ledger.
pub trait DataPatch {
    /// Stable unique identity for this patch. The ledger is keyed by it.
    fn id(&self) -> &'static str;

    /// Ids of patches that must be applied before this one.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Prior identities of this patch. A ledger entry under any alias counts
    /// as applied, so a renamed patch does not run again.
    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    /// Performs the patch's side effect against the given setup handle.
    ///
    /// The runner invokes this inside a transaction; on error the whole patch
    /// is rolled back and the run aborts.
    fn apply(&self, setup: &mut DataSetup<'_>) -> PatchResult<()>;
}
