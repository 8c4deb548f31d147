//! Error types for the merge crate.

use lm_diff::DiffError;

/// Errors surfaced by the checked merge entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// One of the two diffs against the base failed.
    #[error("diff failed: {0}")]
    Diff(#[from] DiffError),
}

/// Convenience alias for checked merge results.
pub type MergeOutcome<T> = Result<T, MergeError>;
