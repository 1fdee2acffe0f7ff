//! Core error types.

use thiserror::Error;

/// Errors from the page boundary.
///
/// The orchestrator treats an absent element as normal flow, never as an
/// error; this type covers the transport underneath (a dead tab, a closed
/// session), which ends the current cycle.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page backend failed to execute an operation.
    #[error("page backend error: {0}")]
    Backend(String),
}

/// Errors from the direct analysis-request fallback.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The site answered with a non-success status.
    #[error("analysis request rejected: {status}")]
    Rejected { status: reqwest::StatusCode },
}
