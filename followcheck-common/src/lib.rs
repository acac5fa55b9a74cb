//! Shared error types and observability helpers for the followcheck workspace.
//!
//! A followcheck run is one linear pipeline (prompt, login, fetch, reconcile,
//! persist, report) with a single error sink at the top. [`RunError`] tags
//! every failure with the stage that produced it so the sink and the tests
//! can tell failure causes apart.

pub mod observability;

/// Error types used across the followcheck run.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The credential prompt was cancelled or produced invalid input.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Session construction, the pre-login handshake, or login rejected.
    #[error("authentication failed: {0}")]
    Auth(#[source] anyhow::Error),

    /// A feed drain failed mid-pagination.
    #[error("fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),

    /// A list could not be written to the data directory.
    #[error("persist failed: {0}")]
    Persist(#[source] anyhow::Error),
}

impl RunError {
    /// Short stage tag, suitable as a structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            RunError::Prompt(_) => "prompt",
            RunError::Auth(_) => "auth",
            RunError::Fetch(_) => "fetch",
            RunError::Persist(_) => "persist",
        }
    }
}

/// Convenient alias for results that use [`RunError`].
pub type Result<T> = std::result::Result<T, RunError>;
