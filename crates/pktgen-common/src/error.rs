//! Error types for the pktgen pipeline
//!
//! Every variant is fatal: no stage recovers or retries, the run aborts and
//! the error is surfaced to the operator with enough context to diagnose
//! which stage failed. Partially-written output is left in place for
//! inspection.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the preparation pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    /// The anchor line preceding the identifier declarations was never seen.
    /// Without it the rest of the listing format is unknown, so extraction
    /// stops before producing any table.
    #[error("marker line {marker:?} not found in listing. The upstream source layout may have changed.")]
    MarkerNotFound { marker: String },

    /// Remote resource responded, but not with a usable payload
    #[error("fetching '{url}' failed with status {status}")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Transport-level HTTP failure
    #[error("network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Repository snapshot retrieval failed
    #[error("cloning '{url}' failed: {detail}")]
    Clone { url: String, detail: String },

    /// Staging collision or missing source tree
    #[error("staging failed: {0}")]
    Staging(String),

    /// The external code generator exited non-zero; carries its captured
    /// output so the operator can diagnose the failure
    #[error("code generator exited with status {status:?}:\n{output}")]
    Generation { status: Option<i32>, output: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrepError {
    /// Create a marker-not-found error
    pub fn marker_not_found(marker: impl Into<String>) -> Self {
        Self::MarkerNotFound {
            marker: marker.into(),
        }
    }

    /// Create a staging error
    pub fn staging(msg: impl Into<String>) -> Self {
        Self::Staging(msg.into())
    }
}
