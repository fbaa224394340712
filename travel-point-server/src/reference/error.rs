//! Reference data error types.

use std::path::PathBuf;

/// Errors from loading or validating the reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Reading the dataset file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON for the expected shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset parsed but breaks an invariant
    #[error("invalid reference data: {0}")]
    Invalid(String),
}
