// ============================================================
// Error Types
// ============================================================
// One error enum for the whole library. Injected load/fit
// functions return anyhow::Error, which is carried through
// unchanged in the Model variant.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::artifact::ArtifactFormat;

/// Result type alias for ptmlib operations.
pub type Result<T> = std::result::Result<T, PtmError>;

/// Errors that can occur in ptmlib operations.
#[derive(Error, Debug)]
pub enum PtmError {
    /// An object was used out of order (e.g. `stop()` before `start()`).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pickle serialization/deserialization failed (history files).
    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),

    /// Chart drawing failed.
    #[error("chart error: {0}")]
    Chart(String),

    /// PNG encoding/decoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// An injected load, fit or save function failed.
    #[error("model error: {0}")]
    Model(#[from] anyhow::Error),

    /// The artifact adapter cannot handle this format.
    #[error("unsupported artifact format {format:?} for '{path}'")]
    UnsupportedFormat {
        /// Requested format.
        format: ArtifactFormat,
        /// Artifact path that was requested.
        path: PathBuf,
    },
}
