//! Error types for packforge-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a pack spec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The spec file could not be read (missing, permission denied, etc.).
    #[error("cannot read spec at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or a required field is missing / has the wrong shape.
    #[error("failed to parse spec at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Canonical re-serialization of the spec failed.
    #[error("cannot canonicalize spec: {0}")]
    Canonical(#[from] serde_json::Error),
}
