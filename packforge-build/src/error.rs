//! Error types for packforge-build.

use std::path::PathBuf;

use thiserror::Error;

use packforge_core::SpecError;
use packforge_renderer::RenderError;

/// All errors that can arise while building a pack.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The spec could not be loaded.
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip writer rejected an entry or failed to finish the archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walking the output tree failed.
    #[error("cannot walk output tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
