//! Error types for packforge-renderer.

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error, including context serialization.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Two module ids map to the same `prompts/` file name.
    #[error("modules '{first}' and '{second}' both render to prompts/{file}")]
    PromptCollision {
        file: String,
        first: String,
        second: String,
    },
}
