use std::io;

use thiserror::Error;

/// Errors surfaced by rendering and by the typed boundary around it.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Font embedding or serialization failed in the document emitter.
    #[error("document emitter failed: {0}")]
    Emitter(#[from] io::Error),

    #[error("invalid date `{0}`: expected YYYY-MM-DD or an ISO 8601 timestamp")]
    InvalidDate(String),

    #[error("unknown invoice status `{0}`")]
    UnknownStatus(String),

    #[error("unknown layout variant `{0}`: expected `simple` or `detailed`")]
    UnknownLayoutVariant(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
