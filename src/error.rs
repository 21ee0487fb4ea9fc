use thiserror::Error;

/// Errors raised at the fallible edges of the crate
/// (file I/O, snapshot decoding, configuration, submissions).
///
/// The tokenizer, classifier and snippet extractor themselves never fail.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cbor error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    /// Blank user input and no uploaded files.
    #[error("Please provide text or upload files")]
    EmptySubmission,

    #[error("confidence threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Snapshot path with an extension we do not know how to decode.
    #[error("unknown snapshot format: {0:?}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, TaggerError>;
