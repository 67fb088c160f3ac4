use thiserror::Error;

/// Top-level error type for the relay runtime.
///
/// These never escape the relay's public entry points; handlers log them
/// and degrade to a no-op per the host's silent-failure conventions.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("deletion confirmed for '{0}' without a captured snapshot")]
    SnapshotMissing(String),

    #[error("completion signal carried no usable plugin identifiers")]
    NoIdentifiers,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why an edit request was rejected.
///
/// Rejections are logged at debug level and dropped, matching the host's
/// silent-abort convention for that request type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditRejection {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("request token failed verification")]
    BadToken,

    #[error("actor lacks capability '{0}'")]
    CapabilityDenied(String),

    #[error("'{file}' does not belong to plugin '{plugin}'")]
    ForeignFile { file: String, plugin: String },

    #[error("path traversal rejected: {0}")]
    PathTraversal(String),

    #[error("target file missing or not writable: {0}")]
    NotWritable(String),
}
