//! Error type shared by the decode and encode paths.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("invalid meta file (too small for header, need {need} bytes, got {got})")]
    TruncatedInput { need: usize, got: usize },

    #[error("version field is not valid ASCII")]
    InvalidEncoding,

    #[error("unsupported meta version \"{0}\" (expected \"{expected}\")", expected = crate::codec::SUPPORTED_VERSION)]
    UnsupportedVersion(String),

    #[error("invalid meta file size. Got {actual} bytes, expected {expected}")]
    SizeMismatch { actual: usize, expected: u64 },

    #[error("schema error: {0}")]
    SchemaError(String),

    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    #[error("\"{0}\" must be a list of 4 integers (0..255)")]
    InvalidColor(&'static str),

    #[error("\"flags\" must be a uint32 (0..4294967295)")]
    InvalidFlags,

    #[error("\"{0}\" does not fit in a uint32")]
    FieldOverflow(&'static str),

    #[error("version \"{0}\" too long for {size} bytes", size = crate::codec::VERSION_SIZE)]
    VersionTooLong(String),

    #[error("malformed text input: {0}")]
    MalformedText(#[from] serde_json::Error),
}
