//! Error types for `TagForge`

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The error type for `TagForge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tag file could not be read from or written to disk.
    #[error("failed to access {path}: {source}")]
    FileAccess {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Codec Errors ====================
    /// The stream ended before a declared count or size was satisfied.
    #[error("truncated {structure}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// The structure being read.
        structure: &'static str,
        /// Bytes the structure declared.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// A declared size disagrees with the size implied by the layout.
    #[error("size mismatch in {structure}: expected {expected} bytes, found {found}")]
    SizeMismatch {
        /// The structure being read or written.
        structure: &'static str,
        /// Size implied by the layout or discriminant.
        expected: usize,
        /// Size actually declared or produced.
        found: usize,
    },

    /// An enumerated value has no declared mapping.
    #[error("unknown {field} value: {value:#x}")]
    UnknownEnum {
        /// The field holding the value.
        field: &'static str,
        /// The raw value.
        value: u32,
    },

    /// A block header carried the wrong marker.
    #[error("invalid block marker in {structure}: expected tbfd, found {found}")]
    InvalidBlockMarker {
        /// The structure being read.
        structure: &'static str,
        /// The marker that was found.
        found: String,
    },

    /// Trailing string bytes are not valid UTF-8.
    #[error("invalid UTF-8 in {structure}")]
    InvalidUtf8 {
        /// The string field being read.
        structure: &'static str,
    },

    /// A terminated string did not end in NUL.
    #[error("missing NUL terminator in {structure}: found {found:#04x}")]
    MissingTerminator {
        /// The string field being read.
        structure: &'static str,
        /// The byte found where the terminator belongs.
        found: u8,
    },

    /// A value does not fit the on-disk field that stores it.
    #[error("{field} value {value} does not fit its on-disk field")]
    ValueOutOfRange {
        /// The field being written.
        field: &'static str,
        /// The offending value.
        value: usize,
    },

    // ==================== Override Errors ====================
    /// A patch override named an unknown field or carried the wrong value type.
    #[error("invalid override '{path}': {reason}")]
    InvalidOverride {
        /// The override's field path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// JSON parsing error (override files).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== Batch Errors ====================
    /// A file in a batch failed to convert.
    #[error(transparent)]
    Conversion(Box<ConversionError>),
}

impl Error {
    /// Shorthand for [`Error::UnknownEnum`].
    pub(crate) fn unknown_enum(field: &'static str, value: impl Into<u32>) -> Self {
        Error::UnknownEnum {
            field,
            value: value.into(),
        }
    }
}

/// A specialized Result type for `TagForge` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage a conversion failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Classify,
    Synthesize,
    Patch,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Classify => "classify",
            Stage::Synthesize => "synthesize",
            Stage::Patch => "patch",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// A failed conversion: the stage it stopped in and the underlying error.
#[derive(Error, Debug)]
#[error("conversion failed during {stage}: {source}")]
pub struct ConversionError {
    /// The stage that failed.
    pub stage: Stage,
    /// The underlying error, naming the offending structure or field.
    #[source]
    pub source: Error,
}

impl ConversionError {
    pub(crate) fn at(stage: Stage) -> impl FnOnce(Error) -> Self {
        move |source| ConversionError { stage, source }
    }
}

/// Non-fatal findings surfaced alongside a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The parse finished before the end of the stream.
    TrailingBytes {
        /// The structure that was parsed.
        structure: &'static str,
        /// Number of unread bytes.
        count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TrailingBytes { structure, count } => {
                write!(f, "{count} trailing bytes after {structure}")
            }
        }
    }
}
