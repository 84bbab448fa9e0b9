//! Error types for update verify config operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum UpdateVerifyError {
    /// A config line could not be parsed. Aborts the whole read.
    #[error("line {line_no}: {kind}\n{line}")]
    Parse {
        line_no: usize,
        line: String,
        kind: ParseErrorKind,
    },

    /// No release matched the requested build id (and `from` path).
    #[error("release not found: build_id '{build_id}' from {from:?}")]
    ReleaseNotFound {
        build_id: String,
        from: Option<String>,
    },

    /// A locale that cannot be listed in a space-separated `locales` value.
    #[error("invalid locale '{0}': must be non-empty without whitespace")]
    InvalidLocale(String),

    /// A field value that would not read back as written.
    #[error("cannot write {key}={value:?}: {reason}")]
    Unwritable {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Underlying I/O failure on a config file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("multiple values found for key '{0}'")]
    DuplicateKey(String),

    /// Not tokenizable as `key="value"` pairs.
    #[error("malformed line at column {column}: {reason}")]
    Malformed { column: usize, reason: &'static str },

    #[error("release line is missing required key '{0}'")]
    MissingReleaseKey(&'static str),

    #[error("unknown patch type '{0}' (expected partial or complete)")]
    UnknownPatchType(String),
}

impl UpdateVerifyError {
    /// Parse kind, if this is a parse failure.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Self::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

pub type Result<T, E = UpdateVerifyError> = std::result::Result<T, E>;
