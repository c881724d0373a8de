//! Error type for extraction and merge runs.
//!
//! Every variant is fatal: a run that hits one writes nothing.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceLocation;

#[derive(Debug, Error)]
pub enum Error {
    /// A call site could not be split into key and optional value.
    #[error("cannot parse translation call at {location}: {reason}")]
    Parse {
        location: SourceLocation,
        reason: String,
    },

    /// The same key was extracted twice with different explicit values.
    #[error(
        "duplicate translation key '{key}' with different values in {location}\n  {key} = {value}\n  {key} = {previous} (first seen at {previous_location})"
    )]
    Conflict {
        key: String,
        value: String,
        previous: String,
        location: SourceLocation,
        previous_location: SourceLocation,
    },

    /// A call site contains bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in translation call at {location}: {source}")]
    Encoding {
        location: SourceLocation,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to serialize locale '{locale}': {source}")]
    Serialization {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored locale file is not a JSON object.
    #[error("invalid locale file for '{locale}': {reason}")]
    InvalidDocument { locale: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source location for errors caused by a call site in a scanned file.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Error::Parse { location, .. }
            | Error::Conflict { location, .. }
            | Error::Encoding { location, .. } => Some(location),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
