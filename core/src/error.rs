//! Error taxonomy of the format codecs.
//!
//! Every variant is fatal for the record being decoded; the recoverable cases
//! (scalar defaults, unknown letters, unknown IDSZs) never reach this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected ':' while reading {context}")]
    MissingDelimiter { line: usize, context: String },

    #[error("unknown file format id 0x{id:08X}")]
    UnknownFormat { id: u32 },

    #[error("{what} is {value}, maximum is {max}")]
    DimensionTooLarge {
        what: &'static str,
        value: usize,
        max: usize,
    },

    #[error("{section} section needs {needed} bytes, only {available} left")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("invalid {section} data: {detail}")]
    InvalidData {
        section: &'static str,
        detail: String,
    },

    #[error("tile dictionary needs {defs} definitions, hard maximum is {max}")]
    DictionaryTooLarge { defs: usize, max: usize },

    #[error("tile dictionary needs {defs} definitions, caller allowed {cap}")]
    DictionaryCapExceeded { defs: usize, cap: usize },

    #[error("unsupported {what} version {version}")]
    UnsupportedVersion { what: &'static str, version: i32 },

    #[error("registry: {0}")]
    RegistryState(String),
}

impl FormatError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormatError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file, which callers may
    /// treat as an absent optional asset.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FormatError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        let err = FormatError::io(
            "data.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());

        let err = FormatError::UnknownFormat { id: 1 };
        assert!(!err.is_not_found());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = FormatError::DimensionTooLarge {
            what: "tiles_x",
            value: 100_000,
            max: 1024,
        };
        assert_eq!(err.to_string(), "tiles_x is 100000, maximum is 1024");

        let err = FormatError::UnknownFormat { id: 0x1234 };
        assert_eq!(err.to_string(), "unknown file format id 0x00001234");
    }
}
