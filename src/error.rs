//! Error types for pattern compilation, word indexing and enumeration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an engine or moving a cursor
#[derive(Error, Debug)]
pub enum Error {
    #[error("Pattern too long: maximum {max} positions")]
    PatternTooLong { max: usize },

    #[error("Invalid pattern: '?' at end of input (byte {position})")]
    DanglingEscape { position: usize },

    #[error("Invalid pattern specifier: ?{}", .spec.escape_ascii())]
    SpecifierInvalid { spec: u8 },

    #[error("Invalid pattern: ?W (word placeholder) is required")]
    WordPlaceholderMissing,

    #[error("Invalid pattern: only one ?W allowed (second at position {position})")]
    WordPlaceholderDuplicated { position: usize },

    #[error("Custom charset ?{slot} is referenced before it is defined")]
    UndefinedReference { slot: u8 },

    #[error("Custom charset ?{slot} is empty")]
    EmptyCharset { slot: u8 },

    #[error("Custom charset ?{slot} exceeds {max} characters")]
    CharsetCapacityExceeded { slot: u8, max: usize },

    #[error("Invalid custom charset slot {slot}: expected 1-4")]
    InvalidSlot { slot: u8 },

    #[error("Wordlist is empty")]
    EmptyWordlist,

    #[error("Wordlist too large: {count} entries")]
    CapacityExceeded { count: u64 },

    #[error("Seek offset {offset} past keyspace {keyspace}")]
    OffsetOutOfRange { offset: u64, keyspace: u64 },

    #[error("Cannot read wordlist {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O failure with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors a caller can recover from without rebuilding the engine
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OffsetOutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
