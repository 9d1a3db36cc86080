//! Error types for table compilation.

use crate::source::UcdFile;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported while reading or parsing UCD tables.
///
/// Only [`Error::Io`] and [`Error::MissingSource`] stop a compilation; the
/// line-level variants are logged by the parsers, and the offending line is
/// skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// A source table could not be read from disk.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source table required by the compiler was never supplied.
    #[error("missing UCD source table {0}")]
    MissingSource(UcdFile),

    /// A row had the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field that should hold a code point (or range) did not.
    #[error("line {line}: invalid code point `{value}`")]
    InvalidCodePoint { line: usize, value: String },

    /// A numeric field (e.g. canonical combining class) did not parse.
    #[error("line {line}: invalid number `{value}`")]
    InvalidNumber { line: usize, value: String },

    /// A case mapping longer than three code points.
    #[error("line {line}: case mapping of {len} code points exceeds 3")]
    MappingTooLong { line: usize, len: usize },
}
