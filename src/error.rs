//! Error types for salary-dash operations.
//!
//! Empty filter results are not errors: every consumer of a filtered view
//! degrades locally (see [`crate::chart::ChartResult`]). The variants here are
//! infrastructure failures only.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in salary-dash operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, terminal, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV decoding error raised by the arrow reader.
    #[error("CSV error: {0}")]
    Csv(#[from] arrow_schema::ArrowError),

    /// A required dataset column is absent from the header.
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A required cell is empty.
    #[error("null value in column '{column}' at row {row}")]
    NullValue {
        /// Column name.
        column: &'static str,
        /// Zero-based data row index.
        row: usize,
    },

    /// A categorical cell holds a value outside the known levels.
    #[error("unknown value '{value}' in column '{column}' at row {row}")]
    UnknownCategory {
        /// Column name.
        column: &'static str,
        /// Offending value.
        value: String,
        /// Zero-based data row index.
        row: usize,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Scale domain error (e.g., equal domain bounds).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Chart specification could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingColumn("salario_usd");
        assert!(err.to_string().contains("salario_usd"));
    }

    #[test]
    fn test_unknown_category_display() {
        let err = Error::UnknownCategory {
            column: "senioridade",
            value: "estagiario".to_string(),
            row: 7,
        };
        let display = err.to_string();
        assert!(display.contains("estagiario"));
        assert!(display.contains('7'));
    }

    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = Error::ConfigParse {
            line: 42,
            message: "invalid value".to_string(),
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("invalid value"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "df_final.csv");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
