//! Error types for the fondsreport-core library.

use thiserror::Error;

/// Main error type for the fondsreport library.
#[derive(Error, Debug)]
pub enum FondsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Table parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised by the table parsers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A recognized value could not be converted to a number.
    #[error("invalid number in column {column}: {value:?}")]
    Number { column: &'static str, value: String },
}

/// A German-formatted number that does not convert to a float.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a German decimal number: {value:?}")]
pub struct NumberError {
    /// The offending input.
    pub value: String,
}

impl ParseError {
    pub(crate) fn number(column: &'static str, err: NumberError) -> Self {
        ParseError::Number {
            column,
            value: err.value,
        }
    }
}

/// Result type for the fondsreport library.
pub type Result<T> = std::result::Result<T, FondsError>;
