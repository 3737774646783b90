//! Rule-based table parsers for the fund reports.

pub mod companies;
pub mod netflow;
pub mod numbers;
pub mod patterns;
pub mod volume;

pub use companies::{CompanyParser, LineClass, PendingName};
pub use netflow::{NetFlowParser, ShortRowPolicy};
pub use numbers::{decimal_tokens, format_german_number, is_candidate_row, parse_german_number};
pub use patterns::*;
pub use volume::VolumeParser;

use crate::error::ParseError;

/// Trait for table parsers.
pub trait TableParser {
    /// The row type this parser produces.
    type Row;

    /// Parse every recognized row from the extracted text.
    ///
    /// An empty vector means no table was recognized, which is not an error.
    fn parse(&self, text: &str) -> Result<Vec<Self::Row>, ParseError>;
}
