//! Management company table.
//!
//! Company names and their volumes appear either on one line
//! ("Amundi 987,65") or wrapped, with the name on one line and the amount
//! on the next. The parser walks the lines with a single piece of state,
//! the name still waiting for its amount.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::models::table::CompanyRow;

use super::numbers::parse_german_number;
use super::patterns::{GERMAN_AMOUNT, HAS_LETTER, LEADING_AMOUNT, NAME_AMOUNT_SPLIT};
use super::TableParser;

/// Cross-line parser state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingName {
    #[default]
    None,
    /// A name line was read and its amount is expected on a later line.
    Pending(String),
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    /// Name and amount on one line.
    NameWithAmount { name: &'a str, amount: &'a str },
    /// Text without a usable amount; becomes the pending name.
    NameOnly(&'a str),
    /// Line starting with an amount.
    Amount(&'a str),
    Other,
}

impl<'a> LineClass<'a> {
    /// Classify a line. Surrounding whitespace is ignored.
    pub fn of(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return LineClass::Blank;
        }

        let has_letter = HAS_LETTER.is_match(line);
        if has_letter && GERMAN_AMOUNT.is_match(line) {
            if let Some(caps) = NAME_AMOUNT_SPLIT.captures(line) {
                let name = caps.name("name").map(|m| m.as_str().trim()).unwrap_or("");
                if !name.is_empty() {
                    return LineClass::NameWithAmount {
                        name,
                        amount: caps.name("amount").map_or("", |m| m.as_str()),
                    };
                }
            }
        }

        // A line opening with an amount is never a name, even with a unit after it
        if LEADING_AMOUNT.is_match(line) {
            return LineClass::Amount(line);
        }

        if has_letter {
            return LineClass::NameOnly(line);
        }

        LineClass::Other
    }
}

/// Parser for the management company report.
#[derive(Debug, Clone, Default)]
pub struct CompanyParser;

impl CompanyParser {
    pub fn new() -> Self {
        Self
    }

    /// Feed one line through the state machine, returning the next state.
    pub fn step(&self, state: PendingName, line: &str, rows: &mut Vec<CompanyRow>) -> PendingName {
        match (LineClass::of(line), state) {
            (LineClass::NameWithAmount { name, amount }, state) => {
                match parse_german_number(amount) {
                    Ok(value) => rows.push(CompanyRow {
                        company_name: name.to_string(),
                        volume_millions_eur: value,
                    }),
                    Err(e) => trace!("Skipping company row: {}", e),
                }
                state
            }
            (LineClass::NameOnly(name), _) => PendingName::Pending(name.to_string()),
            (LineClass::Amount(amount), PendingName::Pending(name)) => {
                // The whole line is converted; trailing content makes the
                // conversion fail and the name is dropped with it.
                match parse_german_number(amount) {
                    Ok(value) => rows.push(CompanyRow {
                        company_name: name,
                        volume_millions_eur: value,
                    }),
                    Err(e) => trace!("Dropping pending name {:?}: {}", name, e),
                }
                PendingName::None
            }
            (_, state) => state,
        }
    }
}

impl TableParser for CompanyParser {
    type Row = CompanyRow;

    fn parse(&self, text: &str) -> Result<Vec<CompanyRow>, ParseError> {
        let mut rows = Vec::new();
        let mut state = PendingName::None;

        for line in text.split('\n') {
            state = self.step(state, line, &mut rows);
        }

        debug!("Company parser matched {} rows", rows.len());
        Ok(rows)
    }
}
