//! Fund volume table: category, volume and market share.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::models::table::VolumeRow;

use super::numbers::parse_german_number;
use super::patterns::VOLUME_ROW;
use super::TableParser;

/// Parser for the fund volume report.
#[derive(Debug, Clone, Default)]
pub struct VolumeParser {
    /// Skip rows whose numbers fail to convert instead of failing the table.
    skip_malformed_rows: bool,
}

impl VolumeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether malformed rows are skipped.
    pub fn with_skip_malformed_rows(mut self, skip: bool) -> Self {
        self.skip_malformed_rows = skip;
        self
    }

    fn convert_row(&self, caps: &regex::Captures<'_>) -> Result<VolumeRow, ParseError> {
        let volume_janner = parse_german_number(&caps["volume"])
            .map_err(|e| ParseError::number("VolumeJanner", e))?;
        let share_percent = parse_german_number(&caps["share"])
            .map_err(|e| ParseError::number("SharePercent", e))?;

        Ok(VolumeRow {
            category: caps["category"].trim().to_string(),
            volume_janner,
            share_percent,
        })
    }
}

impl TableParser for VolumeParser {
    type Row = VolumeRow;

    fn parse(&self, text: &str) -> Result<Vec<VolumeRow>, ParseError> {
        let mut rows = Vec::new();

        for caps in VOLUME_ROW.captures_iter(text) {
            match self.convert_row(&caps) {
                Ok(row) => rows.push(row),
                Err(e) if self.skip_malformed_rows => {
                    trace!("Skipping volume row: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        debug!("Volume parser matched {} rows", rows.len());
        Ok(rows)
    }
}
