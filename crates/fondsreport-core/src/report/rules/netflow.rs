//! Net inflow tables (by category and by target group).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::models::table::NetFlowRow;

use super::numbers::{decimal_tokens, is_candidate_row, parse_german_number};
use super::TableParser;

/// What to do with a data line that carries exactly three numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortRowPolicy {
    /// Emit the row with an empty total.
    #[default]
    Pad,
    /// Drop the line.
    Skip,
}

/// Parser for the net inflow reports.
#[derive(Debug, Clone, Default)]
pub struct NetFlowParser {
    short_rows: ShortRowPolicy,
}

impl NetFlowParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for three-number lines.
    pub fn with_short_rows(mut self, policy: ShortRowPolicy) -> Self {
        self.short_rows = policy;
        self
    }

    fn parse_line(&self, line: &str) -> Option<NetFlowRow> {
        if !is_candidate_row(line) {
            return None;
        }

        let tokens = decimal_tokens(line);
        if tokens.len() < 3 {
            return None;
        }
        if tokens.len() == 3 && self.short_rows == ShortRowPolicy::Skip {
            trace!("Skipping three-column line: {}", line);
            return None;
        }

        let mut values = Vec::with_capacity(4);
        for token in tokens.iter().take(4) {
            match parse_german_number(token) {
                Ok(v) => values.push(v),
                Err(e) => {
                    trace!("Dropping line {:?}: {}", line, e);
                    return None;
                }
            }
        }

        Some(NetFlowRow {
            group1: values[0],
            group2: values[1],
            group3: values[2],
            total: values.get(3).copied(),
        })
    }
}

impl TableParser for NetFlowParser {
    type Row = NetFlowRow;

    fn parse(&self, text: &str) -> Result<Vec<NetFlowRow>, ParseError> {
        let rows: Vec<NetFlowRow> = text.split('\n').filter_map(|l| self.parse_line(l)).collect();
        debug!("Net-flow parser matched {} rows", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_four_column_row() {
        let rows = NetFlowParser::new()
            .parse("Aktienfonds 1.200,50 -300,00 45,25 945,75")
            .unwrap();
        assert_eq!(
            rows,
            vec![NetFlowRow {
                group1: 1200.5,
                group2: -300.0,
                group3: 45.25,
                total: Some(945.75),
            }]
        );
    }

    #[test]
    fn test_extra_columns_are_truncated() {
        let rows = NetFlowParser::new().parse("1,0 2,0 3,0 4,0 5,0").unwrap();
        assert_eq!(rows[0].total, Some(4.0));
    }

    #[test]
    fn test_three_numbers_padded_by_default() {
        let rows = NetFlowParser::new().parse("100,00 -50,25 49,75").unwrap();
        assert_eq!(
            rows,
            vec![NetFlowRow {
                group1: 100.0,
                group2: -50.25,
                group3: 49.75,
                total: None,
            }]
        );
    }

    #[test]
    fn test_three_numbers_skipped_by_policy() {
        let rows = NetFlowParser::new()
            .with_short_rows(ShortRowPolicy::Skip)
            .parse("100,00 -50,25 49,75\n1,00 2,00 3,00 6,00")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, Some(6.0));
    }

    #[test]
    fn test_non_candidate_lines_contribute_nothing() {
        let text = "Zuflüsse nach Kategorien\n\
                    Jänner Februar März Gesamt\n\
                    2022 2023 2024 2025\n\
                    Kategorie, Gruppe, Summe\n\
                    1,00 2,00";
        let rows = NetFlowParser::new().parse(text).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_mixed_report_text() {
        let text = "Nettomittelzuflüsse in Mio EUR\n\
                    Aktienfonds 120,50 80,00 -10,25 190,25\n\
                    Rentenfonds -5,00 3,00 1,00\n\
                    Stand: 31.01.2024\n";
        let rows = NetFlowParser::new().parse(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].group3, -10.25);
        assert_eq!(rows[1].group1, -5.0);
        assert_eq!(rows[1].total, None);
    }

    #[test]
    fn test_short_row_policy_deserializes_lowercase() {
        let policy: ShortRowPolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, ShortRowPolicy::Skip);
    }
}
