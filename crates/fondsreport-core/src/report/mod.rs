//! The four fund reports and the driver that parses them.

mod driver;
pub mod rules;

pub use driver::{BatchOutcome, DocumentReport, DocumentStatus, ReportDriver, BATCH_SIZE};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::config::FondsConfig;
use crate::models::table::Table;
use rules::{CompanyParser, NetFlowParser, TableParser, VolumeParser};

/// The reports expected in a batch, in batch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Fund volumes (Fondsvolumen).
    FundVolume,
    /// Net inflows by category.
    CategoryFlows,
    /// Net inflows by target group.
    TargetGroupFlows,
    /// Management companies (Verwaltungsgesellschaften).
    ManagementCompanies,
}

impl ReportKind {
    /// All kinds in batch order.
    pub const ALL: [ReportKind; 4] = [
        ReportKind::FundVolume,
        ReportKind::CategoryFlows,
        ReportKind::TargetGroupFlows,
        ReportKind::ManagementCompanies,
    ];

    /// Position in the batch, starting at 1.
    pub fn position(self) -> usize {
        match self {
            ReportKind::FundVolume => 1,
            ReportKind::CategoryFlows => 2,
            ReportKind::TargetGroupFlows => 3,
            ReportKind::ManagementCompanies => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::FundVolume => "Fondsvolumen",
            ReportKind::CategoryFlows => "Zuflüsse nach Kategorien",
            ReportKind::TargetGroupFlows => "Zuflüsse nach Zielgruppen",
            ReportKind::ManagementCompanies => "Verwaltungsgesellschaften",
        }
    }

    /// Parse text with the parser for this kind of report.
    pub fn parse(self, text: &str, config: &FondsConfig) -> Result<Table, ParseError> {
        match self {
            ReportKind::FundVolume => VolumeParser::new()
                .with_skip_malformed_rows(config.volume.skip_malformed_rows)
                .parse(text)
                .map(Table::Volume),
            ReportKind::CategoryFlows | ReportKind::TargetGroupFlows => NetFlowParser::new()
                .with_short_rows(config.netflow.short_rows)
                .parse(text)
                .map(Table::NetFlow),
            ReportKind::ManagementCompanies => {
                CompanyParser::new().parse(text).map(Table::Companies)
            }
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (PDF {})", self.label(), self.position())
    }
}
