//! Parsed table rows and the per-document table.

use serde::{Deserialize, Serialize};

use crate::report::rules::format_german_number;

/// Row of the fund volume table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRow {
    #[serde(rename = "Category")]
    pub category: String,
    /// Fund volume in January.
    #[serde(rename = "VolumeJanner")]
    pub volume_janner: f64,
    /// Market share in percent.
    #[serde(rename = "SharePercent")]
    pub share_percent: f64,
}

/// Row of a net inflow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetFlowRow {
    #[serde(rename = "Group1")]
    pub group1: f64,
    #[serde(rename = "Group2")]
    pub group2: f64,
    #[serde(rename = "Group3")]
    pub group3: f64,
    /// Missing when the source line carried only three numbers.
    #[serde(rename = "Total")]
    pub total: Option<f64>,
}

/// Row of the management company table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    #[serde(rename = "VolumeMillionsEUR")]
    pub volume_millions_eur: f64,
}

/// Rows recognized in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parser", content = "rows")]
pub enum Table {
    Volume(Vec<VolumeRow>),
    NetFlow(Vec<NetFlowRow>),
    Companies(Vec<CompanyRow>),
}

impl Table {
    pub fn len(&self) -> usize {
        match self {
            Table::Volume(rows) => rows.len(),
            Table::NetFlow(rows) => rows.len(),
            Table::Companies(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column headers, in display order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Volume(_) => &["Category", "VolumeJanner", "SharePercent"],
            Table::NetFlow(_) => &["Group1", "Group2", "Group3", "Total"],
            Table::Companies(_) => &["CompanyName", "VolumeMillionsEUR"],
        }
    }

    /// The first `n` rows rendered as display strings.
    pub fn preview(&self, n: usize) -> Vec<Vec<String>> {
        let num = |v: f64| format_german_number(v, 2);
        match self {
            Table::Volume(rows) => rows
                .iter()
                .take(n)
                .map(|r| vec![r.category.clone(), num(r.volume_janner), num(r.share_percent)])
                .collect(),
            Table::NetFlow(rows) => rows
                .iter()
                .take(n)
                .map(|r| {
                    vec![
                        num(r.group1),
                        num(r.group2),
                        num(r.group3),
                        r.total.map(num).unwrap_or_default(),
                    ]
                })
                .collect(),
            Table::Companies(rows) => rows
                .iter()
                .take(n)
                .map(|r| vec![r.company_name.clone(), num(r.volume_millions_eur)])
                .collect(),
        }
    }
}
