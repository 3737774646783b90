//! Core library for parsing German fund-industry PDF reports.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract, with lopdf as fallback) and a
//!   content-keyed text cache
//! - German number handling ("1.234,56")
//! - Parsers for the fund volume, net inflow and management company tables
//! - A driver that runs the four reports of a batch independently

pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{FondsError, NumberError, ParseError, PdfError, Result};
pub use models::config::FondsConfig;
pub use models::table::{CompanyRow, NetFlowRow, Table, VolumeRow};
pub use pdf::{CachedExtractor, Document, PdfExtractor, PdfProcessor, PdfTextExtractor, TextExtractor};
pub use report::rules::{CompanyParser, NetFlowParser, ShortRowPolicy, TableParser, VolumeParser};
pub use report::{BatchOutcome, DocumentReport, DocumentStatus, ReportDriver, ReportKind};
