//! Batch driver: one parser per document, in fixed order.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ReportKind;
use crate::error::FondsError;
use crate::models::config::FondsConfig;
use crate::models::table::Table;
use crate::pdf::{Document, TextExtractor};

/// Number of documents a batch must contain.
pub const BATCH_SIZE: usize = 4;

/// Outcome for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// At least one row was recognized.
    Recognized { table: Table },
    /// The parser matched nothing.
    NotRecognized,
    /// Extraction or parsing failed.
    Failed { message: String },
}

/// Report for one document of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    pub kind: ReportKind,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

impl DocumentReport {
    pub fn row_count(&self) -> usize {
        match &self.status {
            DocumentStatus::Recognized { table } => table.len(),
            _ => 0,
        }
    }
}

/// Result of running a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The batch did not hold exactly [`BATCH_SIZE`] documents; nothing was parsed.
    WrongCount { supplied: usize },
    /// One report per document, in batch order.
    Processed { reports: Vec<DocumentReport> },
}

impl BatchOutcome {
    /// Message shown when the batch size is wrong.
    pub fn instructions() -> String {
        let mut msg = format!(
            "Please supply exactly {} PDF files, in this order:",
            BATCH_SIZE
        );
        for kind in ReportKind::ALL {
            msg.push_str(&format!("\n  {}. {}", kind.position(), kind.label()));
        }
        msg
    }
}

/// Runs the four report parsers over a batch of documents.
pub struct ReportDriver<E> {
    extractor: E,
    config: FondsConfig,
}

impl<E: TextExtractor> ReportDriver<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            config: FondsConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FondsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Process a batch. Each document is handled independently.
    pub fn run(&self, documents: &[Document]) -> BatchOutcome {
        if documents.len() != BATCH_SIZE {
            info!(
                "Expected {} documents, got {}; nothing parsed",
                BATCH_SIZE,
                documents.len()
            );
            return BatchOutcome::WrongCount {
                supplied: documents.len(),
            };
        }

        let reports = documents
            .iter()
            .zip(ReportKind::ALL)
            .map(|(doc, kind)| self.process(doc, kind))
            .collect();

        BatchOutcome::Processed { reports }
    }

    /// Extract and parse a single document as the given kind of report.
    pub fn process(&self, document: &Document, kind: ReportKind) -> DocumentReport {
        let status = match self.extract_and_parse(document, kind) {
            Ok(table) if table.is_empty() => {
                debug!("{}: no table recognized in {}", kind, document.name);
                DocumentStatus::NotRecognized
            }
            Ok(table) => {
                debug!("{}: {} rows from {}", kind, table.len(), document.name);
                DocumentStatus::Recognized { table }
            }
            Err(e) => {
                warn!("{}: failed to process {}: {}", kind, document.name, e);
                DocumentStatus::Failed {
                    message: e.to_string(),
                }
            }
        };

        DocumentReport {
            filename: document.name.clone(),
            kind,
            status,
        }
    }

    fn extract_and_parse(&self, document: &Document, kind: ReportKind) -> Result<Table, FondsError> {
        let text = self.extractor.extract(document)?;
        Ok(kind.parse(&text, &self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf::Document;
    use std::cell::Cell;

    struct PlainText {
        calls: Cell<usize>,
    }

    impl TextExtractor for PlainText {
        fn extract(&self, document: &Document) -> crate::pdf::Result<String> {
            self.calls.set(self.calls.get() + 1);
            String::from_utf8(document.data.clone())
                .map_err(|e| PdfError::TextExtraction(e.to_string()))
        }
    }

    fn driver() -> ReportDriver<PlainText> {
        ReportDriver::new(PlainText { calls: Cell::new(0) })
    }

    #[test]
    fn test_wrong_count_parses_nothing() {
        let driver = driver();
        let docs: Vec<Document> = (0..3)
            .map(|i| Document::new(format!("{}.pdf", i), "Amundi 1,00"))
            .collect();

        assert_eq!(driver.run(&docs), BatchOutcome::WrongCount { supplied: 3 });
        assert_eq!(driver.run(&[]), BatchOutcome::WrongCount { supplied: 0 });
        assert_eq!(driver.extractor().calls.get(), 0);
    }

    #[test]
    fn test_instructions_list_every_report() {
        let msg = BatchOutcome::instructions();
        assert!(msg.contains("exactly 4"));
        for kind in ReportKind::ALL {
            assert!(msg.contains(kind.label()));
        }
    }

    #[test]
    fn test_failed_document_does_not_block_others() {
        let driver = driver();
        let docs = vec![
            Document::new("vol.pdf", vec![0xff]),
            Document::new("kat.pdf", "1,00 2,00 3,00 6,00"),
            Document::new("ziel.pdf", "keine Zahlen"),
            Document::new("vwg.pdf", "Amundi 987,65"),
        ];

        let BatchOutcome::Processed { reports } = driver.run(&docs) else {
            panic!("expected processed batch");
        };
        assert_eq!(reports.len(), 4);
        assert_eq!(driver.extractor().calls.get(), 4);
        assert!(matches!(reports[0].status, DocumentStatus::Failed { .. }));
        assert_eq!(reports[1].row_count(), 1);
        assert_eq!(reports[2].status, DocumentStatus::NotRecognized);
        assert_eq!(reports[3].filename, "vwg.pdf");
        assert_eq!(reports[3].kind, ReportKind::ManagementCompanies);
    }
}
