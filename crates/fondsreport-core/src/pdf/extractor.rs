//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor.
///
/// Documents are opened with lopdf; page text comes from pdf-extract, with
/// lopdf's own text extraction as a fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    fallback_to_lopdf: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            fallback_to_lopdf: true,
        }
    }

    /// Set whether lopdf is used when pdf-extract fails.
    pub fn with_lopdf_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_lopdf = enabled;
        self
    }

    /// Text of every page, in page order. Pages without text are empty strings.
    pub fn page_texts(&self) -> Result<Vec<String>> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        match Self::pdf_extract_pages(&self.raw_data) {
            Ok(pages) => {
                trace!("pdf-extract returned {} pages", pages.len());
                Ok(pages)
            }
            Err(e) if self.fallback_to_lopdf => {
                warn!("pdf-extract failed ({}), falling back to lopdf", e);
                Ok(Self::lopdf_page_texts(doc))
            }
            Err(e) => Err(PdfError::TextExtraction(e)),
        }
    }

    /// Run pdf-extract; it panics on some malformed fonts, so panics are
    /// turned into errors.
    fn pdf_extract_pages(data: &[u8]) -> std::result::Result<Vec<String>, String> {
        match catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        })) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic) => Err(format!(
                "pdf-extract panicked: {}",
                panic_message(panic.as_ref())
            )),
        }
    }

    fn lopdf_page_texts(doc: &Document) -> Vec<String> {
        doc.get_pages()
            .keys()
            .map(|&page_num| {
                match catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page_num]))) {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => {
                        debug!("lopdf could not extract page {}: {}", page_num, e);
                        String::new()
                    }
                    Err(panic) => {
                        debug!(
                            "lopdf panicked on page {}: {}",
                            page_num,
                            panic_message(panic.as_ref())
                        );
                        String::new()
                    }
                }
            })
            .collect()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Join page texts with newlines, leaving out pages without text.
pub(crate) fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let pages = self.page_texts()?;
        let text = join_pages(&pages);

        if text.is_empty() {
            return Err(PdfError::TextExtraction(format!(
                "none of {} pages yielded text",
                pages.len()
            )));
        }

        debug!("Extracted {} chars from {} pages", text.len(), pages.len());
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let pages = self.page_texts()?;
        pages
            .into_iter()
            .nth((page - 1) as usize)
            .ok_or(PdfError::InvalidPage(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
        assert!(matches!(
            extractor.extract_page_text(1),
            Err(PdfError::InvalidPage(1))
        ));
    }

    #[test]
    fn test_load_rejects_non_pdf() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("Descendant fonts required");
        assert_eq!(panic_message(boxed.as_ref()), "Descendant fonts required");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let pages = ["Seite eins", "", "   \n", "Seite vier"];
        assert_eq!(join_pages(&pages), "Seite eins\nSeite vier");
        assert_eq!(join_pages::<&str>(&[]), "");
    }
}
