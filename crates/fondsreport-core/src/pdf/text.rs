//! Document text sources and the extracted-text cache.

use std::cell::RefCell;
use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use super::{PdfExtractor, PdfProcessor, Result};

/// A raw PDF payload with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name shown to the operator.
    pub name: String,
    /// Raw PDF bytes.
    pub data: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a document from disk, named after its file name.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, data })
    }

    /// SHA-256 of the content, identifying the document independent of its name.
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(&self.data).into()
    }
}

/// Source of a document's full text.
pub trait TextExtractor {
    /// Extract the full text of a document.
    fn extract(&self, document: &Document) -> Result<String>;
}

/// Text extraction through [`PdfExtractor`].
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    fallback_to_lopdf: bool,
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self {
            fallback_to_lopdf: true,
        }
    }

    /// Set whether lopdf is used when pdf-extract fails.
    pub fn with_lopdf_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_lopdf = enabled;
        self
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &Document) -> Result<String> {
        debug!("Extracting text from {}", document.name);
        let mut extractor = PdfExtractor::new().with_lopdf_fallback(self.fallback_to_lopdf);
        extractor.load(&document.data)?;
        extractor.extract_text()
    }
}

/// Memoizes extracted text by document content.
///
/// Failed extractions are not cached.
pub struct CachedExtractor<E> {
    inner: E,
    cache: RefCell<HashMap<[u8; 32], String>>,
}

impl<E: TextExtractor> CachedExtractor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: TextExtractor> TextExtractor for CachedExtractor<E> {
    fn extract(&self, document: &Document) -> Result<String> {
        let key = document.digest();
        if let Some(text) = self.cache.borrow().get(&key) {
            trace!("Text cache hit for {}", document.name);
            return Ok(text.clone());
        }

        let text = self.inner.extract(document)?;
        self.cache.borrow_mut().insert(key, text.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Treats the payload as UTF-8 text and counts calls.
    struct CountingSource {
        calls: Cell<usize>,
    }

    impl TextExtractor for CountingSource {
        fn extract(&self, document: &Document) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            String::from_utf8(document.data.clone())
                .map_err(|e| PdfError::TextExtraction(e.to_string()))
        }
    }

    fn counting() -> CachedExtractor<CountingSource> {
        CachedExtractor::new(CountingSource { calls: Cell::new(0) })
    }

    #[test]
    fn test_cache_hits_by_content() {
        let cached = counting();
        let a = Document::new("a.pdf", "Amundi 1,00");
        let renamed = Document::new("b.pdf", "Amundi 1,00");

        assert_eq!(cached.extract(&a).unwrap(), "Amundi 1,00");
        assert_eq!(cached.extract(&renamed).unwrap(), "Amundi 1,00");
        assert_eq!(cached.inner().calls.get(), 1);
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_cache_skips_failures() {
        let cached = counting();
        let bad = Document::new("bad.pdf", vec![0xff, 0xfe]);

        assert!(cached.extract(&bad).is_err());
        assert!(cached.extract(&bad).is_err());
        assert_eq!(cached.inner().calls.get(), 2);
        assert!(cached.is_empty());
    }

    #[test]
    fn test_clear() {
        let cached = counting();
        cached.extract(&Document::new("a.pdf", "x")).unwrap();
        cached.clear();
        cached.extract(&Document::new("a.pdf", "x")).unwrap();
        assert_eq!(cached.inner().calls.get(), 2);
    }

    #[test]
    fn test_pdf_text_extractor_rejects_garbage() {
        let doc = Document::new("kaputt.pdf", b"%PDF-nope".to_vec());
        assert!(PdfTextExtractor::new().extract(&doc).is_err());
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fondsvolumen.pdf");
        std::fs::write(&path, b"data").unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.name, "Fondsvolumen.pdf");
        assert_eq!(doc.data, b"data");
    }
}
