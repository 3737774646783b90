//! Configuration structures for the report pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{FondsError, Result};
use crate::report::rules::ShortRowPolicy;

/// Main configuration for fondsreport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FondsConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Report display configuration.
    pub report: ReportConfig,

    /// Volume table parsing.
    pub volume: VolumeConfig,

    /// Net inflow table parsing.
    pub netflow: NetFlowConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry page extraction with lopdf when pdf-extract fails.
    pub fallback_to_lopdf: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            fallback_to_lopdf: true,
        }
    }
}

/// Report display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of leading rows shown per recognized table.
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { preview_rows: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Skip rows with unconvertible numbers instead of failing the document.
    pub skip_malformed_rows: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetFlowConfig {
    /// Handling of lines with exactly three numbers.
    pub short_rows: ShortRowPolicy,
}

impl FondsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FondsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FondsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = FondsConfig::default();
        assert_eq!(config.report.preview_rows, 5);
        assert_eq!(config.netflow.short_rows, ShortRowPolicy::Pad);
        assert!(!config.volume.skip_malformed_rows);
        assert!(config.pdf.fallback_to_lopdf);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FondsConfig =
            serde_json::from_str(r#"{"netflow": {"short_rows": "skip"}}"#).unwrap();
        assert_eq!(config.netflow.short_rows, ShortRowPolicy::Skip);
        assert_eq!(config.report.preview_rows, 5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FondsConfig::default();
        config.report.preview_rows = 10;
        config.volume.skip_malformed_rows = true;
        config.save(&path).unwrap();

        assert_eq!(FondsConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FondsConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FondsError::Config(_)));
        assert!(err.to_string().starts_with("configuration error: "));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FondsConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FondsError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.json");
        let err = FondsConfig::default().save(&path).unwrap_err();
        assert!(matches!(err, FondsError::Io(_)));
    }
}
