//! Analysis provider trait and request input types

use base64::{engine::general_purpose::STANDARD, Engine as _};
use gracie_core::{GracieError, Result};
use std::path::Path;

use crate::analysis::AnalysisResult;

/// Image MIME types the analysis endpoint accepts
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
];

pub fn is_supported_image(mime: &str) -> bool {
    SUPPORTED_IMAGE_TYPES.contains(&mime.to_ascii_lowercase().as_str())
}

/// A screenshot to analyse, already checked against `SUPPORTED_IMAGE_TYPES`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    mime_type: String,
    data: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, mime_type: &str, data: Vec<u8>) -> Result<Self> {
        if !is_supported_image(mime_type) {
            return Err(GracieError::UnsupportedFileType {
                mime: mime_type.to_string(),
            });
        }
        Ok(Self {
            file_name: file_name.into(),
            mime_type: mime_type.to_ascii_lowercase(),
            data,
        })
    }

    /// Read a file, sniffing its MIME type from the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        if !is_supported_image(mime) {
            return Err(GracieError::UnsupportedFileType {
                mime: mime.to_string(),
            });
        }
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(name, mime, data)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Standard base64 of the raw bytes, without a data-URL prefix
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// What the user submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Text(String),
    Image(ImageAttachment),
}

impl AnalysisInput {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisInput::Text(_) => "text",
            AnalysisInput::Image(_) => "image",
        }
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    NoApiKey,
}

/// Trait implemented by each analysis backend (Gemini, Mock)
pub trait AnalysisProvider: Send {
    /// Provider name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    fn health_check(&self) -> ProviderStatus;

    /// Run one analysis synchronously; no retries
    fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult>;
}
