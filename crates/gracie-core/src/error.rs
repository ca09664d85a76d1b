//! Error types for GRACIE

use thiserror::Error;

/// The main error type for GRACIE operations
///
/// The analysis and checkout variants carry the exact text shown to the user,
/// so `to_string()` is what ends up in the inline alert or notification.
#[derive(Debug, Error)]
pub enum GracieError {
    #[error("Please enter text or upload an image to analyze.")]
    InputMissing,

    #[error("Please select a valid image file (PNG, JPG, GIF, WEBP)")]
    UnsupportedFileType { mime: String },

    #[error("Analysis Failed: {0}")]
    RequestFailed(String),

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("{provider} API key is missing. Set {env_var} or add it to .gracie/config.toml")]
    MissingApiKey { provider: String, env_var: String },

    #[error("Please sign in to purchase a subscription.")]
    Unauthenticated,

    #[error("{0}")]
    CheckoutFailed(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl GracieError {
    /// Short machine-readable kind, used in logs and CLI exit reporting
    pub fn kind(&self) -> &'static str {
        match self {
            GracieError::InputMissing => "input-missing",
            GracieError::UnsupportedFileType { .. } => "unsupported-file-type",
            GracieError::RequestFailed(_) => "request-failed",
            GracieError::AnalysisInProgress => "analysis-in-progress",
            GracieError::MissingApiKey { .. } => "missing-api-key",
            GracieError::Unauthenticated => "unauthenticated",
            GracieError::CheckoutFailed(_) => "request-failed",
            GracieError::UnknownProduct(_) => "unknown-product",
            GracieError::ConfigError(_) => "config",
            GracieError::RenderError(_) => "render",
            GracieError::IoError(_) => "io",
            GracieError::TomlParseError(_) => "toml",
        }
    }
}

/// Result type alias for GRACIE operations
pub type Result<T> = std::result::Result<T, GracieError>;

impl From<toml::de::Error> for GracieError {
    fn from(err: toml::de::Error) -> Self {
        GracieError::TomlParseError(err.to_string())
    }
}
