//! Provider registry
//!
//! Maps provider names to concrete analysis backends.

pub mod gemini;
pub mod mock;

use crate::config::GracieConfig;
use crate::provider::AnalysisProvider;
use gracie_core::{GracieError, Result};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &GracieConfig) -> Result<Box<dyn AnalysisProvider>> {
    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new())),
        "gemini" => Ok(Box::new(gemini::GeminiProvider::from_config(config)?)),
        _ => Err(GracieError::ConfigError(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["gemini", "mock"]
}
