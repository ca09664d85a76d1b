//! Gemini analysis provider
//!
//! Sends one `generateContent` request with a structured-output schema and
//! decodes the JSON document nested in the first candidate. No retries: a
//! failed request is reported to the user, who can submit again.

use crate::analysis::AnalysisResult;
use crate::config::{GracieConfig, ENV_GEMINI_API_KEY};
use crate::prompt::build_request_body;
use crate::provider::*;
use gracie_core::{GracieError, Result};
use std::time::Duration;

pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini provider for manipulation analysis
pub struct GeminiProvider {
    api_key: String,
    api_url: String,
}

impl GeminiProvider {
    pub fn from_config(config: &GracieConfig) -> Result<Self> {
        let api_key = config
            .gemini_api_key()
            .ok_or_else(|| GracieError::MissingApiKey {
                provider: "Gemini".to_string(),
                env_var: ENV_GEMINI_API_KEY.to_string(),
            })?
            .to_string();

        let api_url = config
            .gemini_api_url()
            .unwrap_or(DEFAULT_GEMINI_URL)
            .to_string();

        Ok(Self { api_key, api_url })
    }

    fn endpoint(&self) -> String {
        let sep = if self.api_url.contains('?') { '&' } else { '?' };
        format!("{}{}key={}", self.api_url, sep, self.api_key)
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .http_status_as_error(false)
        .build();
    config.into()
}

/// Decode a raw endpoint response into an analysis
pub fn parse_gemini_response(status: u16, body: &str) -> Result<AnalysisResult> {
    if !(200..300).contains(&status) {
        return Err(GracieError::RequestFailed(format!(
            "Gemini API Error: {} {}",
            status, body
        )));
    }

    let envelope: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        GracieError::RequestFailed(format!("Failed to parse Gemini response: {}", e))
    })?;

    let text = envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GracieError::RequestFailed("Invalid API response structure.".to_string()))?;

    serde_json::from_str(text)
        .map_err(|e| GracieError::RequestFailed(format!("Analysis did not match schema: {}", e)))
}

/// Wrap an analysis document the way the endpoint nests it
pub fn candidate_envelope(analysis_json: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": analysis_json }]
            }
        }]
    })
    .to_string()
}

impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            return ProviderStatus::NoApiKey;
        }
        ProviderStatus::Available
    }

    fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let request_id = uuid::Uuid::new_v4();
        let payload = build_request_body(input);
        tracing::info!(%request_id, input = input.kind(), "submitting analysis request");

        let start = std::time::Instant::now();
        let agent = build_agent();
        let mut response = agent
            .post(&self.endpoint())
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                tracing::warn!(%request_id, error = %e, "analysis request failed");
                GracieError::RequestFailed(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GracieError::RequestFailed(format!("Failed to read response: {}", e)))?;

        let result = parse_gemini_response(status, &body);
        match &result {
            Ok(analysis) => tracing::info!(
                %request_id,
                status,
                techniques = analysis.manipulation_techniques.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "analysis complete"
            ),
            Err(e) => tracing::warn!(%request_id, status, error = %e, "analysis rejected"),
        }
        result
    }
}
