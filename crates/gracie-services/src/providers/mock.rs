//! Mock provider for testing
//!
//! Replays scripted endpoint responses (status + raw body) through the same
//! decoding path as the Gemini provider, without any network calls.

use crate::analysis::{AnalysisInstance, AnalysisResult, ManipulationTechnique, Severity};
use crate::provider::*;
use crate::providers::gemini::{candidate_envelope, parse_gemini_response};
use gracie_core::{GracieError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A mock provider answering from a response script
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<(u16, String)>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response; consumed in order, one per `analyze` call
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back((status, body.into()));
        }
        self
    }

    /// Queue a successful response carrying `result`
    pub fn respond_with(self, result: &AnalysisResult) -> Self {
        let inner = serde_json::to_string(result).unwrap_or_default();
        self.respond(200, candidate_envelope(&inner))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Answer returned once the script is exhausted
    pub fn canned_result(input: &AnalysisInput) -> AnalysisResult {
        let extracted = match input {
            AnalysisInput::Image(image) => {
                Some(format!("(mock) text extracted from {}", image.file_name))
            }
            AnalysisInput::Text(_) => None,
        };
        AnalysisResult {
            overall_assessment: "The conversation shows signs of minimization.".to_string(),
            manipulation_techniques: vec![ManipulationTechnique {
                technique: "Minimization".to_string(),
                instances: vec![AnalysisInstance {
                    quote: "I was just joking".to_string(),
                    explanation: "Humor is used to dismiss a hurtful remark.".to_string(),
                    severity_score: Severity::Medium,
                    severity_explanation: "The dismissal invalidates a stated feeling."
                        .to_string(),
                }],
                pattern_insight: "Concerns are repeatedly reframed as overreactions.".to_string(),
            }],
            validation_support_message: "Your feelings are valid and worth taking seriously."
                .to_string(),
            evidence_summary: "The quoted line can be kept as a dated record.".to_string(),
            extracted_text_from_image: extracted,
        }
    }
}

impl AnalysisProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> ProviderStatus {
        ProviderStatus::Available
    }

    fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| GracieError::RequestFailed("mock script poisoned".to_string()))?
            .pop_front();

        match next {
            Some((status, body)) => parse_gemini_response(status, &body),
            None => Ok(Self::canned_result(input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_consumed_in_order() {
        let provider = MockProvider::new()
            .respond(503, "unavailable")
            .respond_with(&MockProvider::canned_result(&AnalysisInput::Text(String::new())));

        let input = AnalysisInput::Text("hello".into());
        let first = provider.analyze(&input).unwrap_err();
        assert!(first.to_string().contains("503 unavailable"));

        let second = provider.analyze(&input).unwrap();
        assert_eq!(second.manipulation_techniques[0].technique, "Minimization");

        // exhausted script falls back to the canned answer
        assert!(provider.analyze(&input).is_ok());
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn canned_image_result_has_extracted_text() {
        let img = ImageAttachment::new("chat.png", "image/png", vec![1]).unwrap();
        let result = MockProvider::new().analyze(&AnalysisInput::Image(img)).unwrap();
        assert!(result
            .extracted_text_from_image
            .as_deref()
            .unwrap()
            .contains("chat.png"));
    }
}
