//! Manipulation analysis result types, as returned by the generative endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious one quoted instance is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn badge_variant(&self) -> BadgeVariant {
        match self {
            Severity::High => BadgeVariant::Destructive,
            Severity::Medium => BadgeVariant::Secondary,
            Severity::Low => BadgeVariant::Outline,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Severity::High => Tone::Red,
            Severity::Medium => Tone::Yellow,
            Severity::Low => Tone::Green,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Visual style of a severity badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Outline,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
        }
    }
}

/// Text color used for the severity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Red,
    Yellow,
    Green,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Red => "red",
            Tone::Yellow => "yellow",
            Tone::Green => "green",
        }
    }
}

/// One quoted example of a technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInstance {
    pub quote: String,
    pub explanation: String,
    pub severity_score: Severity,
    pub severity_explanation: String,
}

/// A technique found in the conversation, with its instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationTechnique {
    pub technique: String,
    pub instances: Vec<AnalysisInstance>,
    pub pattern_insight: String,
}

/// The full analysis; replaced wholesale on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_assessment: String,
    pub manipulation_techniques: Vec<ManipulationTechnique>,
    pub validation_support_message: String,
    pub evidence_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text_from_image: Option<String>,
}

impl AnalysisResult {
    /// Total quoted instances across every technique
    pub fn instance_count(&self) -> usize {
        self.manipulation_techniques
            .iter()
            .map(|t| t.instances.len())
            .sum()
    }

    /// Highest severity found, if any instance was reported
    pub fn max_severity(&self) -> Option<Severity> {
        self.manipulation_techniques
            .iter()
            .flat_map(|t| t.instances.iter())
            .map(|i| i.severity_score)
            .max_by_key(|s| match s {
                Severity::Low => 0,
                Severity::Medium => 1,
                Severity::High => 2,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "overall_assessment": "Some minimization is present.",
        "manipulation_techniques": [{
            "technique": "Minimization",
            "instances": [{
                "quote": "I was just joking",
                "explanation": "Uses humor to dismiss hurt.",
                "severity_score": "Medium",
                "severity_explanation": "Repeated dismissal."
            }],
            "pattern_insight": "Humor deflects accountability."
        }],
        "validation_support_message": "Your feelings are valid.",
        "evidence_summary": "Quote documented."
    }"#;

    #[test]
    fn parses_schema_conforming_json() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.manipulation_techniques.len(), 1);
        assert_eq!(result.instance_count(), 1);
        assert_eq!(result.max_severity(), Some(Severity::Medium));
        assert!(result.extracted_text_from_image.is_none());
    }

    #[test]
    fn rejects_unknown_severity() {
        let bad = SAMPLE.replace("\"Medium\"", "\"Extreme\"");
        assert!(serde_json::from_str::<AnalysisResult>(&bad).is_err());
    }

    #[test]
    fn severity_maps_to_badge_and_tone() {
        assert_eq!(Severity::High.badge_variant().as_str(), "destructive");
        assert_eq!(Severity::Medium.badge_variant().as_str(), "secondary");
        assert_eq!(Severity::Low.badge_variant().as_str(), "outline");
        assert_eq!(Severity::High.tone(), Tone::Red);
        assert_eq!(Severity::Medium.tone(), Tone::Yellow);
        assert_eq!(Severity::Low.tone(), Tone::Green);
    }
}
