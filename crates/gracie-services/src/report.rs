//! Presentation model for a finished analysis

use std::fmt;

use crate::analysis::{AnalysisResult, BadgeVariant, Severity, Tone};
use crate::techniques;

/// One quoted instance, ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceView {
    pub quote: String,
    pub explanation: String,
    pub severity: Severity,
    pub severity_explanation: String,
    pub badge: BadgeVariant,
    pub tone: Tone,
}

/// One block per reported technique
#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueBlock {
    pub technique: String,
    pub instances: Vec<InstanceView>,
    pub pattern_insight: String,
    /// Whether a "learn more" guide exists for this technique
    pub has_guide: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub overall_assessment: String,
    pub blocks: Vec<TechniqueBlock>,
    pub validation_support_message: String,
    pub evidence_summary: String,
    pub extracted_text: Option<String>,
}

impl AnalysisReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let blocks = result
            .manipulation_techniques
            .iter()
            .map(|t| TechniqueBlock {
                technique: t.technique.clone(),
                instances: t
                    .instances
                    .iter()
                    .map(|i| InstanceView {
                        quote: i.quote.clone(),
                        explanation: i.explanation.clone(),
                        severity: i.severity_score,
                        severity_explanation: i.severity_explanation.clone(),
                        badge: i.severity_score.badge_variant(),
                        tone: i.severity_score.tone(),
                    })
                    .collect(),
                pattern_insight: t.pattern_insight.clone(),
                has_guide: techniques::guide(&t.technique).is_some(),
            })
            .collect();

        Self {
            overall_assessment: result.overall_assessment.clone(),
            blocks,
            validation_support_message: result.validation_support_message.clone(),
            evidence_summary: result.evidence_summary.clone(),
            extracted_text: result
                .extracted_text_from_image
                .clone()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.extracted_text {
            writeln!(f, "Extracted Text")?;
            for line in text.lines() {
                writeln!(f, "  {}", line)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Overall Assessment")?;
        writeln!(f, "  {}", self.overall_assessment)?;

        for block in &self.blocks {
            writeln!(f)?;
            if block.has_guide {
                writeln!(
                    f,
                    "{} (guide: gracie techniques \"{}\")",
                    block.technique, block.technique
                )?;
            } else {
                writeln!(f, "{}", block.technique)?;
            }
            for instance in &block.instances {
                writeln!(f, "  \"{}\"", instance.quote)?;
                writeln!(
                    f,
                    "    [{}] {} severity: {}",
                    instance.badge.as_str(),
                    instance.severity,
                    instance.severity_explanation
                )?;
                writeln!(f, "    {}", instance.explanation)?;
            }
            writeln!(f, "  Pattern: {}", block.pattern_insight)?;
        }

        writeln!(f)?;
        writeln!(f, "Support")?;
        writeln!(f, "  {}", self.validation_support_message)?;
        writeln!(f)?;
        writeln!(f, "Evidence Summary")?;
        write!(f, "  {}", self.evidence_summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisInstance, ManipulationTechnique};

    fn result_with(technique: &str, severity: Severity) -> AnalysisResult {
        AnalysisResult {
            overall_assessment: "assessment".into(),
            manipulation_techniques: vec![ManipulationTechnique {
                technique: technique.into(),
                instances: vec![AnalysisInstance {
                    quote: "I never said that".into(),
                    explanation: "denial".into(),
                    severity_score: severity,
                    severity_explanation: "direct contradiction".into(),
                }],
                pattern_insight: "recurring".into(),
            }],
            validation_support_message: "support".into(),
            evidence_summary: "evidence".into(),
            extracted_text_from_image: Some("   ".into()),
        }
    }

    #[test]
    fn blocks_carry_badges_and_guides() {
        let report = AnalysisReport::from_result(&result_with("Gaslighting", Severity::High));
        assert_eq!(report.blocks.len(), 1);
        let block = &report.blocks[0];
        assert!(block.has_guide);
        assert_eq!(block.instances[0].badge, BadgeVariant::Destructive);
        assert_eq!(block.instances[0].tone, Tone::Red);
        assert!(report.extracted_text.is_none());
    }

    #[test]
    fn unknown_technique_has_no_guide() {
        let report = AnalysisReport::from_result(&result_with("Stonewalling", Severity::Low));
        assert!(!report.blocks[0].has_guide);
        let text = report.to_string();
        assert!(text.contains("[outline] Low severity"));
        assert!(text.ends_with("  evidence"));
    }
}
