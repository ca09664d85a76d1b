//! Prompt text and request body for the analysis endpoint

use serde_json::{json, Value};

use crate::provider::AnalysisInput;

/// Shared instruction given for both text and screenshot analysis
pub const BASE_INSTRUCTION: &str = "You are an expert in analyzing conversations for psychological manipulation tactics. Your primary goal is to help users understand if they are experiencing manipulation. Analyze the conversation for instances of Blame Shifting, Minimization, Projection, and Gaslighting. For each instance, provide the exact quote, an explanation of why it's an example of the technique, a severity score (Low, Medium, High), and an explanation for that severity. Also, provide an overall assessment of the conversation, a supportive message for the user, a summary of how this analysis can help in evidence collection, and any recognized patterns for each technique. Your response MUST conform to the provided JSON schema. Ensure all descriptions and explanations are clear and easy to understand for a layperson. If the input does not contain clear examples of manipulation, state that clearly and gently in the 'overall_assessment'.";

pub fn text_prompt(conversation: &str) -> String {
    format!(
        "{}\nConversation to analyze:\n---\n{}\n---",
        BASE_INSTRUCTION, conversation
    )
}

pub fn image_prompt() -> String {
    format!(
        "First, carefully extract all text from the provided image. Preserve the original formatting and speaker attribution if apparent. Then, using ONLY the extracted text, perform the analysis as described below. {} Include the extracted text in the 'extracted_text_from_image' field of your JSON response. If the image does not contain a discernible conversation or the text is unclear, state that in 'overall_assessment' and 'extracted_text_from_image'.",
        BASE_INSTRUCTION
    )
}

/// Structured-output schema the endpoint must conform to
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overall_assessment": { "type": "STRING" },
            "manipulation_techniques": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "technique": { "type": "STRING" },
                        "instances": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "quote": { "type": "STRING" },
                                    "explanation": { "type": "STRING" },
                                    "severity_score": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
                                    "severity_explanation": { "type": "STRING" }
                                },
                                "required": ["quote", "explanation", "severity_score", "severity_explanation"]
                            }
                        },
                        "pattern_insight": { "type": "STRING" }
                    },
                    "required": ["technique", "instances", "pattern_insight"]
                }
            },
            "validation_support_message": { "type": "STRING" },
            "evidence_summary": { "type": "STRING" },
            "extracted_text_from_image": { "type": "STRING" }
        },
        "required": [
            "overall_assessment",
            "manipulation_techniques",
            "validation_support_message",
            "evidence_summary"
        ]
    })
}

/// Build the full `generateContent` payload for one input
pub fn build_request_body(input: &AnalysisInput) -> Value {
    let parts = match input {
        AnalysisInput::Text(text) => json!([{ "text": text_prompt(text) }]),
        AnalysisInput::Image(image) => json!([
            { "text": image_prompt() },
            {
                "inlineData": {
                    "mimeType": image.mime_type(),
                    "data": image.to_base64()
                }
            }
        ]),
    };

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": analysis_schema()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ImageAttachment;

    #[test]
    fn text_body_has_single_part() {
        let body = build_request_body(&AnalysisInput::Text("A: hi\nB: hello".into()));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        let text = parts[0]["text"].as_str().unwrap();
        assert!(text.starts_with(BASE_INSTRUCTION));
        assert!(text.ends_with("---\nA: hi\nB: hello\n---"));
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn image_body_inlines_base64() {
        let img = ImageAttachment::new("s.png", "image/png", vec![0xFF, 0x00]).unwrap();
        let body = build_request_body(&AnalysisInput::Image(img));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"]
            .as_str()
            .unwrap()
            .starts_with("First, carefully extract all text"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "/wA=");
    }

    #[test]
    fn schema_requires_core_fields() {
        let schema = analysis_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(!required.iter().any(|r| r == "extracted_text_from_image"));
        let severity = &schema["properties"]["manipulation_techniques"]["items"]["properties"]
            ["instances"]["items"]["properties"]["severity_score"]["enum"];
        assert_eq!(severity.as_array().unwrap().len(), 3);
    }
}
