//! Resume extraction prompt.

use crate::templates;
use crate::traits::Prompt;

/// System instruction sent with every extraction request.
pub const SYSTEM_PROMPT: &str = "You are an expert resume parser.";

/// Declarative extraction prompt wrapping one resume's plain text.
///
/// The resume is embedded verbatim; no sanitization or truncation is applied
/// before it reaches the endpoint.
#[derive(Debug, Clone)]
pub struct ResumeExtractionPrompt {
    pub resume_text: String,
}

impl ResumeExtractionPrompt {
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
        }
    }
}

impl Prompt for ResumeExtractionPrompt {
    fn render(&self) -> String {
        format!(
            "{instruction}\n\n{schema}\n\nResume:\n{resume}\n\n{rules}",
            instruction = templates::render_instruction(),
            schema = templates::render_schema(),
            resume = self.resume_text,
            rules = templates::render_output_rules(),
        )
    }
}
