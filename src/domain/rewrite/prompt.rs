//! The shipped rewrite prompt

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::request::RewriteRequest;
use crate::domain::prompt::{PromptTemplate, TemplateError};

pub const SYSTEM_PROMPT: &str = "You are an expert professional email writer and communication specialist with deep expertise in:
- Corporate communication best practices
- Tone and style adaptation for different audiences
- Clear, concise, and effective writing
- Professional email etiquette and formatting

Your role is to rewrite emails to make them more effective, professional, and tailored to the target audience while maintaining the original intent and key information.";

const REWRITE_TEMPLATE: &str = "## Task: Rewrite Professional Email

### Original Email:
```
${var:email-text}
```

### Target Audience/Context:
${var:target-audience}

### Tone Requirement:
${var:tone-label} tone - ${var:tone-guidance}
${var:focus-section:}${var:instructions-section:}
### Guidelines:
1. Maintain the core message and intent of the original email
2. Improve clarity, conciseness, and readability
3. Ensure appropriate greeting and closing
4. Use proper email structure with clear paragraphs
5. Adapt language and terminology for the target audience
6. Remove redundancy and filler words
7. Ensure professional formatting and grammar

### Output Format:
Provide only the rewritten email content without any explanations, comments, or metadata. The output should be ready to send as-is.";

static REWRITE_PROMPT: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate::parse(REWRITE_TEMPLATE));

/// Render the user prompt for a rewrite request
pub fn render_rewrite_prompt(request: &RewriteRequest) -> Result<String, TemplateError> {
    let mut values = HashMap::new();
    values.insert("email-text", request.email_text.trim().to_string());
    values.insert("target-audience", request.target_audience.trim().to_string());
    values.insert("tone-label", request.tone.label().to_string());
    values.insert("tone-guidance", request.tone.guidance().to_string());

    if !request.focus_areas.is_empty() {
        let mut section = String::from("\n### Key Focus Areas:\n");
        for area in &request.focus_areas {
            section.push_str(&format!("- Emphasize {}\n", area));
        }
        values.insert("focus-section", section);
    }

    if let Some(ref instructions) = request.additional_instructions {
        values.insert(
            "instructions-section",
            format!("\n### Additional Instructions:\n{}\n", instructions),
        );
    }

    REWRITE_PROMPT.render(&values)
}
