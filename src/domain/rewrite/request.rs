//! Rewrite inputs and outputs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::llm::Usage;
use crate::domain::DomainError;

/// Register the rewritten email should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Academic,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Academic => "academic",
        }
    }

    /// Style guidance rendered into the prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Professional => "formal, respectful, and business-appropriate",
            Self::Casual => "friendly, approachable, and conversational",
            Self::Academic => "scholarly, precise, and well-structured",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Academic => "Academic",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "academic" => Ok(Self::Academic),
            other => Err(DomainError::validation(format!(
                "Invalid tone '{}'. Must be one of: professional, casual, academic",
                other
            ))),
        }
    }
}

/// One email rewrite to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub email_text: String,
    pub target_audience: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

impl RewriteRequest {
    pub fn new(email_text: impl Into<String>, target_audience: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
            target_audience: target_audience.into(),
            tone: Tone::default(),
            focus_areas: Vec::new(),
            additional_instructions: None,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_focus_areas(mut self, areas: Vec<String>) -> Self {
        self.focus_areas = areas
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    pub fn with_additional_instructions(mut self, instructions: Option<String>) -> Self {
        self.additional_instructions = instructions
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        self
    }
}

/// Split a comma-separated focus list, as sent by form uploads
pub fn parse_focus_areas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Result of a completed rewrite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteOutcome {
    pub content: String,
    pub model: String,
    pub usage: Usage,
    pub cost_usd: f64,
}
