//! Request and response bodies for the rewrite routes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::rewrite::{RewriteOutcome, Tone};

fn default_save_output() -> bool {
    true
}

/// JSON body of `POST /rewrite`
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteEmailRequest {
    pub email_text: String,
    pub target_audience: String,
    /// Parsed with `Tone::from_str` so a bad value yields a 400 with a clear message
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
    #[serde(default = "default_save_output")]
    pub save_output: bool,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Metadata attached to every rewrite response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteMetadata {
    pub timestamp: DateTime<Utc>,
    pub processing_time: f64,
    pub tokens_used: u32,
    pub estimated_cost_usd: f64,
    pub model: String,
    pub correlation_id: String,
    pub target_audience: String,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteEmailResponse {
    pub status: ResponseStatus,
    pub rewritten_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
    pub metadata: RewriteMetadata,
}

impl RewriteEmailResponse {
    pub fn from_outcome(outcome: RewriteOutcome, metadata: RewriteMetadata) -> Self {
        Self {
            status: ResponseStatus::Success,
            rewritten_email: outcome.content,
            saved_to: None,
            metadata,
        }
    }

    pub fn with_saved_to(mut self, saved_to: Option<String>) -> Self {
        self.saved_to = saved_to;
        self
    }
}
