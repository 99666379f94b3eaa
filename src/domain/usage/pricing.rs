//! Model pricing and cost estimation

use serde::{Deserialize, Serialize};

use crate::domain::llm::Usage;

/// Model whose prices apply when no entry matches
pub const FALLBACK_MODEL: &str = "gpt-4o";

/// Pricing for one model family, stored in micro-dollars per 1K tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub model_id: String,
    pub input_price_per_1k_micros: i64,
    pub output_price_per_1k_micros: i64,
    #[serde(default)]
    pub description: String,
}

impl ModelPricing {
    pub fn new(model_id: impl Into<String>, input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            model_id: model_id.into(),
            input_price_per_1k_micros: (input_per_1k * 1_000_000.0).round() as i64,
            output_price_per_1k_micros: (output_per_1k * 1_000_000.0).round() as i64,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn input_price_per_1k(&self) -> f64 {
        self.input_price_per_1k_micros as f64 / 1_000_000.0
    }

    pub fn output_price_per_1k(&self) -> f64 {
        self.output_price_per_1k_micros as f64 / 1_000_000.0
    }

    /// Cost in USD, rounded to 6 decimals
    pub fn calculate_cost_usd(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let cost = (input_tokens as f64 / 1000.0) * self.input_price_per_1k()
            + (output_tokens as f64 / 1000.0) * self.output_price_per_1k();
        (cost * 1_000_000.0).round() / 1_000_000.0
    }
}

/// Static price list with prefix lookup for versioned model names
#[derive(Debug, Clone)]
pub struct PriceTable {
    entries: Vec<ModelPricing>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(vec![
            ModelPricing::new("gpt-4o", 0.005, 0.015)
                .with_description("GPT-4o - Fastest and most cost-effective GPT-4 model"),
            ModelPricing::new("gpt-4o-mini", 0.00015, 0.0006)
                .with_description("GPT-4o Mini - Most affordable model"),
            ModelPricing::new("gpt-4-turbo", 0.01, 0.03)
                .with_description("GPT-4 Turbo - High performance at lower cost"),
            ModelPricing::new("gpt-4", 0.03, 0.06).with_description("GPT-4 - Most capable model"),
            ModelPricing::new("gpt-3.5-turbo", 0.0015, 0.002)
                .with_description("GPT-3.5 Turbo - Fast and affordable"),
        ])
    }
}

impl PriceTable {
    pub fn new(entries: Vec<ModelPricing>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ModelPricing] {
        &self.entries
    }

    /// Exact match first, then the longest matching prefix, then the fallback model.
    pub fn lookup(&self, model: &str) -> Option<&ModelPricing> {
        let key = model.trim().to_lowercase();

        self.entries
            .iter()
            .find(|p| p.model_id == key)
            .or_else(|| {
                self.entries
                    .iter()
                    .filter(|p| key.starts_with(&p.model_id))
                    .max_by_key(|p| p.model_id.len())
            })
            .or_else(|| self.entries.iter().find(|p| p.model_id == FALLBACK_MODEL))
    }

    /// Estimated cost in USD; zero when the table has no usable entry
    pub fn estimate(&self, model: &str, usage: &Usage) -> f64 {
        self.lookup(model)
            .map(|p| p.calculate_cost_usd(usage.prompt_tokens, usage.completion_tokens))
            .unwrap_or(0.0)
    }
}
