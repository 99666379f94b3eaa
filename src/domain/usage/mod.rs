//! Token usage cost estimation

pub mod pricing;

pub use pricing::{ModelPricing, PriceTable, FALLBACK_MODEL};
