//! Prompt templating

pub mod template;

pub use template::{PromptTemplate, PromptVariable, TemplateError};
