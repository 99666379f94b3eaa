//! Infrastructure layer - filesystem, HTTP and in-process implementations

pub mod batch;
pub mod extraction;
pub mod folder_stats;
pub mod llm;
pub mod logging;
pub mod rate_limit;
pub mod services;
