//! Batch folder processing domain types
//!
//! Each discovered file moves through
//! `Discovered -> Extracting -> Validating -> Dispatching -> {Succeeded, Failed}`;
//! unsupported files are `Skipped` and left in place.

pub mod error;
pub mod outcome;
pub mod ports;

pub use error::BatchError;
pub use outcome::{BatchItemError, BatchItemOutcome, BatchItemStatus, BatchReport};
pub use ports::{DispatchItem, FileRelocator, ItemDispatcher};

#[cfg(test)]
pub use ports::mock::{InMemoryRelocator, RecordingDispatcher};

/// Subdirectory of the input folder receiving successfully processed files
pub const PROCESSED_DIR: &str = "processed";
/// Subdirectory of the input folder receiving failed files
pub const ERRORS_DIR: &str = "errors";
