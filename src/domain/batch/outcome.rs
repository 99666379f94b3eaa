//! Per-file outcomes and the run report

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::extraction::ExtractionError;
use crate::domain::validation::ValidationError;

/// Terminal state of one discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchItemStatus {
    Succeeded,
    Failed,
    Skipped,
}

/// Why a single item did not succeed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BatchItemError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

impl BatchItemError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Extraction(e) => e.code(),
            Self::Validation(e) => e.code(),
            Self::Read(_) => "read_failed",
            Self::Dispatch(_) => "dispatch_failed",
        }
    }
}

impl Serialize for BatchItemError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BatchItemError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemOutcome {
    pub original_path: PathBuf,
    /// Where the file ended up; equals `original_path` when it was not moved
    pub final_path: PathBuf,
    pub status: BatchItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchItemError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relocation_error: Option<String>,
}

impl BatchItemOutcome {
    pub fn succeeded(original_path: PathBuf, output_path: Option<PathBuf>) -> Self {
        Self {
            final_path: original_path.clone(),
            original_path,
            status: BatchItemStatus::Succeeded,
            error: None,
            output_path,
            relocation_error: None,
        }
    }

    pub fn failed(original_path: PathBuf, error: BatchItemError) -> Self {
        Self {
            final_path: original_path.clone(),
            original_path,
            status: BatchItemStatus::Failed,
            error: Some(error),
            output_path: None,
            relocation_error: None,
        }
    }

    pub fn skipped(original_path: PathBuf, error: BatchItemError) -> Self {
        Self {
            status: BatchItemStatus::Skipped,
            ..Self::failed(original_path, error)
        }
    }

    /// Record the result of moving the file
    pub fn with_relocation(mut self, result: std::io::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => self.final_path = path,
            Err(e) => self.relocation_error = Some(e.to_string()),
        }
        self
    }

    pub fn file_name(&self) -> String {
        self.original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Ordered outcomes of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub input_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub items: Vec<BatchItemOutcome>,
}

impl BatchReport {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            input_dir: input_dir.into(),
            started_at: now,
            finished_at: now,
            total: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: BatchItemOutcome) {
        self.total += 1;
        match outcome.status {
            BatchItemStatus::Succeeded => self.succeeded += 1,
            BatchItemStatus::Failed => self.failed += 1,
            BatchItemStatus::Skipped => self.skipped += 1,
        }
        self.items.push(outcome);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extraction::DocumentKind;

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::new("/in");
        report.push(BatchItemOutcome::succeeded("/in/a.txt".into(), None));
        report.push(BatchItemOutcome::failed(
            "/in/b.pdf".into(),
            ExtractionError::corrupt(DocumentKind::Pdf, "bad xref").into(),
        ));
        report.push(BatchItemOutcome::skipped(
            "/in/c.csv".into(),
            ExtractionError::unsupported(".csv").into(),
        ));

        let report = report.finish();
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_relocation_failure_keeps_original_path() {
        let outcome = BatchItemOutcome::succeeded("/in/a.txt".into(), None).with_relocation(Err(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        ));

        assert_eq!(outcome.status, BatchItemStatus::Succeeded);
        assert_eq!(outcome.final_path, PathBuf::from("/in/a.txt"));
        assert_eq!(outcome.relocation_error.as_deref(), Some("read-only"));
    }

    #[test]
    fn test_relocation_success_updates_final_path() {
        let outcome = BatchItemOutcome::succeeded("/in/a.txt".into(), None)
            .with_relocation(Ok("/in/processed/a.txt".into()));

        assert_eq!(outcome.final_path, PathBuf::from("/in/processed/a.txt"));
        assert!(outcome.relocation_error.is_none());
    }

    #[test]
    fn test_item_error_serialization() {
        let error: BatchItemError = ValidationError::TooShort {
            minimum: 100,
            actual: 12,
        }
        .into();

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "too_short");
        assert!(json["message"].as_str().unwrap().contains("12 characters"));
        assert_eq!(BatchItemError::Dispatch("timeout".into()).code(), "dispatch_failed");
    }
}
