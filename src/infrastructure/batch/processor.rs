//! Batch folder processor
//!
//! Walks the input folder once, running each supported file through
//! extraction, validation and dispatch, then moves it to `processed/` or
//! `errors/`. A failing file never aborts the run.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::fs::file_timestamp;
use super::scanner::{scan_input_dir, DiscoveredFile};
use crate::domain::batch::{
    BatchError, BatchItemError, BatchItemOutcome, BatchReport, DispatchItem, FileRelocator,
    ItemDispatcher, ERRORS_DIR, PROCESSED_DIR,
};
use crate::domain::extraction::{DocumentKind, ExtractionError, IngestRequest};
use crate::domain::validation::{ContentRole, ContentValidator};
use crate::infrastructure::extraction::ExtractorRegistry;

/// Runs batch passes over an input folder, one at a time
#[derive(Debug)]
pub struct BatchProcessor {
    registry: ExtractorRegistry,
    validator: ContentValidator,
    relocator: Arc<dyn FileRelocator>,
    run_guard: Mutex<()>,
}

impl BatchProcessor {
    pub fn new(
        registry: ExtractorRegistry,
        validator: ContentValidator,
        relocator: Arc<dyn FileRelocator>,
    ) -> Self {
        Self {
            registry,
            validator,
            relocator,
            run_guard: Mutex::new(()),
        }
    }

    /// Whether a run currently holds the guard
    pub fn is_running(&self) -> bool {
        self.run_guard.try_lock().is_err()
    }

    /// Process every file directly inside `input_dir`.
    ///
    /// Fails fast with `AlreadyRunning` when another run holds the guard.
    pub async fn process_folder(
        &self,
        input_dir: &Path,
        dispatcher: &dyn ItemDispatcher,
    ) -> Result<BatchReport, BatchError> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| BatchError::AlreadyRunning)?;

        let start = Instant::now();
        let mut report = BatchReport::new(input_dir);
        let files = scan_input_dir(input_dir).await?;

        info!(
            run_id = %report.run_id,
            input_dir = %input_dir.display(),
            files = files.len(),
            "Starting batch run"
        );

        for file in files {
            let outcome = self.process_file(input_dir, file, dispatcher).await;
            report.push(outcome);
        }

        let report = report.finish();
        info!(
            run_id = %report.run_id,
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch run finished"
        );

        Ok(report)
    }

    async fn process_file(
        &self,
        input_dir: &Path,
        file: DiscoveredFile,
        dispatcher: &dyn ItemDispatcher,
    ) -> BatchItemOutcome {
        let Some(kind) = file.kind.filter(|k| self.registry.supports(*k)) else {
            let extension = crate::domain::extraction::extension_of(&file.file_name);
            info!(file = %file.file_name, "Skipping unsupported file");
            return BatchItemOutcome::skipped(
                file.path,
                ExtractionError::unsupported(extension).into(),
            );
        };

        let outcome = match self.run_pipeline(&file, kind, dispatcher).await {
            Ok(output_path) => {
                info!(file = %file.file_name, "Processed file");
                BatchItemOutcome::succeeded(file.path.clone(), output_path)
            }
            Err(error) => {
                warn!(file = %file.file_name, code = error.code(), error = %error, "File failed");
                BatchItemOutcome::failed(file.path.clone(), error)
            }
        };

        let (target_dir, target_name) = match outcome.error {
            None => (input_dir.join(PROCESSED_DIR), file.file_name.clone()),
            Some(_) => (
                input_dir.join(ERRORS_DIR),
                format!("error_{}_{}", file_timestamp(), file.file_name),
            ),
        };

        let moved = self
            .relocator
            .relocate(&file.path, &target_dir, &target_name)
            .await;
        if let Err(ref e) = moved {
            warn!(file = %file.file_name, error = %e, "Failed to move file");
        }

        outcome.with_relocation(moved)
    }

    async fn run_pipeline(
        &self,
        file: &DiscoveredFile,
        kind: DocumentKind,
        dispatcher: &dyn ItemDispatcher,
    ) -> Result<Option<std::path::PathBuf>, BatchItemError> {
        self.validator
            .check_size(usize::try_from(file.byte_len).unwrap_or(usize::MAX))?;

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| BatchItemError::Read(e.to_string()))?;
        // The file may have grown since discovery
        self.validator.check_size(bytes.len())?;

        let request = IngestRequest::new(bytes, kind).with_file_name(file.file_name.clone());
        let document = self.registry.extract_blocking(request).await?;

        self.validator
            .validate(document.text(), ContentRole::Email)
            .into_result()?;

        dispatcher
            .dispatch(DispatchItem {
                source_path: file.path.clone(),
                document,
            })
            .await
            .map_err(|e| BatchItemError::Dispatch(e.to_string()))
    }
}
