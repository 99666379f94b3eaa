//! Background input-folder monitor

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::BatchProcessor;
use crate::domain::batch::{BatchError, BatchReport, ItemDispatcher};

/// Default seconds between monitor passes
pub const DEFAULT_MONITOR_INTERVAL_SECONDS: u64 = 30;

/// Periodically runs a batch pass over the input folder.
///
/// Shares the processor's run guard, so a pass that overlaps an
/// HTTP-triggered run is skipped rather than queued.
#[derive(Debug, Clone)]
pub struct FolderMonitor {
    processor: Arc<BatchProcessor>,
    dispatcher: Arc<dyn ItemDispatcher>,
    input_dir: PathBuf,
    interval: Duration,
}

impl FolderMonitor {
    pub fn new(
        processor: Arc<BatchProcessor>,
        dispatcher: Arc<dyn ItemDispatcher>,
        input_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            processor,
            dispatcher,
            input_dir: input_dir.into(),
            interval: Duration::from_secs(DEFAULT_MONITOR_INTERVAL_SECONDS),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run a single pass; `None` when nothing was processed or the pass was skipped
    pub async fn run_once(&self) -> Option<BatchReport> {
        match self
            .processor
            .process_folder(&self.input_dir, self.dispatcher.as_ref())
            .await
        {
            Ok(report) if report.is_empty() => None,
            Ok(report) => Some(report),
            Err(BatchError::AlreadyRunning) => {
                tracing::debug!("Batch run in progress, skipping monitor pass");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Monitor pass failed");
                None
            }
        }
    }

    /// Start the monitor loop. Abort the returned handle to stop it.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tracing::info!(
            input_dir = %self.input_dir.display(),
            interval_seconds = self.interval.as_secs(),
            "Starting input folder monitor"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if let Some(report) = self.run_once().await {
                    tracing::info!(
                        run_id = %report.run_id,
                        succeeded = report.succeeded,
                        failed = report.failed,
                        skipped = report.skipped,
                        "Monitor pass processed files"
                    );
                }
            }
        })
    }
}
