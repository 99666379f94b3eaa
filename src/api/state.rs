//! Application state for shared services

use std::sync::Arc;
use std::time::Instant;

use crate::config::FoldersConfig;
use crate::domain::rewrite::{EmailRewriter, Tone};
use crate::domain::validation::ContentValidator;
use crate::infrastructure::batch::{BatchProcessor, FsRelocator, RewriteDispatcher};
use crate::infrastructure::extraction::ExtractorRegistry;
use crate::infrastructure::rate_limit::FixedWindowRateLimiter;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub rewriter: Arc<dyn EmailRewriter>,
    pub extractors: ExtractorRegistry,
    pub validator: ContentValidator,
    /// `None` when rate limiting is disabled
    pub rate_limiter: Option<Arc<FixedWindowRateLimiter>>,
    pub batch_processor: Arc<BatchProcessor>,
    pub folders: Arc<FoldersConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(rewriter: Arc<dyn EmailRewriter>, folders: FoldersConfig) -> Self {
        let extractors = ExtractorRegistry::default();
        let validator = ContentValidator::default();
        let batch_processor = Arc::new(BatchProcessor::new(
            extractors.clone(),
            validator,
            Arc::new(FsRelocator::new()),
        ));

        Self {
            rewriter,
            extractors,
            validator,
            rate_limiter: None,
            batch_processor,
            folders: Arc::new(folders),
            started_at: Instant::now(),
        }
    }

    /// Replace the validator; the batch processor is rebuilt to share it
    pub fn with_validator(mut self, validator: ContentValidator) -> Self {
        self.validator = validator;
        self.batch_processor = Arc::new(BatchProcessor::new(
            self.extractors.clone(),
            validator,
            Arc::new(FsRelocator::new()),
        ));
        self
    }

    pub fn with_rate_limiter(mut self, limiter: FixedWindowRateLimiter) -> Self {
        self.rate_limiter = Some(Arc::new(limiter));
        self
    }

    /// Dispatcher writing rewrites for `target_audience` into the output folder
    pub fn batch_dispatcher(&self, target_audience: &str, tone: Tone) -> RewriteDispatcher {
        RewriteDispatcher::new(
            self.rewriter.clone(),
            self.folders.output_dir.clone(),
            target_audience,
        )
        .with_tone(tone)
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
