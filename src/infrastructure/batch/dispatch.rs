use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;

use super::output::save_output_file;
use crate::domain::batch::{DispatchItem, ItemDispatcher};
use crate::domain::rewrite::{EmailRewriter, RewriteOutcome, RewriteRequest, Tone};
use crate::domain::DomainError;

/// Rewrites each batch item and writes the result to the output folder
#[derive(Debug, Clone)]
pub struct RewriteDispatcher {
    rewriter: Arc<dyn EmailRewriter>,
    output_dir: PathBuf,
    target_audience: String,
    tone: Tone,
}

impl RewriteDispatcher {
    pub fn new(
        rewriter: Arc<dyn EmailRewriter>,
        output_dir: impl Into<PathBuf>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            rewriter,
            output_dir: output_dir.into(),
            target_audience: target_audience.into(),
            tone: Tone::default(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    fn render_output(&self, item: &DispatchItem, outcome: &RewriteOutcome) -> String {
        let source = item
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        format!(
            "{}\n\n---\nProcessed for: {}\nTone: {}\nModel: {}\nTokens: {}\nEstimated cost: ${:.6}\nSource file: {}\nProcessed at: {}\n",
            outcome.content,
            self.target_audience,
            self.tone.label(),
            outcome.model,
            outcome.usage.total_tokens,
            outcome.cost_usd,
            source,
            Local::now().to_rfc3339(),
        )
    }
}

#[async_trait]
impl ItemDispatcher for RewriteDispatcher {
    async fn dispatch(&self, item: DispatchItem) -> Result<Option<PathBuf>, DomainError> {
        let request = RewriteRequest::new(item.document.text(), self.target_audience.clone())
            .with_tone(self.tone);

        let outcome = self.rewriter.rewrite(request).await?;
        let content = self.render_output(&item, &outcome);

        let path = save_output_file(
            &content,
            &self.output_dir,
            &format!("processed_{}", item.stem()),
        )
        .await?;

        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extraction::{DocumentKind, ExtractedDocument};
    use crate::domain::rewrite::MockEmailRewriter;

    fn item(name: &str) -> DispatchItem {
        DispatchItem {
            source_path: PathBuf::from("/in").join(name),
            document: ExtractedDocument::new("Please review the attached plan.", DocumentKind::Text)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_writes_output() {
        let out = tempfile::tempdir().unwrap();
        let rewriter = Arc::new(MockEmailRewriter::new().with_reply("Dear board,\n\nPlan attached."));
        let dispatcher = RewriteDispatcher::new(rewriter.clone(), out.path(), "Board members")
            .with_tone(Tone::Casual);

        let path = dispatcher.dispatch(item("plan.txt")).await.unwrap().unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("processed_plan_"));

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("Dear board,\n\nPlan attached."));
        assert!(written.contains("Processed for: Board members"));
        assert!(written.contains("Tone: Casual"));
        assert!(written.contains("Source file: plan.txt"));

        let requests = rewriter.requests();
        assert_eq!(requests[0].email_text, "Please review the attached plan.");
        assert_eq!(requests[0].tone, Tone::Casual);
    }

    #[tokio::test]
    async fn test_rewrite_error_writes_nothing() {
        let out = tempfile::tempdir().unwrap();
        let rewriter = Arc::new(MockEmailRewriter::new().with_error("quota exceeded"));
        let dispatcher = RewriteDispatcher::new(rewriter, out.path(), "Board members");

        assert!(dispatcher.dispatch(item("plan.txt")).await.is_err());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
