//! Rewrite command - rewrite one email file from the terminal

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::domain::extraction::{DocumentKind, ExtractionError, IngestRequest};
use crate::domain::rewrite::{RewriteRequest, Tone};
use crate::domain::validation::{strip_control_chars, ContentRole};

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Email draft (.txt, .pdf or .docx)
    pub email: PathBuf,

    /// Text file describing the target audience
    pub context: PathBuf,

    #[arg(long, short, default_value = "professional")]
    pub tone: Tone,
}

pub async fn run(args: RewriteArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state(&config)?;

    let file_name = args
        .email
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = DocumentKind::from_filename(&file_name).ok_or_else(|| {
        ExtractionError::unsupported(crate::domain::extraction::extension_of(&file_name))
    })?;

    let bytes = tokio::fs::read(&args.email)
        .await
        .with_context(|| format!("Failed to read {}", args.email.display()))?;
    state.validator.check_size(bytes.len())?;

    let document = state
        .extractors
        .extract_blocking(IngestRequest::new(bytes, kind).with_file_name(file_name))
        .await?;
    state
        .validator
        .validate(document.text(), ContentRole::Email)
        .into_result()?;

    let context = tokio::fs::read_to_string(&args.context)
        .await
        .with_context(|| format!("Failed to read {}", args.context.display()))?;
    let context = strip_control_chars(&context).trim().to_string();
    if context.is_empty() {
        anyhow::bail!("Context file {} is empty", args.context.display());
    }

    let request = RewriteRequest::new(document.into_text(), context).with_tone(args.tone);
    let outcome = state.rewriter.rewrite(request).await?;

    println!("{}", outcome.content);
    eprintln!(
        "model={} tokens={} cost_usd={:.6}",
        outcome.model, outcome.usage.total_tokens, outcome.cost_usd
    );

    Ok(())
}
