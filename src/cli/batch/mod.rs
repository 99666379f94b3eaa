//! Batch command - one pass over the input folder

use std::path::PathBuf;

use clap::Args;

use crate::domain::rewrite::Tone;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Audience the rewrites are written for; defaults to the monitor audience
    #[arg(long, short = 'a')]
    pub target_audience: Option<String>,

    #[arg(long, short, default_value = "professional")]
    pub tone: Tone,

    /// Override the configured input folder
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state(&config)?;

    let audience = args
        .target_audience
        .unwrap_or_else(|| config.folders.monitor_target_audience.clone());
    let input_dir = args.input_dir.unwrap_or_else(|| config.folders.input_dir.clone());

    let dispatcher = state.batch_dispatcher(&audience, args.tone);
    let report = state
        .batch_processor
        .process_folder(&input_dir, &dispatcher)
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.failed > 0 {
        anyhow::bail!("{} of {} files failed", report.failed, report.total);
    }

    Ok(())
}
