//! CLI module for the Email Rewriter
//!
//! Provides subcommands for running the service in different modes:
//! - `serve`: HTTP API server (default)
//! - `batch`: a single pass over the input folder
//! - `rewrite`: rewrite one email file from the terminal

pub mod batch;
pub mod rewrite;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Email Rewriter - AI rewriting of email drafts for a target audience
#[derive(Parser)]
#[command(name = "email-rewriter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default mode)
    Serve,

    /// Process the input folder once and print the JSON report
    Batch(batch::BatchArgs),

    /// Rewrite an email file for the audience described in a context file
    Rewrite(rewrite::RewriteArgs),
}

/// Load `.env` and configuration, then install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
