use clap::Parser;
use email_rewriter::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::Batch(args) => cli::batch::run(args).await,
        Command::Rewrite(args) => cli::rewrite::run(args).await,
    }
}
