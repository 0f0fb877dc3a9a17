//! Juicer CLI
//!
//! Installs and removes Google Closure Compiler versions under `$JUICER_HOME`.

mod cli;

use clap::Parser;
use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("juicer={level}").parse()?)
                .add_directive(format!("juicer_core={level}").parse()?),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting juicer v{}", juicer_core::VERSION);

    cli::execute(cli).await
}
