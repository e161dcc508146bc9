use clap::Parser;

mod cli;
mod commands;
mod config;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    utils::logging::init_tracing(&utils::logging::default_directive(cli.verbose));

    commands::run(cli).await
}
