use clap::Parser;
use fieldguide_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    fieldguide_cli::run_main(cli).await
}
