//! Command-line front-end for the fieldguide viewer.
//!
//! With no subcommand the interactive TUI starts; `list` and `show` print
//! the same data non-interactively for scripting.

mod list_cmd;
mod show_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use fieldguide_core::Config;
use fieldguide_core::ConfigOverrides;
use fieldguide_core::EscalationPolicy;
use tracing_subscriber::EnvFilter;

pub use list_cmd::ListArgs;
pub use show_cmd::ShowArgs;

/// Diagnostic-guide viewer: browse troubleshooting SOPs by symptom and
/// observability tier.
#[derive(Debug, Parser)]
#[command(name = "fieldguide", version)]
pub struct Cli {
    /// Path of the row table JSON.
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory holding `<lang>.json` translation catalogs.
    #[arg(long, global = true, value_name = "DIR")]
    pub locales: Option<PathBuf>,

    /// Language to start in.
    #[arg(long, global = true, value_name = "CODE")]
    pub lang: Option<String>,

    /// Escalation policy: `prompted` or `lock_chain`.
    #[arg(long, global = true, value_name = "POLICY")]
    pub policy: Option<String>,

    /// Explicit config file (default: `./fieldguide.toml` when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the symptom list, optionally filtered.
    List(ListArgs),
    /// Print the tier-grouped SOP steps for one symptom.
    Show(ShowArgs),
}

pub async fn run_main(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        data_path: cli.data,
        locales_dir: cli.locales,
        language: cli.lang,
        policy: cli.policy.as_deref().map(parse_policy).transpose()?,
    });
    match cli.command {
        None => fieldguide_tui::run_main(config)
            .await
            .map_err(|err| anyhow::anyhow!(err)),
        Some(Command::List(args)) => {
            init_logging();
            list_cmd::run(&config, args).await
        }
        Some(Command::Show(args)) => {
            init_logging();
            show_cmd::run(&config, args).await
        }
    }
}

fn parse_policy(raw: &str) -> Result<EscalationPolicy> {
    match raw {
        "prompted" => Ok(EscalationPolicy::Prompted),
        "lock_chain" | "lock-chain" => Ok(EscalationPolicy::LockChain),
        other => anyhow::bail!("unknown escalation policy `{other}`"),
    }
}

/// Subcommands log to stderr; the TUI sets up its own file logging.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
