//! Interactive terminal viewer for the fieldguide dataset.
//!
//! The viewer shows a searchable symptom list; selecting a symptom opens a
//! detail view whose SOP steps are grouped into observability tiers by the
//! escalation engine in `fieldguide-core`. All state changes flow through a
//! single app-event channel.

mod app;
mod app_event;
mod app_event_sender;
mod detail_view;
mod hint_bar;
mod list_view;
mod render;
mod state;
mod tui;

use color_eyre::Result;
use fieldguide_core::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Run the viewer until the user exits.
pub async fn run_main(config: Config) -> Result<()> {
    color_eyre::install()?;
    let _log_guard = init_logging()?;
    let mut tui = tui::Tui::new()?;
    let result = app::App::run(&mut tui, config).await;
    tui::restore();
    result
}

/// Log to a file under the temp dir; stdout belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = std::env::temp_dir().join("fieldguide");
    std::fs::create_dir_all(&log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "fieldguide-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
