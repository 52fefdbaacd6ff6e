use anyhow::Result;
use clap::Parser;
use fieldguide_core::Config;
use fieldguide_core::list_symptoms;
use fieldguide_core::load_rows;

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Case-insensitive substring filter over `id — label`.
    #[arg(long, default_value = "")]
    pub filter: String,
}

pub(crate) async fn run(config: &Config, args: ListArgs) -> Result<()> {
    let rows = match load_rows(&config.data_path).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!("dataset load failed: {err}");
            Vec::new()
        }
    };
    for entry in list_symptoms(&rows, &args.filter) {
        println!("{}", entry.display());
    }
    Ok(())
}
