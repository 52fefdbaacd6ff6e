use anyhow::Result;
use clap::Parser;
use fieldguide_core::Catalog;
use fieldguide_core::Config;
use fieldguide_core::TierStep;
use fieldguide_core::compute_view;
use fieldguide_core::load_rows;

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Symptom id, e.g. `S1`.
    pub symptom_id: String,

    /// Escalation cursor position (0-based index into the tier set).
    #[arg(long, default_value_t = 0)]
    pub cursor: usize,
}

pub(crate) async fn run(config: &Config, args: ShowArgs) -> Result<()> {
    let rows = match load_rows(&config.data_path).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!("dataset load failed: {err}");
            Vec::new()
        }
    };
    let catalog = match Catalog::load(&config.locales_dir, &config.language).await {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!("catalog load failed: {err}");
            Catalog::empty(config.language.clone())
        }
    };

    let views = compute_view(&rows, &args.symptom_id, args.cursor, config.policy);
    if views.is_empty() {
        // Recoverable not-found: nothing to show, not an error.
        eprintln!("no rows for symptom `{}`", args.symptom_id);
        return Ok(());
    }

    println!("{}", args.symptom_id);
    if let Some(label) = rows
        .iter()
        .find(|row| row.symptom_id == args.symptom_id)
        .map(|row| row.symptom_label.as_str())
    {
        println!("{label}");
    }
    for view in &views {
        println!();
        println!("## {}", catalog.resolve(view.title_key));
        if view.locked {
            println!("[{}]", catalog.resolve("locked"));
            continue;
        }
        for step in &view.steps {
            match step {
                TierStep::Check(text) => println!("- [ ] {text}"),
                TierStep::MissingSop => println!("({})", catalog.resolve("sop_missing")),
            }
        }
        if view.offer_resolution {
            println!(
                "{}? [{}/{}]",
                catalog.resolve("resolved"),
                catalog.resolve("yes"),
                catalog.resolve("no"),
            );
        }
    }
    Ok(())
}
