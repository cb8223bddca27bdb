use crate::cli::AnalyzeArgs;
use crate::config::builder;
use crate::error::Result;
use crate::utils::progress::RunProgressBar;
use nanocross::engine::progress::ProgressReporter;
use nanocross::workflows;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let app_config = builder::build_analysis_config(&args)?;
    let config = &app_config.core_config;

    let progress = if quiet {
        RunProgressBar::hidden()
    } else {
        RunProgressBar::new()
    };
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!(
        "Analyzing run directories in {}...",
        config.runs_dir.display()
    );
    info!("Invoking the analyze workflow...");

    let rows = workflows::analyze::run(config, &reporter)?;

    if rows.is_empty() {
        warn!("No run directories found; the table has only its header.");
        println!(
            "Warning: no run directories found in {}.",
            config.runs_dir.display()
        );
    }
    println!(
        "✓ Wrote {} row(s) to {}",
        rows.len(),
        config.table_path.display()
    );
    Ok(())
}
