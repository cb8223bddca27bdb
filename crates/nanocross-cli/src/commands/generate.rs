use crate::cli::GenerateArgs;
use crate::config::builder;
use crate::error::Result;
use crate::utils::progress::RunProgressBar;
use nanocross::engine::progress::ProgressReporter;
use nanocross::workflows;
use tracing::info;

pub fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = builder::build_generate_config(&args)?;
    let config = &app_config.core_config;

    let progress = if quiet {
        RunProgressBar::hidden()
    } else {
        RunProgressBar::new()
    };
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!(
        "Generating {} run(s) for theta = {}°, phi = {}°...",
        config.sweep.num_steps, app_config.theta_degrees, app_config.phi_degrees
    );
    info!("Invoking the generate workflow...");

    let summary = workflows::generate::run(config, &reporter)?;

    info!(
        "Workflow finished, wrote {} run directories.",
        summary.runs.len()
    );
    if let (Some(first), Some(last)) = (summary.runs.first(), summary.runs.last()) {
        println!(
            "✓ Wrote {} run directories ({:.3} to {:.3} Å, {} atoms and {} bonds each) under {}",
            summary.runs.len(),
            first.separation,
            last.separation,
            summary.atoms_per_run,
            summary.bonds_per_run,
            config.output_dir.display()
        );
    }
    Ok(())
}
