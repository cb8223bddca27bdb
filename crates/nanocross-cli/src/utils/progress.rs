use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use nanocross::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Draws workflow progress: a spinner while a stage runs, and a bar over run
/// directories labelled with the separation of the last finished run.
#[derive(Clone)]
pub struct RunProgressBar {
    bar: ProgressBar,
}

impl RunProgressBar {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Tracks state without drawing, for `--quiet`.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, target),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event: Progress| Self::apply(&bar, event))
    }

    fn apply(bar: &ProgressBar, event: Progress) {
        match event {
            Progress::StageStart { name } => {
                bar.reset();
                bar.set_style(spinner_style());
                bar.set_prefix(name);
                bar.set_message("");
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::RunsStart { total } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total);
                bar.set_style(run_style());
            }
            Progress::RunDone { label } => {
                bar.set_message(format!("{} Å", label));
                bar.inc(1);
            }
            Progress::RunsFinish => bar.finish(),
            Progress::StageFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message("done");
            }
        }
    }
}

impl Default for RunProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix} {msg}")
        .expect("Failed to create spinner style template")
}

fn run_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:<14} [{bar:40.cyan/blue}] {pos}/{len} runs  {msg}")
        .expect("Failed to create run bar style template")
        .progress_chars("##-")
}
