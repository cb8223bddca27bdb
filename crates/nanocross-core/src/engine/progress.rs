/// Events emitted by the workflows while they run.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A stage of unknown length begins.
    StageStart { name: &'static str },
    StageFinish,

    /// `total` run directories are about to be written or read.
    RunsStart { total: u64 },
    /// One run directory is done; `label` is its name, the formatted separation.
    RunDone { label: String },
    RunsFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow events to an optional callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a `StageStart` and a `StageFinish` event.
    pub fn stage<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::StageStart { name });
        let out = f();
        self.report(Progress::StageFinish);
        out
    }

    pub fn run_done(&self, label: &str) {
        if self.callback.is_some() {
            self.report(Progress::RunDone {
                label: label.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(seen: &Mutex<Vec<Progress>>) -> ProgressReporter<'_> {
        ProgressReporter::with_callback(Box::new(move |event| seen.lock().unwrap().push(event)))
    }

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::RunsFinish);
        reporter.run_done("10.100");
        assert_eq!(reporter.stage("Building Tubes", || 7), 7);
    }

    #[test]
    fn stage_brackets_the_closure() {
        let seen = Mutex::new(Vec::new());
        let reporter = recording(&seen);
        let value = reporter.stage("Scanning Runs", || {
            reporter.run_done("10.100");
            "scanned"
        });
        drop(reporter);

        assert_eq!(value, "scanned");
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                Progress::StageStart {
                    name: "Scanning Runs"
                },
                Progress::RunDone {
                    label: "10.100".into()
                },
                Progress::StageFinish,
            ]
        );
    }

    #[test]
    fn stage_finishes_even_when_the_closure_fails() {
        let seen = Mutex::new(Vec::new());
        let reporter = recording(&seen);
        let result: Result<(), &str> = reporter.stage("Building Tubes", || Err("bad tube"));
        drop(reporter);

        assert!(result.is_err());
        assert_eq!(seen.into_inner().unwrap().last(), Some(&Progress::StageFinish));
    }
}
