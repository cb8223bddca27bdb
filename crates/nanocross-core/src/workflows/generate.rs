use crate::core::io::lammps::LammpsDataFile;
use crate::core::io::traits::GeometryFile;
use crate::engine::config::GenerateConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sweep::{SeparationRange, Sweep, SweepStep, run_label};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// One run directory written by [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRun {
    pub index: usize,
    pub separation: f64,
    /// Directory name: the separation with three decimals.
    pub label: String,
    pub directory: PathBuf,
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub runs: Vec<GeneratedRun>,
    pub atoms_per_run: usize,
    pub bonds_per_run: usize,
}

#[instrument(skip_all, name = "generate_workflow")]
pub fn run(config: &GenerateConfig, reporter: &ProgressReporter) -> Result<GenerateSummary, EngineError> {
    let sweep = reporter.stage("Building Tubes", || -> Result<Sweep, EngineError> {
        for aux in &config.aux_files {
            fs::metadata(&aux.source).map_err(|source| EngineError::Io {
                path: aux.source.clone(),
                source,
            })?;
        }
        let sweep = Sweep::new(&config.sweep)?;
        check_unique_labels(sweep.range())?;
        Ok(sweep)
    })?;

    create_dir(&config.output_dir)?;

    reporter.report(Progress::StageStart {
        name: "Writing Runs",
    });
    reporter.report(Progress::RunsStart {
        total: sweep.len() as u64,
    });

    let mut runs = Vec::with_capacity(sweep.len());
    let mut counts = (0, 0);
    for step in sweep {
        counts = (step.geometry.atoms().len(), step.geometry.bonds().len());
        let run = write_run(&step, config)?;
        reporter.run_done(&run.label);
        runs.push(run);
    }

    reporter.report(Progress::RunsFinish);
    reporter.report(Progress::StageFinish);

    info!(
        runs = runs.len(),
        output = %config.output_dir.display(),
        "Generated run directories."
    );
    Ok(GenerateSummary {
        runs,
        atoms_per_run: counts.0,
        bonds_per_run: counts.1,
    })
}

/// Fails if two separations of the sweep would share a run directory.
fn check_unique_labels(range: &SeparationRange) -> Result<(), EngineError> {
    let mut seen: HashMap<String, f64> = HashMap::with_capacity(range.num_steps);
    for separation in range.separations() {
        match seen.entry(run_label(separation)) {
            Entry::Occupied(entry) => {
                return Err(EngineError::DuplicateRunLabel {
                    label: entry.key().clone(),
                    first: *entry.get(),
                    second: separation,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(separation);
            }
        }
    }
    Ok(())
}

fn write_run(step: &SweepStep, config: &GenerateConfig) -> Result<GeneratedRun, EngineError> {
    let label = step.label();
    let directory = config.output_dir.join(&label);
    create_dir(&directory)?;

    for aux in &config.aux_files {
        let dest = directory.join(aux.dest_name(&label));
        fs::copy(&aux.source, &dest).map_err(|source| EngineError::AuxCopy {
            from: aux.source.clone(),
            to: dest.clone(),
            source,
        })?;
    }

    let data_file = directory.join(&config.data_file_name);
    LammpsDataFile::write_to_path(&step.geometry, &config.export, &data_file).map_err(|source| {
        EngineError::Export {
            path: data_file.clone(),
            source,
        }
    })?;

    debug!(step = step.index, dir = %directory.display(), "Wrote run directory");
    Ok(GeneratedRun {
        index: step.index,
        separation: step.separation,
        label,
        directory,
        data_file,
    })
}

fn create_dir(path: &Path) -> Result<(), EngineError> {
    fs::create_dir_all(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::lammps::{BoxSpec, LammpsOptions};
    use crate::engine::config::{
        AuxFile, GenerateConfigBuilder, Orientation, SweepConfigBuilder,
    };
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn config(output_dir: &Path, num_steps: usize) -> GenerateConfig {
        let sweep = SweepConfigBuilder::new()
            .orientation(Orientation::from_degrees(90.0, 0.0))
            .ring_atom_count(5)
            .length(12.0)
            .num_steps(num_steps)
            .build()
            .unwrap();
        GenerateConfigBuilder::new()
            .sweep(sweep)
            .output_dir(output_dir.to_path_buf())
            .build()
            .unwrap()
    }

    #[test]
    fn writes_one_directory_per_step() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sims");
        let summary = run(&config(&out, 4), &ProgressReporter::new()).unwrap();

        assert_eq!(summary.runs.len(), 4);
        let names: Vec<String> = summary
            .runs
            .iter()
            .map(|r| r.directory.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["12.500", "15.000", "17.500", "20.000"]);
        for run in &summary.runs {
            let text = fs::read_to_string(&run.data_file).unwrap();
            assert!(text.starts_with("LAMMPS Description"));
            assert!(text.contains(&format!("\t{} atoms", summary.atoms_per_run)));
            assert_eq!(run.data_file.file_name().unwrap(), "cnt.lammps");
        }
    }

    #[test]
    fn aux_files_are_copied_with_separation_in_name() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("potential.pbs");
        fs::write(&script, "#PBS -N cnt\n").unwrap();
        let input = dir.path().join("in.cnt");
        fs::write(&input, "read_data cnt.lammps\n").unwrap();

        let out = dir.path().join("sims");
        let mut config = config(&out, 2);
        config.aux_files = vec![
            AuxFile {
                source: script,
                dest_template: "potential_{sep}.pbs".into(),
            },
            AuxFile {
                source: input,
                dest_template: "in.cnt".into(),
            },
        ];
        run(&config, &ProgressReporter::new()).unwrap();

        let run_dir = out.join("15.000");
        assert_eq!(
            fs::read_to_string(run_dir.join("potential_15.000.pbs")).unwrap(),
            "#PBS -N cnt\n"
        );
        assert!(run_dir.join("in.cnt").is_file());
        assert!(out.join("20.000").join("potential_20.000.pbs").is_file());
    }

    #[test]
    fn missing_aux_file_fails_before_writing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sims");
        let mut config = config(&out, 2);
        config.aux_files.push(AuxFile {
            source: dir.path().join("absent.pbs"),
            dest_template: "absent.pbs".into(),
        });

        let result = run(&config, &ProgressReporter::new());
        match result {
            Err(EngineError::Io { path, .. }) => assert!(path.ends_with("absent.pbs")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn export_errors_name_the_data_file() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path(), 1);
        config.export = LammpsOptions {
            box_spec: BoxSpec::Fixed { lo: -1.0, hi: 1.0 },
            ..Default::default()
        };
        match run(&config, &ProgressReporter::new()) {
            Err(EngineError::Export { path, .. }) => assert!(path.ends_with("cnt.lammps")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_sweep_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path(), 1);
        config.sweep.num_steps = 0;
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::Geometry(_))
        ));
    }

    #[test]
    fn progress_reports_each_run_label() {
        let dir = tempdir().unwrap();
        let labels = Mutex::new(Vec::new());
        let total = Mutex::new(None);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::RunsStart { total: n } => *total.lock().unwrap() = Some(n),
            Progress::RunDone { label } => labels.lock().unwrap().push(label),
            _ => {}
        }));
        run(&config(dir.path(), 4), &reporter).unwrap();
        drop(reporter);

        assert_eq!(total.into_inner().unwrap(), Some(4));
        assert_eq!(
            labels.into_inner().unwrap(),
            vec!["12.500", "15.000", "17.500", "20.000"]
        );
    }

    #[test]
    fn colliding_run_names_fail_before_writing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sims");
        let mut config = config(&out, 40);
        config.sweep.separation_start = 10.0;
        config.sweep.separation_end = 10.01;

        match run(&config, &ProgressReporter::new()) {
            Err(EngineError::DuplicateRunLabel {
                label,
                first,
                second,
            }) => {
                assert_eq!(run_label(first), label);
                assert_eq!(run_label(second), label);
                assert!(second > first);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn many_steps_with_distinct_names_are_all_written() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sims");
        let mut config = config(&out, 10);
        config.sweep.separation_start = 10.0;
        config.sweep.separation_end = 10.01;

        let summary = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(fs::read_dir(&out).unwrap().count(), summary.runs.len());
        assert_eq!(summary.runs.len(), 10);
    }

    #[test]
    fn failed_aux_copy_names_the_destination() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.cnt");
        fs::write(&input, "read_data cnt.lammps\n").unwrap();

        let out = dir.path().join("sims");
        fs::create_dir_all(out.join("20.000").join("in.cnt")).unwrap();
        let mut config = config(&out, 4);
        config.aux_files.push(AuxFile {
            source: input.clone(),
            dest_template: "in.cnt".into(),
        });

        match run(&config, &ProgressReporter::new()) {
            Err(EngineError::AuxCopy { from, to, .. }) => {
                assert_eq!(from, input);
                assert_eq!(to, out.join("20.000").join("in.cnt"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
