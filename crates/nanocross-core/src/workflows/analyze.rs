use crate::core::io::dump::DumpFile;
use crate::core::io::fix::FixFile;
use crate::core::io::table::{self, TableRow};
use crate::core::io::traits::RecordFile;
use crate::engine::analysis;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A run directory whose name parsed as a separation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDirectory {
    pub separation: f64,
    /// Directory name as found on disk.
    pub label: String,
    pub path: PathBuf,
}

/// Lists the run directories under `runs_dir`.
///
/// Entries that are not directories are ignored; directories whose name is not a
/// number are skipped with a warning. The result is in no particular order.
pub fn discover_runs(runs_dir: &Path) -> Result<Vec<RunDirectory>, EngineError> {
    let io_err = |source| EngineError::Io {
        path: runs_dir.to_path_buf(),
        source,
    };

    let mut runs = Vec::new();
    for entry in fs::read_dir(runs_dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let label = entry.file_name().to_string_lossy().into_owned();
        match label.trim().parse::<f64>() {
            Ok(separation) if separation.is_finite() => runs.push(RunDirectory {
                separation,
                label,
                path,
            }),
            _ => warn!(dir = %path.display(), "Skipping directory without a numeric separation name"),
        }
    }
    Ok(runs)
}

/// Reads one run's fix and dump outputs into a table row.
pub fn analyze_run(run: &RunDirectory, config: &AnalysisConfig) -> Result<TableRow, EngineError> {
    let fix_path = run.path.join(&config.fix_file_name);
    let interaction = FixFile::read_from_path(&fix_path).map_err(|source| EngineError::Fix {
        path: fix_path.clone(),
        source,
    })?;

    let dump_path = run.path.join(&config.dump_file_name);
    let frame = DumpFile::read_from_path(&dump_path).map_err(|source| EngineError::Dump {
        path: dump_path.clone(),
        source,
    })?;

    debug!(
        separation = run.separation,
        atoms = frame.atoms.len(),
        "Parsed run outputs"
    );
    analysis::table_row(run.separation, interaction, &frame)
}

#[instrument(skip_all, name = "analyze_workflow")]
pub fn run(config: &AnalysisConfig, reporter: &ProgressReporter) -> Result<Vec<TableRow>, EngineError> {
    let runs = reporter.stage("Scanning Runs", || discover_runs(&config.runs_dir))?;
    info!(
        runs = runs.len(),
        dir = %config.runs_dir.display(),
        "Found run directories."
    );

    reporter.report(Progress::StageStart {
        name: "Reading Outputs",
    });
    reporter.report(Progress::RunsStart {
        total: runs.len() as u64,
    });
    let mut rows = runs
        .par_iter()
        .map(|run| {
            let row = analyze_run(run, config);
            reporter.run_done(&run.label);
            row
        })
        .collect::<Result<Vec<_>, _>>()?;
    reporter.report(Progress::RunsFinish);
    reporter.report(Progress::StageFinish);

    rows.sort_by(|a, b| a.separation.total_cmp(&b.separation));

    table::write_table_to_path(&rows, &config.table_path)?;
    info!(
        rows = rows.len(),
        table = %config.table_path.display(),
        "Wrote results table."
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::AnalysisConfigBuilder;
    use nalgebra::Vector3;
    use tempfile::{TempDir, tempdir};

    const DUMP: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
4
ITEM: BOX BOUNDS pp pp pp
-100 100
-100 100
-100 100
ITEM: ATOMS id mol x y z fx fy fz
1 1 1.0 0.0 0.0 0.0 1.0 0.0
2 1 -1.0 0.0 0.0 0.0 -1.0 0.0
3 2 0.0 10.0 1.0 0.0 0.5 0.0
4 2 0.0 10.0 -1.0 0.0 0.5 0.0
";

    fn write_run(root: &Path, name: &str, energy: f64) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("cnt_interaction_force.data"),
            format!("# Time-averaged data\n# TimeStep value\n0 {}\n", energy),
        )
        .unwrap();
        fs::write(dir.join("cnt.dump"), DUMP).unwrap();
    }

    fn config(root: &TempDir) -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .runs_dir(root.path().join("sims"))
            .table_path(root.path().join("table.data"))
            .build()
            .unwrap()
    }

    #[test]
    fn rows_are_sorted_by_separation() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "12.000", -1.5);
        write_run(&sims, "10.100", -3.0);
        write_run(&sims, "11.050", -2.0);

        let rows = run(&config(&root), &ProgressReporter::new()).unwrap();
        let seps: Vec<f64> = rows.iter().map(|r| r.separation).collect();
        assert_eq!(seps, vec![10.1, 11.05, 12.0]);
        assert_eq!(rows[0].interaction, -3.0);
        assert_eq!(rows[0].torque1, Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(rows[0].force2, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn progress_reports_every_run_directory() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "10.100", -3.0);
        write_run(&sims, "10.200", -2.5);

        let labels = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::RunDone { label } = event {
                labels.lock().unwrap().push(label);
            }
        }));
        run(&config(&root), &reporter).unwrap();
        drop(reporter);

        let mut labels = labels.into_inner().unwrap();
        labels.sort();
        assert_eq!(labels, vec!["10.100", "10.200"]);
    }

    #[test]
    fn table_file_is_written() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "10.100", -3.0);
        let config = config(&root);
        run(&config, &ProgressReporter::new()).unwrap();

        let text = fs::read_to_string(&config.table_path).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("# sep\tenergy"));
        assert!(lines.next().unwrap().starts_with("10.100\t-3\t"));
        let parsed = table::read_table(text.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn non_numeric_directories_and_files_are_skipped() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "10.100", -3.0);
        fs::create_dir_all(sims.join("scripts")).unwrap();
        fs::write(sims.join("11.000"), "not a directory").unwrap();

        let runs = discover_runs(&sims).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].separation, 10.1);
    }

    #[test]
    fn missing_dump_names_the_file() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "10.100", -3.0);
        fs::remove_file(sims.join("10.100").join("cnt.dump")).unwrap();

        match run(&config(&root), &ProgressReporter::new()) {
            Err(EngineError::Dump { path, .. }) => assert!(path.ends_with("cnt.dump")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn dump_without_second_tube_is_rejected() {
        let root = tempdir().unwrap();
        let sims = root.path().join("sims");
        write_run(&sims, "10.100", -3.0);
        fs::write(
            sims.join("10.100").join("cnt.dump"),
            "ITEM: ATOMS id mol x y z fx fy fz\n1 1 0 0 0 0 0 0\n",
        )
        .unwrap();

        assert!(matches!(
            run(&config(&root), &ProgressReporter::new()),
            Err(EngineError::EmptyTube { .. })
        ));
    }

    #[test]
    fn missing_runs_directory_is_an_io_error() {
        let root = tempdir().unwrap();
        assert!(matches!(
            run(&config(&root), &ProgressReporter::new()),
            Err(EngineError::Io { .. })
        ));
    }
}
