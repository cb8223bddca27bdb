use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTubesConfig {
    pub ring_atom_count: Option<usize>,
    pub length: Option<f64>,
    pub bond_length: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOrientationConfig {
    pub theta_degrees: Option<f64>,
    pub phi_degrees: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSweepConfig {
    pub num_steps: Option<usize>,
    pub separation_start: Option<f64>,
    pub separation_end: Option<f64>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileAuxFile {
    pub source: PathBuf,
    /// Destination name inside each run directory; may contain `{sep}`.
    pub dest: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileExportConfig {
    pub data_file_name: Option<String>,
    pub box_half_width: Option<f64>,
    pub box_margin: Option<f64>,
    pub forcefield_path: Option<PathBuf>,
    pub aux_files: Option<Vec<FileAuxFile>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileAnalysisConfig {
    pub runs_dir: Option<PathBuf>,
    pub fix_file_name: Option<String>,
    pub dump_file_name: Option<String>,
    pub table_name: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub tubes: Option<FileTubesConfig>,
    pub orientation: Option<FileOrientationConfig>,
    pub sweep: Option<FileSweepConfig>,
    pub export: Option<FileExportConfig>,
    pub analysis: Option<FileAnalysisConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            CliError::FileParsing { source, .. } => CliError::FileParsing {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::FileParsing {
            path: PathBuf::from("<inline>"),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections() {
        let config = FileConfig::from_toml(
            r#"
            [tubes]
            ring-atom-count = 11
            length = 150.0
            bond-length = 1.417

            [orientation]
            theta-degrees = 90.0
            phi-degrees = 45.0

            [sweep]
            num-steps = 50
            separation-start = 12.0
            separation-end = 22.0

            [export]
            data-file-name = "system.data"
            box-margin = 10.0
            aux-files = [
                { source = "run.in" },
                { source = "potential_test.pbs", dest = "potential_{sep}.pbs" },
            ]

            [analysis]
            fix-file-name = "force.data"
            table-name = "table.data"
            "#,
        )
        .unwrap();

        assert_eq!(config.tubes.unwrap().ring_atom_count, Some(11));
        assert_eq!(config.orientation.unwrap().phi_degrees, Some(45.0));
        assert_eq!(config.sweep.unwrap().num_steps, Some(50));
        let export = config.export.unwrap();
        assert_eq!(export.box_margin, Some(10.0));
        let aux = export.aux_files.unwrap();
        assert_eq!(aux.len(), 2);
        assert_eq!(aux[0].dest, None);
        assert_eq!(aux[1].dest.as_deref(), Some("potential_{sep}.pbs"));
        assert_eq!(
            config.analysis.unwrap().table_name,
            Some(PathBuf::from("table.data"))
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = FileConfig::from_toml("[tubes]\nradius = 3.0\n");
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn from_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[sweep]\nnum-steps = \"many\"\n").unwrap();
        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
