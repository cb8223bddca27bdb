use crate::core::forcefield::params::CC_BOND_LENGTH;
use crate::core::io::lammps::LammpsOptions;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_RING_ATOM_COUNT: usize = 11;
pub const DEFAULT_TUBE_LENGTH: f64 = 150.0;
pub const DEFAULT_NUM_STEPS: usize = 100;
pub const DEFAULT_SEPARATION_START: f64 = 10.0;
pub const DEFAULT_SEPARATION_END: f64 = 20.0;
pub const DEFAULT_DATA_FILE_NAME: &str = "cnt.lammps";
pub const DEFAULT_FIX_FILE_NAME: &str = "cnt_interaction_force.data";
pub const DEFAULT_DUMP_FILE_NAME: &str = "cnt.dump";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Shape of both tubes in the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeConfig {
    pub bond_length: f64,
    pub ring_atom_count: usize,
    pub length: f64,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            bond_length: CC_BOND_LENGTH,
            ring_atom_count: DEFAULT_RING_ATOM_COUNT,
            length: DEFAULT_TUBE_LENGTH,
        }
    }
}

/// Direction of the second tube's axis, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub theta: f64,
    pub phi: f64,
}

impl Orientation {
    pub fn from_degrees(theta: f64, phi: f64) -> Self {
        Self {
            theta: theta.to_radians(),
            phi: phi.to_radians(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub tubes: TubeConfig,
    pub orientation: Orientation,
    pub num_steps: usize,
    /// Separation window before the orientation-dependent offset is added.
    pub separation_start: f64,
    pub separation_end: f64,
}

#[derive(Default)]
pub struct SweepConfigBuilder {
    bond_length: Option<f64>,
    ring_atom_count: Option<usize>,
    length: Option<f64>,
    orientation: Option<Orientation>,
    num_steps: Option<usize>,
    separation_start: Option<f64>,
    separation_end: Option<f64>,
}

impl SweepConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_length(mut self, bond_length: f64) -> Self {
        self.bond_length = Some(bond_length);
        self
    }
    pub fn ring_atom_count(mut self, count: usize) -> Self {
        self.ring_atom_count = Some(count);
        self
    }
    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
    pub fn num_steps(mut self, n: usize) -> Self {
        self.num_steps = Some(n);
        self
    }
    pub fn separation_start(mut self, start: f64) -> Self {
        self.separation_start = Some(start);
        self
    }
    pub fn separation_end(mut self, end: f64) -> Self {
        self.separation_end = Some(end);
        self
    }

    /// Only the orientation is required; everything else falls back to the reference
    /// (10,10) setup. Numeric validity is checked when the sweep starts.
    pub fn build(self) -> Result<SweepConfig, ConfigError> {
        let defaults = TubeConfig::default();
        Ok(SweepConfig {
            tubes: TubeConfig {
                bond_length: self.bond_length.unwrap_or(defaults.bond_length),
                ring_atom_count: self.ring_atom_count.unwrap_or(defaults.ring_atom_count),
                length: self.length.unwrap_or(defaults.length),
            },
            orientation: self
                .orientation
                .ok_or(ConfigError::MissingParameter("orientation"))?,
            num_steps: self.num_steps.unwrap_or(DEFAULT_NUM_STEPS),
            separation_start: self.separation_start.unwrap_or(DEFAULT_SEPARATION_START),
            separation_end: self.separation_end.unwrap_or(DEFAULT_SEPARATION_END),
        })
    }
}

/// An auxiliary file copied into every run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxFile {
    pub source: PathBuf,
    /// Destination file name; `{sep}` is replaced by the formatted separation.
    pub dest_template: String,
}

impl AuxFile {
    pub fn dest_name(&self, separation_label: &str) -> String {
        self.dest_template.replace("{sep}", separation_label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub sweep: SweepConfig,
    pub output_dir: PathBuf,
    pub data_file_name: String,
    pub export: LammpsOptions,
    pub aux_files: Vec<AuxFile>,
}

#[derive(Default)]
pub struct GenerateConfigBuilder {
    sweep: Option<SweepConfig>,
    output_dir: Option<PathBuf>,
    data_file_name: Option<String>,
    export: Option<LammpsOptions>,
    aux_files: Vec<AuxFile>,
}

impl GenerateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = Some(sweep);
        self
    }
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }
    pub fn data_file_name(mut self, name: impl Into<String>) -> Self {
        self.data_file_name = Some(name.into());
        self
    }
    pub fn export(mut self, options: LammpsOptions) -> Self {
        self.export = Some(options);
        self
    }
    pub fn aux_file(mut self, aux: AuxFile) -> Self {
        self.aux_files.push(aux);
        self
    }
    pub fn aux_files(mut self, aux: Vec<AuxFile>) -> Self {
        self.aux_files = aux;
        self
    }

    pub fn build(self) -> Result<GenerateConfig, ConfigError> {
        Ok(GenerateConfig {
            sweep: self.sweep.ok_or(ConfigError::MissingParameter("sweep"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            data_file_name: self
                .data_file_name
                .unwrap_or_else(|| DEFAULT_DATA_FILE_NAME.to_string()),
            export: self.export.unwrap_or_default(),
            aux_files: self.aux_files,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub runs_dir: PathBuf,
    pub fix_file_name: String,
    pub dump_file_name: String,
    pub table_path: PathBuf,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    runs_dir: Option<PathBuf>,
    fix_file_name: Option<String>,
    dump_file_name: Option<String>,
    table_path: Option<PathBuf>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs_dir(mut self, dir: PathBuf) -> Self {
        self.runs_dir = Some(dir);
        self
    }
    pub fn fix_file_name(mut self, name: impl Into<String>) -> Self {
        self.fix_file_name = Some(name.into());
        self
    }
    pub fn dump_file_name(mut self, name: impl Into<String>) -> Self {
        self.dump_file_name = Some(name.into());
        self
    }
    pub fn table_path(mut self, path: PathBuf) -> Self {
        self.table_path = Some(path);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        Ok(AnalysisConfig {
            runs_dir: self
                .runs_dir
                .ok_or(ConfigError::MissingParameter("runs_dir"))?,
            fix_file_name: self
                .fix_file_name
                .unwrap_or_else(|| DEFAULT_FIX_FILE_NAME.to_string()),
            dump_file_name: self
                .dump_file_name
                .unwrap_or_else(|| DEFAULT_DUMP_FILE_NAME.to_string()),
            table_path: self
                .table_path
                .ok_or(ConfigError::MissingParameter("table_path"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_builder_requires_orientation() {
        let result = SweepConfigBuilder::new().num_steps(10).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("orientation")));
    }

    #[test]
    fn sweep_builder_fills_reference_defaults() {
        let config = SweepConfigBuilder::new()
            .orientation(Orientation::from_degrees(90.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(config.tubes, TubeConfig::default());
        assert_eq!(config.tubes.ring_atom_count, 11);
        assert_eq!(config.num_steps, 100);
        assert_eq!(config.separation_start, 10.0);
        assert_eq!(config.separation_end, 20.0);
        assert!((config.orientation.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn sweep_builder_overrides_defaults() {
        let config = SweepConfigBuilder::new()
            .orientation(Orientation { theta: 0.1, phi: 0.2 })
            .bond_length(1.4)
            .ring_atom_count(6)
            .length(30.0)
            .num_steps(5)
            .separation_start(8.0)
            .separation_end(9.0)
            .build()
            .unwrap();
        assert_eq!(config.tubes.bond_length, 1.4);
        assert_eq!(config.tubes.ring_atom_count, 6);
        assert_eq!(config.tubes.length, 30.0);
        assert_eq!(config.num_steps, 5);
        assert_eq!(config.separation_end, 9.0);
    }

    #[test]
    fn aux_file_destination_substitutes_separation() {
        let aux = AuxFile {
            source: PathBuf::from("potential_test.pbs"),
            dest_template: "potential_{sep}.pbs".into(),
        };
        assert_eq!(aux.dest_name("10.100"), "potential_10.100.pbs");
    }

    #[test]
    fn generate_builder_requires_sweep_and_output() {
        assert_eq!(
            GenerateConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("sweep"))
        );
        let sweep = SweepConfigBuilder::new()
            .orientation(Orientation { theta: 0.0, phi: 0.0 })
            .build()
            .unwrap();
        assert_eq!(
            GenerateConfigBuilder::new().sweep(sweep.clone()).build(),
            Err(ConfigError::MissingParameter("output_dir"))
        );
        let config = GenerateConfigBuilder::new()
            .sweep(sweep)
            .output_dir(PathBuf::from("sims"))
            .build()
            .unwrap();
        assert_eq!(config.data_file_name, "cnt.lammps");
        assert!(config.aux_files.is_empty());
    }

    #[test]
    fn analysis_builder_uses_default_file_names() {
        let config = AnalysisConfigBuilder::new()
            .runs_dir(PathBuf::from("sims"))
            .table_path(PathBuf::from("table.data"))
            .build()
            .unwrap();
        assert_eq!(config.fix_file_name, "cnt_interaction_force.data");
        assert_eq!(config.dump_file_name, "cnt.dump");
    }
}
