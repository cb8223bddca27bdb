use thiserror::Error;

use super::config::ConfigError;
use crate::core::error::GeometryError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::io::dump::DumpError;
use crate::core::io::fix::FixError;
use crate::core::io::lammps::LammpsError;
use crate::core::io::table::TableError;
use crate::core::models::geometry::TubeId;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Force field parameters could not be loaded: {0}")]
    Forcefield(#[from] ParamLoadError),

    #[error("Failed to write data file '{path}': {source}", path = path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: LammpsError,
    },

    #[error("Failed to read dump file '{path}': {source}", path = path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: DumpError,
    },

    #[error("Failed to read fix file '{path}': {source}", path = path.display())]
    Fix {
        path: PathBuf,
        #[source]
        source: FixError,
    },

    #[error("Failed to write results table: {0}")]
    Table(#[from] TableError),

    #[error("I/O error at '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}", from = from.display(), to = to.display())]
    AuxCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Separations {first} and {second} share the run directory name '{label}'; widen the separation window or use fewer steps"
    )]
    DuplicateRunLabel { label: String, first: f64, second: f64 },

    #[error("No dumped atoms belong to {tube}")]
    EmptyTube { tube: TubeId },
}
