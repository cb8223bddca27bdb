//! # Workflows Module
//!
//! Top-level entry points that turn a configuration into files on disk.
//!
//! - **Generate** ([`generate`]) drives the separation sweep and writes one run
//!   directory per step, each holding the LAMMPS data file and any auxiliary run
//!   files.
//! - **Analyze** ([`analyze`]) reads the fix and dump outputs left in those run
//!   directories by the MD engine and writes the sorted force/torque table.
//!
//! Both report progress through [`ProgressReporter`](crate::engine::progress::ProgressReporter)
//! and stop at the first error.

pub mod analyze;
pub mod generate;
