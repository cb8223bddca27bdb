//! # nanocross Core Library
//!
//! Builds atomistic models of two crossed armchair carbon nanotubes, sweeps
//! their separation for molecular-dynamics runs, and reduces the per-run
//! simulation output into a force/torque table.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Tube`, `CombinedGeometry`),
//!   the armchair lattice construction, rigid-body transforms, force-field constants,
//!   and file I/O for LAMMPS data, dump and fix files.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration, the separation sweep
//!   iterator, per-tube force and torque reduction, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `engine` and
//!   `core` together: generating one simulation directory per separation, and
//!   collecting the finished runs into a results table.

pub mod core;
pub mod engine;
pub mod workflows;
