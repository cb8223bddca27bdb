//! Provides input/output functionality for simulation files.
//!
//! Writers serialize a combined two-tube geometry for the MD engine; readers pull the
//! per-run measurements back out of the engine's dump and fix outputs. The results of
//! a whole sweep are collected into a tab-separated table.

pub mod dump;
pub mod fix;
pub mod lammps;
pub mod table;
pub mod traits;
