//! # Core Module
//!
//! Fundamental building blocks for crossed-nanotube model preparation.
//!
//! ## Architecture
//!
//! - **Structural Representation** ([`models`]) - Tubes, bonds and the combined two-tube geometry
//! - **Lattice Construction** ([`lattice`]) - Ring-by-ring assembly of an armchair (n,n) tube
//! - **Rigid Transforms** ([`utils`]) - Centering, rotation and translation of whole tubes
//! - **Force Field** ([`forcefield`]) - Carbon pair and bond coefficients handed to the MD engine
//! - **File I/O** ([`io`]) - LAMMPS data export, dump and fix ingestion, results tables
//!
//! ## Scientific Foundation
//!
//! - **Idealized graphene lattice** rolled into a cylinder with a single C–C bond length
//! - **Quartic bond potential** around the equilibrium bond length
//! - **Rigid-body mechanics** for net force and torque about a tube centroid

pub mod error;
pub mod forcefield;
pub mod io;
pub mod lattice;
pub mod models;
pub mod utils;
