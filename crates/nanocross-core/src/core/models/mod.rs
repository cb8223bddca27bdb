//! Data structures describing nanotube structures.
//!
//! A [`tube::Tube`] owns a flat arena of atom positions and a list of bonds that
//! reference atoms by their 1-based emission index, the numbering used directly in
//! LAMMPS data files. Two tubes are merged into a [`geometry::CombinedGeometry`]
//! for export, with the second tube's indices shifted past the first.

pub mod geometry;
pub mod tube;
