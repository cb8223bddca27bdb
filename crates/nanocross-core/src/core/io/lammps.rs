use crate::core::forcefield::params::ForcefieldParams;
use crate::core::io::traits::GeometryFile;
use crate::core::models::geometry::CombinedGeometry;
use nalgebra::Point3;
use std::io::{self, Write};
use thiserror::Error;

/// How the simulation box written to the data file is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxSpec {
    /// The same `[lo, hi]` interval on every axis.
    Fixed { lo: f64, hi: f64 },
    /// The geometry's bounding box grown by `margin` on every side.
    Padded { margin: f64 },
}

impl Default for BoxSpec {
    fn default() -> Self {
        BoxSpec::Fixed {
            lo: -100.0,
            hi: 100.0,
        }
    }
}

impl BoxSpec {
    /// Resolves the box bounds for a geometry.
    pub fn bounds(&self, geometry: &CombinedGeometry) -> Result<(Point3<f64>, Point3<f64>), LammpsError> {
        match *self {
            BoxSpec::Fixed { lo, hi } => {
                if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
                    return Err(LammpsError::InvalidBox(format!(
                        "fixed bounds must satisfy lo < hi, got [{}, {}]",
                        lo, hi
                    )));
                }
                Ok((Point3::new(lo, lo, lo), Point3::new(hi, hi, hi)))
            }
            BoxSpec::Padded { margin } => {
                if !margin.is_finite() || margin <= 0.0 {
                    return Err(LammpsError::InvalidBox(format!(
                        "margin must be positive, got {}",
                        margin
                    )));
                }
                let (min, max) = geometry
                    .bounding_box()
                    .ok_or_else(|| LammpsError::InvalidBox("geometry has no atoms".into()))?;
                let pad = nalgebra::Vector3::repeat(margin);
                Ok((min - pad, max + pad))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LammpsOptions {
    pub forcefield: ForcefieldParams,
    pub box_spec: BoxSpec,
}

#[derive(Debug, Error)]
pub enum LammpsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid simulation box: {0}")]
    InvalidBox(String),
    #[error("Atom {index} lies outside the simulation box")]
    AtomOutsideBox { index: usize },
}

/// LAMMPS data file in the `full` atom style.
///
/// The molecule-id column carries the tube tag (1 or 2) so that downstream analysis
/// can tell the tubes apart. All atoms share atom type 1 and all bonds bond type 1.
pub struct LammpsDataFile;

impl GeometryFile for LammpsDataFile {
    type Options = LammpsOptions;
    type Error = LammpsError;

    fn write_to(
        geometry: &CombinedGeometry,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let (lo, hi) = options.box_spec.bounds(geometry)?;
        if let Some((index, _, _)) = geometry.labeled_atoms().find(|(_, _, p)| {
            p.x < lo.x || p.y < lo.y || p.z < lo.z || p.x > hi.x || p.y > hi.y || p.z > hi.z
        }) {
            return Err(LammpsError::AtomOutsideBox { index });
        }

        let ff = &options.forcefield;

        writeln!(writer, "LAMMPS Description")?;
        writeln!(writer)?;
        writeln!(writer, "\t{} atoms", geometry.atoms().len())?;
        writeln!(writer, "\t{} bonds", geometry.bonds().len())?;
        writeln!(writer, "\t1 atom types")?;
        writeln!(writer, "\t1 bond types")?;
        writeln!(writer, "\t{} {} xlo xhi", lo.x, hi.x)?;
        writeln!(writer, "\t{} {} ylo yhi", lo.y, hi.y)?;
        writeln!(writer, "\t{} {} zlo zhi", lo.z, hi.z)?;
        writeln!(writer)?;
        writeln!(writer, "Masses")?;
        writeln!(writer)?;
        writeln!(writer, "1 {}", ff.mass)?;
        writeln!(writer)?;
        writeln!(writer, "Atoms")?;
        writeln!(writer)?;

        for (index, tube, pos) in geometry.labeled_atoms() {
            writeln!(
                writer,
                "{} {} 1 0 {} {} {}",
                index,
                tube.tag(),
                pos.x,
                pos.y,
                pos.z
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Bonds")?;
        writeln!(writer)?;
        for (i, bond) in geometry.bonds().iter().enumerate() {
            writeln!(writer, "{} 1 {} {}", i + 1, bond.atom1, bond.atom2)?;
        }

        writeln!(writer)?;
        writeln!(writer, "Pair Coeffs")?;
        writeln!(writer)?;
        writeln!(writer, "1 {} {}", ff.pair.epsilon, ff.pair.sigma)?;
        writeln!(writer)?;
        writeln!(writer, "Bond Coeffs")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "1 {} {} {} {}",
            ff.bond.r0, ff.bond.k2, ff.bond.k3, ff.bond.k4
        )?;
        Ok(())
    }
}
