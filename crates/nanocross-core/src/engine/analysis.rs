use crate::core::io::dump::{DumpAtom, DumpFrame};
use crate::core::io::table::TableRow;
use crate::core::models::geometry::TubeId;
use crate::core::utils::geometry;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Vector3};

/// Net mechanical load on one tube in a dumped frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeLoad {
    pub centroid: Point3<f64>,
    pub net_force: Vector3<f64>,
    /// Torque about the tube's own centroid.
    pub net_torque: Vector3<f64>,
}

/// Sums force and torque over a tube's atoms. Returns `None` for an empty slice.
pub fn tube_load<'a>(atoms: impl IntoIterator<Item = &'a DumpAtom>) -> Option<TubeLoad> {
    let atoms: Vec<&DumpAtom> = atoms.into_iter().collect();
    let positions: Vec<Point3<f64>> = atoms.iter().map(|a| a.position).collect();
    let centroid = geometry::centroid(&positions)?;

    let (net_force, net_torque) = atoms.iter().fold(
        (Vector3::<f64>::zeros(), Vector3::<f64>::zeros()),
        |(force, torque), a| (force + a.force, torque + (a.position - centroid).cross(&a.force)),
    );

    Some(TubeLoad {
        centroid,
        net_force,
        net_torque,
    })
}

/// Loads on both tubes, first tube first.
///
/// # Errors
///
/// Returns [`EngineError::EmptyTube`] if either tube has no atoms in the frame.
pub fn frame_loads(frame: &DumpFrame) -> Result<[TubeLoad; 2], EngineError> {
    let load = |tube: TubeId| tube_load(frame.atoms_of(tube)).ok_or(EngineError::EmptyTube { tube });
    Ok([load(TubeId::First)?, load(TubeId::Second)?])
}

/// Assembles a results row from a run's separation, interaction reading and frame.
pub fn table_row(separation: f64, interaction: f64, frame: &DumpFrame) -> Result<TableRow, EngineError> {
    let [first, second] = frame_loads(frame)?;
    Ok(TableRow {
        separation,
        interaction,
        force1: first.net_force,
        force2: second.net_force,
        torque1: first.net_torque,
        torque2: second.net_torque,
    })
}
