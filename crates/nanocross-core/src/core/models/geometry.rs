use super::tube::{Bond, Tube};
use nalgebra::Point3;
use std::fmt;

/// Identifies which of the two tubes an atom belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TubeId {
    /// The stationary tube, axis along +z.
    First,
    /// The rotated tube that is stepped through the separations.
    Second,
}

impl TubeId {
    /// The molecule tag written to the data file and read back from dumps.
    pub fn tag(self) -> u32 {
        match self {
            TubeId::First => 1,
            TubeId::Second => 2,
        }
    }

    /// Maps a dumped tag back onto a tube. Tag 1 is the first tube; every other tag
    /// belongs to the second.
    pub fn from_tag(tag: u32) -> Self {
        if tag == 1 {
            TubeId::First
        } else {
            TubeId::Second
        }
    }
}

impl fmt::Display for TubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TubeId::First => write!(f, "tube 1"),
            TubeId::Second => write!(f, "tube 2"),
        }
    }
}

/// Two tubes merged into a single atom and bond list.
///
/// The first tube's atoms come first; the second tube's bonds are renumbered by the
/// first tube's atom count so that all indices refer to the merged list. The two
/// tubes are never bonded to each other.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedGeometry {
    atoms: Vec<Point3<f64>>,
    bonds: Vec<Bond>,
    offset: usize,
}

impl CombinedGeometry {
    pub fn combine(first: &Tube, second: &Tube) -> Self {
        let offset = first.atom_count();

        let mut atoms = Vec::with_capacity(offset + second.atom_count());
        atoms.extend_from_slice(first.atoms());
        atoms.extend_from_slice(second.atoms());

        let mut bonds = Vec::with_capacity(first.bond_count() + second.bond_count());
        bonds.extend_from_slice(first.bonds());
        bonds.extend(second.bonds().iter().map(|b| b.shifted(offset)));

        Self {
            atoms,
            bonds,
            offset,
        }
    }

    pub fn atoms(&self) -> &[Point3<f64>] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of atoms contributed by the first tube; second-tube indices start after it.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Resolves a 1-based atom index to its tube.
    pub fn tube_of(&self, index: usize) -> Option<TubeId> {
        match index {
            0 => None,
            i if i <= self.offset => Some(TubeId::First),
            i if i <= self.atoms.len() => Some(TubeId::Second),
            _ => None,
        }
    }

    /// Iterates atoms with their 1-based index and owning tube.
    pub fn labeled_atoms(&self) -> impl Iterator<Item = (usize, TubeId, &Point3<f64>)> + '_ {
        self.atoms.iter().enumerate().map(move |(i, pos)| {
            let tube = if i < self.offset {
                TubeId::First
            } else {
                TubeId::Second
            };
            (i + 1, tube, pos)
        })
    }

    /// Axis-aligned bounds of all atoms, or `None` for an empty geometry.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.atoms.first()?;
        let (min, max) = self
            .atoms
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some((min, max))
    }
}
