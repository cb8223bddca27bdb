use nalgebra::Point3;
use std::fmt;

/// A covalent bond between two atoms of the same tube.
///
/// Both indices are 1-based positions in the owning atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }

    /// Returns the bond with its endpoints shifted by `offset`.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            atom1: self.atom1 + offset,
            atom2: self.atom2 + offset,
        }
    }

    /// Endpoints ordered so that equal bonds compare equal regardless of direction.
    pub fn key(&self) -> (usize, usize) {
        (self.atom1.min(self.atom2), self.atom1.max(self.atom2))
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.atom1, self.atom2)
    }
}

/// An armchair carbon nanotube: atom positions plus bond topology.
///
/// Tubes are only grown by [`crate::core::lattice::LatticeBuilder`]; afterwards the
/// atom list has a fixed length and only whole-tube rigid transforms move it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    bond_length: f64,
    ring_atom_count: usize,
    length: f64,
    pub(crate) atoms: Vec<Point3<f64>>,
    pub(crate) bonds: Vec<Bond>,
}

impl Tube {
    pub(crate) fn empty(bond_length: f64, ring_atom_count: usize, length: f64) -> Self {
        Self {
            bond_length,
            ring_atom_count,
            length,
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Appends an atom and returns its 1-based index.
    pub(crate) fn push_atom(&mut self, position: Point3<f64>) -> usize {
        self.atoms.push(position);
        self.atoms.len()
    }

    pub(crate) fn push_bond(&mut self, atom1: usize, atom2: usize) {
        debug_assert!(atom1 >= 1 && atom1 <= self.atoms.len());
        debug_assert!(atom2 >= 1 && atom2 <= self.atoms.len());
        debug_assert_ne!(atom1, atom2);
        self.bonds.push(Bond::new(atom1, atom2));
    }

    pub fn bond_length(&self) -> f64 {
        self.bond_length
    }

    pub fn ring_atom_count(&self) -> usize {
        self.ring_atom_count
    }

    /// The requested axial extent; the built tube never exceeds it.
    pub fn target_length(&self) -> f64 {
        self.length
    }

    pub fn atoms(&self) -> &[Point3<f64>] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Looks up an atom by its 1-based index.
    pub fn atom(&self, index: usize) -> Option<&Point3<f64>> {
        index.checked_sub(1).and_then(|i| self.atoms.get(i))
    }

    /// Number of bonds each atom takes part in, indexed 0-based.
    pub fn coordination_numbers(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.atoms.len()];
        for bond in &self.bonds {
            degrees[bond.atom1 - 1] += 1;
            degrees[bond.atom2 - 1] += 1;
        }
        degrees
    }
}
