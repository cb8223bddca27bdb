//! Armchair (n,n) nanotube lattice construction.
//!
//! The tube is grown ring by ring along +z from a base ring at `z = 0`. After the base
//! ring, rings are emitted in a repeating four-step cycle of [`Sublayer`]s. Each ring
//! has `m` atoms and is bonded only to the ring directly below it, so every bond
//! recipe is expressed relative to the 1-based index of the atom just appended.

use crate::core::error::GeometryError;
use crate::core::models::tube::Tube;
use crate::core::utils::geometry;
use nalgebra::Point3;
use std::f64::consts::PI;
use tracing::debug;

/// One ring-construction step of the repeating armchair cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sublayer {
    /// Half-angle-offset ring, zigzag-bonded to the ring below.
    A,
    /// Half-angle-offset ring, bonded straight down to `A`.
    B,
    /// On-angle ring, zigzag-bonded to `B`.
    C,
    /// On-angle ring, bonded straight down to `C`.
    D,
}

impl Sublayer {
    pub fn next(self) -> Self {
        match self {
            Sublayer::A => Sublayer::B,
            Sublayer::B => Sublayer::C,
            Sublayer::C => Sublayer::D,
            Sublayer::D => Sublayer::A,
        }
    }

    /// Axial distance from the previous ring, in units of the bond length.
    pub fn advance_factor(self) -> f64 {
        match self {
            Sublayer::A | Sublayer::C => 0.5,
            Sublayer::B | Sublayer::D => 1.0,
        }
    }

    fn is_half_offset(self) -> bool {
        matches!(self, Sublayer::A | Sublayer::B)
    }
}

/// Builds a single armchair nanotube from its bond length, ring size and target length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeBuilder {
    bond_length: f64,
    ring_atom_count: usize,
    length: f64,
}

impl LatticeBuilder {
    /// `ring_atom_count` is `n + 1` for an (n,n) tube.
    pub fn new(bond_length: f64, ring_atom_count: usize, length: f64) -> Self {
        Self {
            bond_length,
            ring_atom_count,
            length,
        }
    }

    /// Angular spacing between neighbouring atoms of one ring.
    pub fn angular_step(&self) -> f64 {
        2.0 * PI / self.ring_atom_count as f64
    }

    /// Radius at which zigzag bonds between adjacent rings have the bond length.
    pub fn radius(&self) -> f64 {
        let dt = self.angular_step();
        self.bond_length * (3.0 / (2.0 * (1.0 - dt.cos()))).sqrt()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.ring_atom_count < 2 {
            return Err(GeometryError::invalid(
                "ring_atom_count",
                format!("must be at least 2, got {}", self.ring_atom_count),
            ));
        }
        if !self.bond_length.is_finite() || self.bond_length <= 0.0 {
            return Err(GeometryError::invalid(
                "bond_length",
                format!("must be a positive finite number, got {}", self.bond_length),
            ));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(GeometryError::invalid(
                "length",
                format!("must be a positive finite number, got {}", self.length),
            ));
        }
        Ok(())
    }

    /// Builds the tube and centers it on its centroid.
    ///
    /// Rings are added until the next one would lie beyond the target length; that
    /// ring is dropped entirely, so the built tube is never longer than requested.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParameter`] if the ring has fewer than two atoms
    /// or the bond length or target length is not positive. No atoms are built in that
    /// case.
    pub fn build(&self) -> Result<Tube, GeometryError> {
        self.validate()?;

        let m = self.ring_atom_count;
        let s = self.bond_length;
        let dt = self.angular_step();
        let radius = self.radius();

        let mut tube = Tube::empty(s, m, self.length);
        let ring_point = |angle: f64, z: f64| {
            Point3::new(radius * angle.cos(), radius * angle.sin(), z)
        };

        for i in 0..m {
            tube.push_atom(ring_point(i as f64 * dt, 0.0));
        }

        let mut z = 0.0;
        let mut sublayer = Sublayer::A;
        let mut rings = 1usize;
        loop {
            let next_z = z + sublayer.advance_factor() * s;
            if next_z > self.length {
                break;
            }
            z = next_z;
            self.emit_ring(&mut tube, sublayer, z, &ring_point);
            rings += 1;
            sublayer = sublayer.next();
        }

        debug!(
            rings,
            atoms = tube.atom_count(),
            bonds = tube.bond_count(),
            built_length = z,
            "Built armchair lattice"
        );

        geometry::center(&mut tube);
        Ok(tube)
    }

    fn emit_ring<F>(&self, tube: &mut Tube, sublayer: Sublayer, z: f64, ring_point: &F)
    where
        F: Fn(f64, f64) -> Point3<f64>,
    {
        let m = self.ring_atom_count;
        let dt = self.angular_step();
        let phase = if sublayer.is_half_offset() { dt / 2.0 } else { 0.0 };

        match sublayer {
            Sublayer::A => {
                for i in 0..m - 1 {
                    let k = tube.push_atom(ring_point(i as f64 * dt + phase, z));
                    tube.push_bond(k - m, k);
                    tube.push_bond(k - m + 1, k);
                }
                // Closes the ring between the last and first atoms of the ring below.
                let k = tube.push_atom(ring_point(-dt / 2.0, z));
                tube.push_bond(k + 1 - 2 * m, k);
                tube.push_bond(k - m, k);
            }
            Sublayer::C => {
                let k = tube.push_atom(ring_point(0.0, z));
                tube.push_bond(k - 1, k);
                tube.push_bond(k - m, k);
                for i in 1..m {
                    let k = tube.push_atom(ring_point(i as f64 * dt, z));
                    tube.push_bond(k - m - 1, k);
                    tube.push_bond(k - m, k);
                }
            }
            Sublayer::B | Sublayer::D => {
                for i in 0..m {
                    let k = tube.push_atom(ring_point(i as f64 * dt + phase, z));
                    tube.push_bond(k - m, k);
                }
            }
        }
    }
}
