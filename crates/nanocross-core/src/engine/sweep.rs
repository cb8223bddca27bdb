use crate::core::error::GeometryError;
use crate::core::lattice::LatticeBuilder;
use crate::core::models::geometry::CombinedGeometry;
use crate::core::models::tube::Tube;
use crate::core::utils::geometry::{self, Axis};
use crate::engine::config::{Orientation, SweepConfig};
use tracing::{debug, info};

/// Axis along which the second tube is stepped away from the first.
pub const SEPARATION_AXIS: Axis = Axis::Y;

/// Shift of the separation window for a tube whose axis points along `(theta, phi)`.
///
/// A tilted tube's footprint along the separation axis grows with
/// `sin(theta) * sin(phi)`; the window is moved by this amount to stay on the contact
/// region.
pub fn orientation_offset(theta: f64, phi: f64) -> f64 {
    25.0 * theta.sin() * phi.sin() / 2.0
}

/// Run directory name for a separation: three decimals.
pub fn run_label(separation: f64) -> String {
    format!("{:.3}", separation)
}

/// One geometry of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepStep {
    /// 1-based position in the sweep.
    pub index: usize,
    /// Distance between the tube centers along [`SEPARATION_AXIS`].
    pub separation: f64,
    pub geometry: CombinedGeometry,
}

impl SweepStep {
    pub fn label(&self) -> String {
        run_label(self.separation)
    }
}

/// Separation schedule derived from a [`SweepConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationRange {
    pub low: f64,
    pub high: f64,
    pub increment: f64,
    pub num_steps: usize,
}

impl SeparationRange {
    pub fn from_config(config: &SweepConfig) -> Result<Self, GeometryError> {
        let Orientation { theta, phi } = config.orientation;
        if !theta.is_finite() {
            return Err(GeometryError::NonFinite { quantity: "theta" });
        }
        if !phi.is_finite() {
            return Err(GeometryError::NonFinite { quantity: "phi" });
        }
        if config.num_steps == 0 {
            return Err(GeometryError::invalid("num_steps", "must be at least 1"));
        }
        if !config.separation_start.is_finite() || !config.separation_end.is_finite() {
            return Err(GeometryError::NonFinite {
                quantity: "separation window",
            });
        }
        if config.separation_end <= config.separation_start {
            return Err(GeometryError::invalid(
                "separation_end",
                format!(
                    "must exceed separation_start ({} <= {})",
                    config.separation_end, config.separation_start
                ),
            ));
        }

        let offset = orientation_offset(theta, phi);
        if !offset.is_finite() {
            return Err(GeometryError::NonFinite {
                quantity: "orientation offset",
            });
        }

        let low = config.separation_start + offset;
        let high = config.separation_end + offset;
        Ok(Self {
            low,
            high,
            increment: (high - low) / config.num_steps as f64,
            num_steps: config.num_steps,
        })
    }

    /// Separation after `step` increments.
    pub fn at(&self, step: usize) -> f64 {
        self.low + step as f64 * self.increment
    }

    /// Separations of the yielded steps, first to last.
    pub fn separations(&self) -> impl Iterator<Item = f64> + '_ {
        (1..=self.num_steps).map(|step| self.at(step))
    }
}

/// Lazily produces the two-tube geometries of a separation sweep.
///
/// The first tube stays centered at the origin with its axis along +z. The second is
/// rotated to the configured orientation, moved to the low end of the separation
/// window, and advanced by one increment before each step is yielded. Every step
/// carries its own copy of the combined geometry.
#[derive(Debug, Clone)]
pub struct Sweep {
    first: Tube,
    second: Tube,
    range: SeparationRange,
    step: usize,
}

impl Sweep {
    /// Validates the configuration and builds both tubes.
    ///
    /// # Errors
    ///
    /// Fails before any tube is built if the step count is zero, the separation window
    /// is empty, or an angle is not finite; fails with the lattice error if the tube
    /// parameters are invalid.
    pub fn new(config: &SweepConfig) -> Result<Self, GeometryError> {
        let range = SeparationRange::from_config(config)?;

        let tubes = config.tubes;
        let builder = LatticeBuilder::new(tubes.bond_length, tubes.ring_atom_count, tubes.length);
        builder.validate()?;

        let (first, second) = rayon::join(|| builder.build(), || builder.build());
        let first = first?;
        let mut second = second?;

        let Orientation { theta, phi } = config.orientation;
        geometry::rotate(&mut second, theta, phi);
        geometry::translate(&mut second, range.low, SEPARATION_AXIS);

        info!(
            atoms_per_tube = first.atom_count(),
            bonds_per_tube = first.bond_count(),
            r_low = range.low,
            r_high = range.high,
            steps = range.num_steps,
            "Prepared separation sweep"
        );

        Ok(Self {
            first,
            second,
            range,
            step: 0,
        })
    }

    pub fn range(&self) -> &SeparationRange {
        &self.range
    }

    pub fn first_tube(&self) -> &Tube {
        &self.first
    }

    /// The second tube at its current position.
    pub fn second_tube(&self) -> &Tube {
        &self.second
    }
}

impl Iterator for Sweep {
    type Item = SweepStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.range.num_steps {
            return None;
        }
        self.step += 1;
        geometry::translate(&mut self.second, self.range.increment, SEPARATION_AXIS);

        let separation = self.range.at(self.step);
        debug!(step = self.step, separation, "Yielding sweep step");
        Some(SweepStep {
            index: self.step,
            separation,
            geometry: CombinedGeometry::combine(&self.first, &self.second),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.num_steps - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep {}
