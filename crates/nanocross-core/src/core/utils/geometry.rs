use crate::core::models::tube::Tube;
use nalgebra::{Point3, Rotation3, Vector3};

/// A Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Rotation taking the +z axis onto the spherical direction `(theta, phi)`.
///
/// Rotates by `theta` about y first, then by `phi` about z. Angles are in radians
/// and are used as given.
pub fn spherical_rotation(theta: f64, phi: f64) -> Rotation3<f64> {
    let about_y = Rotation3::from_axis_angle(&Vector3::y_axis(), theta);
    let about_z = Rotation3::from_axis_angle(&Vector3::z_axis(), phi);
    about_z * about_y
}

pub fn translate(tube: &mut Tube, offset: f64, axis: Axis) {
    let shift = axis.unit() * offset;
    for atom in tube.atoms.iter_mut() {
        *atom += shift;
    }
}

/// Reorients a tube whose axis lies along +z so that it points along `(theta, phi)`.
///
/// The rotation is about the origin; a centered tube stays centered.
pub fn rotate(tube: &mut Tube, theta: f64, phi: f64) {
    let rotation = spherical_rotation(theta, phi);
    for atom in tube.atoms.iter_mut() {
        *atom = rotation * *atom;
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Shifts a tube so that its centroid sits at the origin.
pub fn center(tube: &mut Tube) {
    if let Some(c) = centroid(&tube.atoms) {
        let shift = c.coords;
        for atom in tube.atoms.iter_mut() {
            *atom -= shift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::LatticeBuilder;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    fn test_tube() -> Tube {
        LatticeBuilder::new(1.417, 6, 20.0).build().unwrap()
    }

    fn max_pairwise_distance_error(a: &Tube, b: &Tube) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..a.atom_count() {
            for j in (i + 1)..a.atom_count() {
                let da = (a.atoms()[i] - a.atoms()[j]).norm();
                let db = (b.atoms()[i] - b.atoms()[j]).norm();
                worst = worst.max((da - db).abs());
            }
        }
        worst
    }

    #[test]
    fn rotation_matches_component_formulas() {
        let (theta, phi) = (0.7_f64, -1.3_f64);
        let p = Point3::new(0.3, -1.2, 2.5);

        let x1 = p.x * theta.cos() + p.z * theta.sin();
        let y1 = p.y;
        let z1 = -p.x * theta.sin() + p.z * theta.cos();
        let expected = Point3::new(
            x1 * phi.cos() - y1 * phi.sin(),
            x1 * phi.sin() + y1 * phi.cos(),
            z1,
        );

        let rotated = spherical_rotation(theta, phi) * p;
        assert!((rotated - expected).norm() < TOLERANCE);
    }

    #[test]
    fn rotation_maps_z_axis_to_spherical_direction() {
        let (theta, phi) = (FRAC_PI_2 / 3.0, PI / 5.0);
        let axis = spherical_rotation(theta, phi) * Vector3::z();
        let expected = Vector3::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        );
        assert!((axis - expected).norm() < TOLERANCE);
    }

    #[test]
    fn rotate_preserves_pairwise_distances() {
        let original = test_tube();
        let mut rotated = original.clone();
        rotate(&mut rotated, 1.1, 2.9);
        assert!(max_pairwise_distance_error(&original, &rotated) < 1e-9);
    }

    #[test]
    fn rotate_with_zero_angles_is_identity() {
        let original = test_tube();
        let mut rotated = original.clone();
        rotate(&mut rotated, 0.0, 0.0);
        for (a, b) in original.atoms().iter().zip(rotated.atoms()) {
            assert!((a - b).norm() < TOLERANCE);
        }
    }

    #[test]
    fn translate_round_trip_restores_coordinates() {
        let original = test_tube();
        let mut moved = original.clone();
        translate(&mut moved, 12.345, Axis::Y);
        translate(&mut moved, -12.345, Axis::Y);
        for (a, b) in original.atoms().iter().zip(moved.atoms()) {
            assert!((a - b).norm() < TOLERANCE);
        }
    }

    #[test]
    fn translate_only_touches_requested_axis() {
        let original = test_tube();
        let mut moved = original.clone();
        translate(&mut moved, 4.0, Axis::X);
        for (a, b) in original.atoms().iter().zip(moved.atoms()) {
            assert!((b.x - a.x - 4.0).abs() < TOLERANCE);
            assert_eq!(a.y, b.y);
            assert_eq!(a.z, b.z);
        }
    }

    #[test]
    fn center_moves_centroid_to_origin() {
        let mut tube = test_tube();
        translate(&mut tube, 3.0, Axis::Z);
        translate(&mut tube, -7.5, Axis::Y);
        center(&mut tube);
        let c = centroid(tube.atoms()).unwrap();
        assert!(c.coords.norm() < TOLERANCE);
    }

    #[test]
    fn centroid_of_empty_slice_is_none() {
        assert!(centroid(&[]).is_none());
    }
}
