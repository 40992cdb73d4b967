//! Atoms and bonds: the two building blocks of ball-and-stick structures
//!
//! A bond is an open cylinder generated along +Y, centered on the origin, then
//! rotated onto the bond direction and moved to the midpoint of its endpoints.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::gfx::geometry::{generate_open_cylinder, generate_uv_sphere};
use crate::gfx::material::Material;
use crate::gfx::scene::{SceneNode, Transform};

/// Below this cross-product length the bond is treated as parallel to +Y
const PARALLEL_TOLERANCE: f64 = 1e-3;

/// Rotation taking +Y onto `direction`, which must be unit length
pub fn align_y_to(direction: Vector3<f64>) -> Transform {
    let up = Vector3::unit_y();
    let axis = up.cross(direction);
    let cos_angle = up.dot(direction).clamp(-1.0, 1.0);

    if axis.magnitude() < PARALLEL_TOLERANCE {
        if cos_angle >= 0.0 {
            Transform::identity()
        } else {
            Transform::rotation_x(180.0)
        }
    } else {
        Transform::axis_angle(axis, cos_angle.acos())
    }
}

/// Placement of a centered +Y cylinder so that it spans `start` to `end`
///
/// Zero-length bonds keep the identity rotation.
pub fn bond_transform(start: Point3<f64>, end: Point3<f64>) -> Transform {
    let delta = end - start;
    let length = delta.magnitude();
    let midpoint = start.midpoint(end).to_vec();

    let rotation = if length > 0.0 {
        align_y_to(delta / length)
    } else {
        Transform::identity()
    };
    rotation.then(Transform::translation(midpoint))
}

/// Cylinder leaf connecting two points
///
/// # Arguments
/// * `start`, `end` - Endpoints of the bond
/// * `radius` - Cylinder radius
/// * `segments` - Segments around the cylinder
/// * `material` - Surface material
pub fn bond(
    start: Point3<f64>,
    end: Point3<f64>,
    radius: f64,
    segments: u32,
    material: Material,
) -> SceneNode {
    let length = (end - start).magnitude();
    let mesh = generate_open_cylinder(radius, length, segments);
    SceneNode::leaf("Bond", mesh, material).with_transform(bond_transform(start, end))
}

/// Sphere leaf centered on `center`
pub fn atom(
    center: Point3<f64>,
    radius: f64,
    segments: u32,
    rings: u32,
    material: Material,
) -> SceneNode {
    let mesh = generate_uv_sphere(radius, segments, rings);
    SceneNode::leaf("Atom", mesh, material).with_transform(Transform::translation(center.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_spans(start: Point3<f64>, end: Point3<f64>) {
        let length = (end - start).magnitude();
        let t = bond_transform(start, end);

        let top = t.transform_point(Point3::new(0.0, length / 2.0, 0.0));
        let bottom = t.transform_point(Point3::new(0.0, -length / 2.0, 0.0));
        assert_relative_eq!((top - end).magnitude(), 0.0, epsilon = 1e-9);
        assert_relative_eq!((bottom - start).magnitude(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bond_spans_axis_aligned_endpoints() {
        let origin = Point3::new(0.0, 0.0, 0.0);
        assert_spans(origin, Point3::new(1.0, 0.0, 0.0));
        assert_spans(origin, Point3::new(0.0, 2.0, 0.0));
        assert_spans(origin, Point3::new(0.0, -2.0, 0.0));
        assert_spans(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, -3.0));
    }

    #[test]
    fn test_bond_spans_random_endpoints() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut point = || {
                Point3::new(
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0),
                )
            };
            let (start, end) = (point(), point());
            if (end - start).magnitude() < 0.1 {
                continue;
            }
            assert_spans(start, end);
        }
    }

    #[test]
    fn test_antiparallel_bond_flips_about_x() {
        let t = align_y_to(Vector3::new(0.0, -1.0, 0.0));
        let up = t.transform_vector(Vector3::unit_y());
        assert_relative_eq!(up.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_bond_sits_at_the_point() {
        let p = Point3::new(2.0, 3.0, 4.0);
        let node = bond(p, p, 0.05, 8, Material::default());
        let t = node.local_transform();
        assert_relative_eq!(t.translation_part().x, 2.0);
        assert_relative_eq!(t.transform_vector(Vector3::unit_y()).y, 1.0);
        assert_eq!(node.mesh().map(|m| m.triangle_count()), Some(16));
    }

    #[test]
    fn test_atom_is_translated_sphere() {
        let node = atom(Point3::new(1.0, 0.0, 0.0), 0.4, 20, 20, Material::default());
        let positions = node.world_positions();
        assert_relative_eq!(positions[0].1.x, 1.0);
        assert_eq!(node.mesh().map(|m| m.vertex_count()), Some(21 * 21));
    }
}
