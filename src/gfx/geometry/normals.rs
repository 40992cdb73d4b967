//! # Normal Estimation
//!
//! Per-vertex normals are produced one of two ways:
//!
//! - **Analytic**: the generator knows the surface it sampled, so the normal is
//!   evaluated in closed form at each position.
//! - **Accumulated**: every triangle adds its unnormalized face normal to its
//!   three corners, which weights the contribution by triangle area. The sums
//!   are normalized at the end.
//!
//! Neither path fails. Degenerate input yields zero-length normals instead of NaN.

use cgmath::{InnerSpace, Point3, Vector3, Zero};

/// Closed-form surfaces the analytic strategy can evaluate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalyticSurface {
    /// Sphere around `center`
    Sphere { center: Point3<f64> },
    /// Axis-aligned ellipsoid centered at the origin
    Ellipsoid { radii: Vector3<f64> },
    /// Torus around the Y axis, centered at the origin
    Torus { major_radius: f64 },
    /// Side wall of a cylinder around the Y axis
    CylinderSide,
    /// Constant normal
    Flat(Vector3<f64>),
}

/// How [`super::Mesh::compute_normals`] fills the normal buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalStrategy {
    Analytic(AnalyticSurface),
    Accumulated,
}

/// Normalize, or return zero when the vector has no usable length
fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let length = v.magnitude();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        Vector3::zero()
    }
}

/// Evaluate the outward normal of `surface` at `point`
pub fn analytic_normal(surface: &AnalyticSurface, point: Point3<f64>) -> Vector3<f64> {
    match *surface {
        AnalyticSurface::Sphere { center } => normalize_or_zero(point - center),
        AnalyticSurface::Ellipsoid { radii } => normalize_or_zero(Vector3::new(
            point.x / (radii.x * radii.x),
            point.y / (radii.y * radii.y),
            point.z / (radii.z * radii.z),
        )),
        AnalyticSurface::Torus { major_radius } => {
            let radial = normalize_or_zero(Vector3::new(point.x, 0.0, point.z));
            let ring_point = Point3::new(0.0, 0.0, 0.0) + radial * major_radius;
            normalize_or_zero(point - ring_point)
        }
        AnalyticSurface::CylinderSide => normalize_or_zero(Vector3::new(point.x, 0.0, point.z)),
        AnalyticSurface::Flat(normal) => normalize_or_zero(normal),
    }
}

/// Area-weighted vertex normals from triangle faces
///
/// Triangles with an out-of-range corner are skipped.
pub fn accumulate_face_normals(positions: &[Point3<f64>], indices: &[u32]) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zero(); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let face_normal = edge1.cross(edge2);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    normals.into_iter().map(normalize_or_zero).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_triangle_normal() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normals = accumulate_face_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert_relative_eq!(n.z, 1.0);
            assert_relative_eq!(n.x, 0.0);
            assert_relative_eq!(n.y, 0.0);
        }
    }

    #[test]
    fn test_unreferenced_vertex_stays_zero() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let normals = accumulate_face_normals(&positions, &[0, 1, 2]);
        assert_relative_eq!(normals[0].y, 1.0);
        assert_eq!(normals[3], Vector3::zero());
    }

    #[test]
    fn test_degenerate_triangle_gives_zero() {
        let positions = vec![Point3::new(1.0, 1.0, 1.0); 3];
        let normals = accumulate_face_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|n| *n == Vector3::zero()));
    }

    #[test]
    fn test_analytic_surfaces() {
        let n = analytic_normal(
            &AnalyticSurface::Sphere {
                center: Point3::new(1.0, 0.0, 0.0),
            },
            Point3::new(1.0, 2.0, 0.0),
        );
        assert_relative_eq!(n.y, 1.0);

        let n = analytic_normal(
            &AnalyticSurface::Ellipsoid {
                radii: Vector3::new(2.0, 1.0, 1.0),
            },
            Point3::new(2.0, 0.0, 0.0),
        );
        assert_relative_eq!(n.x, 1.0);

        let n = analytic_normal(
            &AnalyticSurface::Torus { major_radius: 1.0 },
            Point3::new(0.0, 0.25, 1.0),
        );
        assert_relative_eq!(n.y, 1.0);

        let n = analytic_normal(&AnalyticSurface::CylinderSide, Point3::new(0.0, 3.0, -2.0));
        assert_relative_eq!(n.z, -1.0);
        assert_relative_eq!(n.y, 0.0);
    }

    #[test]
    fn test_zero_radius_ellipsoid_does_not_produce_nan() {
        let n = analytic_normal(
            &AnalyticSurface::Ellipsoid {
                radii: Vector3::new(0.0, 1.0, 1.0),
            },
            Point3::new(0.0, 0.0, 0.0),
        );
        assert!(!n.x.is_nan() && !n.y.is_nan() && !n.z.is_nan());
    }
}
