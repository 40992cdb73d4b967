//! # Parametric Surface Generation
//!
//! Functions that sample a closed-form surface over a regular parameter grid
//! and stitch the samples into triangles.
//!
//! Grids are laid out row-major with one duplicated seam column, so a grid of
//! `rows × columns` cells has `(rows + 1) × (columns + 1)` vertices. Every
//! generator winds its triangles counter-clockwise seen from outside.
//!
//! Parameters are not validated. Zero segment counts produce collapsed or empty
//! geometry rather than a panic.

use super::normals::{AnalyticSurface, NormalStrategy};
use super::Mesh;
use cgmath::{Point3, Vector3};
use log::debug;
use std::f64::consts::PI;

/// Radius of each marker sphere in [`generate_spiral_lattice`]
pub const LATTICE_MARKER_RADIUS: f64 = 0.04;
/// Segment count of each marker sphere in [`generate_spiral_lattice`]
pub const LATTICE_MARKER_SEGMENTS: u32 = 8;

/// Stitch a row-major vertex grid into outward-facing triangles.
///
/// `base` is the index of the grid's first vertex; `rows` and `columns` count
/// cells, so each row holds `columns + 1` vertices.
fn stitch_grid(mesh: &mut Mesh, base: u32, rows: u32, columns: u32) {
    for row in 0..rows {
        for column in 0..columns {
            let first = base + row * (columns + 1) + column;
            let second = first + columns + 1;

            mesh.push_triangle(first, first + 1, second);
            mesh.push_triangle(second, first + 1, second + 1);
        }
    }
}

/// Generate a UV sphere with `segments / 2` rings
///
/// # Arguments
/// * `radius` - Radius of the sphere
/// * `segments` - Number of longitude segments
///
/// Returns a sphere centered at the origin with analytic normals.
pub fn generate_sphere(radius: f64, segments: u32) -> Mesh {
    generate_uv_sphere(radius, segments, segments / 2)
}

/// Generate a UV sphere with explicit ring count
///
/// # Arguments
/// * `radius` - Radius of the sphere
/// * `segments` - Number of longitude segments
/// * `rings` - Number of latitude rings, pole to pole
///
/// Vertex `lat * (segments + 1) + lon` sits at polar angle `θ = lat·π/rings`
/// and azimuth `φ = lon·2π/segments`.
pub fn generate_uv_sphere(radius: f64, segments: u32, rings: u32) -> Mesh {
    let mesh = generate_ellipsoid_grid(Vector3::new(radius, radius, radius), segments, rings);
    debug!(
        "Generated sphere r={} ({} vertices, {} triangles)",
        radius,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Generate an axis-aligned ellipsoid
///
/// # Arguments
/// * `rx`, `ry`, `rz` - Semi-axis lengths along X, Y and Z
/// * `segments` - Number of longitude segments (rings = `segments / 2`)
pub fn generate_ellipsoid(rx: f64, ry: f64, rz: f64, segments: u32) -> Mesh {
    generate_ellipsoid_grid(Vector3::new(rx, ry, rz), segments, segments / 2)
}

fn generate_ellipsoid_grid(radii: Vector3<f64>, segments: u32, rings: u32) -> Mesh {
    let vertex_count = ((rings + 1) * (segments + 1)) as usize;
    let mut mesh = Mesh::with_capacity(vertex_count, (rings * segments * 6) as usize);

    let ring_step = PI / rings.max(1) as f64;
    let segment_step = 2.0 * PI / segments.max(1) as f64;

    for lat in 0..=rings {
        let theta = lat as f64 * ring_step;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=segments {
            let phi = lon as f64 * segment_step;
            let (sin_phi, cos_phi) = phi.sin_cos();

            mesh.push_vertex(Point3::new(
                radii.x * cos_phi * sin_theta,
                radii.y * cos_theta,
                radii.z * sin_phi * sin_theta,
            ));
        }
    }

    stitch_grid(&mut mesh, 0, rings, segments);

    let surface = if radii.x == radii.y && radii.y == radii.z {
        AnalyticSurface::Sphere {
            center: Point3::new(0.0, 0.0, 0.0),
        }
    } else {
        AnalyticSurface::Ellipsoid { radii }
    };
    mesh.compute_normals(&NormalStrategy::Analytic(surface));
    mesh
}

/// Generate a closed cylinder around the Y axis
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder (along Y)
/// * `segments` - Number of circular segments
///
/// Returns a cylinder extending from `-height/2` to `height/2`. Each cap has
/// its own center and rim vertices so the side keeps radial normals.
pub fn generate_cylinder(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = generate_open_cylinder(radius, height, segments);
    let half_height = height * 0.5;

    push_cap(&mut mesh, radius, -half_height, segments, false);
    push_cap(&mut mesh, radius, half_height, segments, true);

    debug!(
        "Generated cylinder r={} h={} ({} vertices)",
        radius,
        height,
        mesh.vertex_count()
    );
    mesh
}

/// Generate the side wall of a cylinder without caps
///
/// Vertices alternate bottom/top per segment step: `2i` is the bottom rim
/// point and `2i + 1` the top rim point at angle `i·2π/segments`.
pub fn generate_open_cylinder(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(2 * (segments as usize + 1), segments as usize * 6);
    let half_height = height * 0.5;
    let step = 2.0 * PI / segments.max(1) as f64;

    for i in 0..=segments {
        let (sin_a, cos_a) = (i as f64 * step).sin_cos();
        let (x, z) = (radius * cos_a, radius * sin_a);

        mesh.push_vertex(Point3::new(x, -half_height, z));
        mesh.push_vertex(Point3::new(x, half_height, z));
    }

    for i in 0..segments {
        let bottom = 2 * i;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        mesh.push_triangle(bottom, top, bottom_next);
        mesh.push_triangle(top, top_next, bottom_next);
    }

    mesh.compute_normals(&NormalStrategy::Analytic(AnalyticSurface::CylinderSide));
    mesh
}

/// Append a flat disc fan at height `y`, facing up or down
fn push_cap(mesh: &mut Mesh, radius: f64, y: f64, segments: u32, facing_up: bool) {
    let normal = if facing_up {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(0.0, -1.0, 0.0)
    };
    let step = 2.0 * PI / segments.max(1) as f64;
    let mut cap = Mesh::with_capacity(segments as usize + 2, segments as usize * 3);

    let center = cap.push_vertex(Point3::new(0.0, y, 0.0));
    for i in 0..=segments {
        let (sin_a, cos_a) = (i as f64 * step).sin_cos();
        cap.push_vertex(Point3::new(radius * cos_a, y, radius * sin_a));
    }

    for i in 0..segments {
        let current = center + 1 + i;
        let next = current + 1;
        if facing_up {
            cap.push_triangle(center, next, current);
        } else {
            cap.push_triangle(center, current, next);
        }
    }

    cap.compute_normals(&NormalStrategy::Analytic(AnalyticSurface::Flat(normal)));
    mesh.append(&cap);
}

/// Generate a cone around the Y axis with its apex at `+height/2`
///
/// # Arguments
/// * `radius` - Radius of the base
/// * `height` - Distance from base to apex
/// * `segments` - Number of wedges around the axis
///
/// Each wedge owns its apex and rim vertices, so the side is flat shaded.
/// The base cap follows with its own center and rim copy.
pub fn generate_cone(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(4 * segments as usize + 2, segments as usize * 6);
    let half_height = height * 0.5;
    let apex = Point3::new(0.0, half_height, 0.0);
    let step = 2.0 * PI / segments.max(1) as f64;

    let rim = |i: u32| {
        let (sin_a, cos_a) = (i as f64 * step).sin_cos();
        Point3::new(radius * cos_a, -half_height, radius * sin_a)
    };

    for i in 0..segments {
        let a = mesh.push_vertex(apex);
        let b = mesh.push_vertex(rim(i));
        let c = mesh.push_vertex(rim(i + 1));
        mesh.push_triangle(a, c, b);
    }

    let center = mesh.push_vertex(Point3::new(0.0, -half_height, 0.0));
    for i in 0..=segments {
        mesh.push_vertex(rim(i));
    }
    for i in 0..segments {
        mesh.push_triangle(center, center + 1 + i, center + 2 + i);
    }

    mesh.compute_normals(&NormalStrategy::Accumulated);
    debug!(
        "Generated cone r={} h={} ({} vertices)",
        radius,
        height,
        mesh.vertex_count()
    );
    mesh
}

/// Generate a torus lying in the XZ plane
///
/// # Arguments
/// * `major_radius` - Distance from the center to the middle of the tube
/// * `minor_radius` - Radius of the tube
/// * `major_segments` - Segments around the ring
/// * `minor_segments` - Segments around the tube
pub fn generate_torus(
    major_radius: f64,
    minor_radius: f64,
    major_segments: u32,
    minor_segments: u32,
) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        ((major_segments + 1) * (minor_segments + 1)) as usize,
        (major_segments * minor_segments * 6) as usize,
    );
    let major_step = 2.0 * PI / major_segments.max(1) as f64;
    let minor_step = 2.0 * PI / minor_segments.max(1) as f64;

    for i in 0..=major_segments {
        let (sin_u, cos_u) = (i as f64 * major_step).sin_cos();

        for j in 0..=minor_segments {
            let (sin_v, cos_v) = (j as f64 * minor_step).sin_cos();
            let ring = major_radius + minor_radius * cos_v;

            mesh.push_vertex(Point3::new(ring * cos_u, minor_radius * sin_v, ring * sin_u));
        }
    }

    stitch_grid(&mut mesh, 0, major_segments, minor_segments);
    mesh.compute_normals(&NormalStrategy::Analytic(AnalyticSurface::Torus {
        major_radius,
    }));
    debug!(
        "Generated torus R={} r={} ({} vertices)",
        major_radius,
        minor_radius,
        mesh.vertex_count()
    );
    mesh
}

/// Generate a Möbius strip around the Y axis
///
/// # Arguments
/// * `radius` - Radius of the center line
/// * `width` - Width of the strip
/// * `segments` - Number of steps around the loop
///
/// Two boundary points per step, `2i` at `-width/2` and `2i + 1` at
/// `+width/2`. The half twist makes the final pair land on the first pair
/// swapped.
pub fn generate_mobius_strip(radius: f64, width: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(2 * (segments as usize + 1), segments as usize * 6);
    let step = 2.0 * PI / segments.max(1) as f64;

    for i in 0..=segments {
        let u = i as f64 * step;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_half, cos_half) = (u * 0.5).sin_cos();

        for v in [-width * 0.5, width * 0.5] {
            let ring = radius + v * cos_half;
            mesh.push_vertex(Point3::new(ring * cos_u, v * sin_half, ring * sin_u));
        }
    }

    for i in 0..segments {
        let base = 2 * i;
        mesh.push_triangle(base, base + 2, base + 1);
        mesh.push_triangle(base + 1, base + 2, base + 3);
    }

    mesh.compute_normals(&NormalStrategy::Accumulated);
    mesh
}

/// Generate a tube swept along a helix around the Y axis
///
/// # Arguments
/// * `radius` - Radius of the helix
/// * `coil_radius` - Radius of the wire
/// * `height` - Total height, centered on the origin
/// * `coils` - Number of turns
/// * `segments` - Steps per turn and around the wire
pub fn generate_spring(
    radius: f64,
    coil_radius: f64,
    height: f64,
    coils: u32,
    segments: u32,
) -> Mesh {
    let total_steps = coils * segments;
    let mut mesh = Mesh::with_capacity(
        ((total_steps + 1) * (segments + 1)) as usize,
        (total_steps * segments * 6) as usize,
    );
    let wire_step = 2.0 * PI / segments.max(1) as f64;

    for i in 0..=total_steps {
        let t = i as f64 / total_steps.max(1) as f64;
        let (sin_a, cos_a) = (t * coils as f64 * 2.0 * PI).sin_cos();
        let y = t * height - height * 0.5;
        let outward = Vector3::new(cos_a, 0.0, sin_a);
        let center = Point3::new(radius * cos_a, y, radius * sin_a);

        for j in 0..=segments {
            let (sin_c, cos_c) = (j as f64 * wire_step).sin_cos();
            let offset = outward * (coil_radius * cos_c) + Vector3::new(0.0, coil_radius * sin_c, 0.0);
            mesh.push_vertex(center + offset);
        }
    }

    stitch_grid(&mut mesh, 0, total_steps, segments);
    mesh.compute_normals(&NormalStrategy::Accumulated);
    mesh
}

/// Generate a sine-wave sheet along X, one unit wide in Z, facing +Y
///
/// # Arguments
/// * `amplitude` - Peak height of the wave
/// * `wavelength` - Length of one cycle
/// * `cycles` - Number of cycles; total length is `wavelength · cycles`
/// * `resolution` - Segments along the wave
pub fn generate_sine_wave(amplitude: f64, wavelength: f64, cycles: u32, resolution: u32) -> Mesh {
    const WIDTH: f64 = 1.0;
    const WIDTH_SEGMENTS: u32 = 20;

    let total_length = wavelength * cycles as f64;
    let mut mesh = Mesh::with_capacity(
        ((resolution + 1) * (WIDTH_SEGMENTS + 1)) as usize,
        (resolution * WIDTH_SEGMENTS * 6) as usize,
    );

    for i in 0..=resolution {
        let x = (i as f64 / resolution.max(1) as f64) * total_length - total_length * 0.5;
        let y = if wavelength == 0.0 {
            0.0
        } else {
            amplitude * ((2.0 * PI / wavelength) * (x + total_length * 0.5)).sin()
        };

        for j in 0..=WIDTH_SEGMENTS {
            let z = (j as f64 / WIDTH_SEGMENTS as f64) * WIDTH - WIDTH * 0.5;
            mesh.push_vertex(Point3::new(x, y, z));
        }
    }

    stitch_grid(&mut mesh, 0, resolution, WIDTH_SEGMENTS);
    mesh.compute_normals(&NormalStrategy::Accumulated);
    mesh
}

/// Generate a flat annulus at `y = 0`, facing +Y
///
/// Used as the visual path of an orbiting body. Vertex `2i` lies at
/// `radius - width` and `2i + 1` at `radius + width`.
pub fn generate_orbit_ring(radius: f64, width: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(2 * (segments as usize + 1), segments as usize * 6);
    let step = 2.0 * PI / segments.max(1) as f64;

    for i in 0..=segments {
        let (sin_a, cos_a) = (i as f64 * step).sin_cos();
        for r in [radius - width, radius + width] {
            mesh.push_vertex(Point3::new(r * cos_a, 0.0, r * sin_a));
        }
    }

    for i in 0..segments {
        let inner = 2 * i;
        let outer = inner + 1;
        mesh.push_triangle(inner, inner + 2, outer);
        mesh.push_triangle(outer, inner + 2, outer + 2);
    }

    mesh.compute_normals(&NormalStrategy::Analytic(AnalyticSurface::Flat(
        Vector3::new(0.0, 1.0, 0.0),
    )));
    mesh
}

/// Points of a golden-angle spiral on the unit sphere, scaled by `scale`
///
/// Point `i` has `y = 1 - 2i/(N-1)` and azimuth `i·π(3 - √5)`; a single point
/// sits at the top.
pub fn spiral_lattice_points(points: u32, scale: f64) -> Vec<Point3<f64>> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let last = points.saturating_sub(1).max(1) as f64;

    (0..points)
        .map(|i| {
            let y = 1.0 - (i as f64 / last) * 2.0;
            let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
            let (sin_t, cos_t) = (golden_angle * i as f64).sin_cos();
            Point3::new(cos_t * radius_at_y, y, sin_t * radius_at_y) * scale
        })
        .collect()
}

/// Generate a golden-angle spiral lattice of small spheres
///
/// # Arguments
/// * `points` - Number of lattice points
/// * `scale` - Radius of the sphere the points lie on
///
/// Every point is replaced by a marker sphere of radius
/// [`LATTICE_MARKER_RADIUS`], all merged into one mesh.
pub fn generate_spiral_lattice(points: u32, scale: f64) -> Mesh {
    let marker = generate_sphere(LATTICE_MARKER_RADIUS, LATTICE_MARKER_SEGMENTS);
    let mut mesh = Mesh::with_capacity(
        marker.vertex_count() * points as usize,
        marker.indices.len() * points as usize,
    );

    for center in spiral_lattice_points(points, scale) {
        let mut sphere = marker.clone();
        sphere.translate(center - Point3::new(0.0, 0.0, 0.0));
        mesh.append(&sphere);
    }

    debug!(
        "Generated spiral lattice with {} points ({} vertices)",
        points,
        mesh.vertex_count()
    );
    mesh
}
