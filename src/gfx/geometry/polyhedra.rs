//! # Fixed-Topology Solids
//!
//! Each solid is a static [`SolidTable`] of unit coordinates and outward-wound
//! index triples. [`build_solid`] scales a table and emits a [`Mesh`] whose
//! normals always come from face accumulation.
//!
//! Faceted tables emit one vertex per triangle corner so each face is shaded
//! flat. The others share vertices between faces.

use super::normals::NormalStrategy;
use super::Mesh;
use cgmath::{Point3, Vector3};
use log::debug;
use std::f64::consts::PI;

/// Golden ratio, used by the icosahedron table
const PHI: f64 = 1.618_033_988_749_895;

/// Static description of a polyhedron
#[derive(Debug, Clone, Copy)]
pub struct SolidTable {
    pub name: &'static str,
    /// Unit-scale corner coordinates
    pub vertices: &'static [[f64; 3]],
    /// Outward counter-clockwise triangles
    pub faces: &'static [[u32; 3]],
    /// Emit one vertex per triangle corner instead of sharing corners
    pub faceted: bool,
}

const BOX_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const BOX_FACES: [[u32; 3]; 12] = [
    // back
    [0, 2, 1],
    [0, 3, 2],
    // front
    [4, 5, 6],
    [4, 6, 7],
    // left
    [4, 3, 0],
    [4, 7, 3],
    // right
    [1, 2, 6],
    [1, 6, 5],
    // top
    [3, 7, 6],
    [3, 6, 2],
    // bottom
    [0, 1, 5],
    [0, 5, 4],
];

pub static CUBE: SolidTable = SolidTable {
    name: "cube",
    vertices: &BOX_VERTICES,
    faces: &BOX_FACES,
    faceted: true,
};

pub static CUBOID: SolidTable = SolidTable {
    name: "cuboid",
    vertices: &BOX_VERTICES,
    faces: &BOX_FACES,
    faceted: false,
};

pub static PYRAMID: SolidTable = SolidTable {
    name: "pyramid",
    vertices: &[
        [0.0, 1.0, 0.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
    ],
    faces: &[
        [0, 2, 1],
        [0, 3, 2],
        [0, 4, 3],
        [0, 1, 4],
        [1, 2, 3],
        [1, 3, 4],
    ],
    faceted: true,
};

/// Equilateral prism; X is scaled by half the base edge, Z by a third of the
/// base triangle height.
pub static TRIANGULAR_PRISM: SolidTable = SolidTable {
    name: "triangular prism",
    vertices: &[
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [0.0, -1.0, 2.0],
        [-1.0, 1.0, -1.0],
        [1.0, 1.0, -1.0],
        [0.0, 1.0, 2.0],
    ],
    faces: &[
        [0, 1, 2],
        [3, 5, 4],
        [0, 4, 1],
        [0, 3, 4],
        [1, 5, 2],
        [1, 4, 5],
        [2, 3, 0],
        [2, 5, 3],
    ],
    faceted: false,
};

pub static TETRAHEDRON: SolidTable = SolidTable {
    name: "tetrahedron",
    vertices: &[
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ],
    faces: &[[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]],
    faceted: false,
};

pub static OCTAHEDRON: SolidTable = SolidTable {
    name: "octahedron",
    vertices: &[
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ],
    faces: &[
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 4, 2],
        [1, 3, 4],
        [1, 5, 3],
        [1, 2, 5],
    ],
    faceted: false,
};

pub static ICOSAHEDRON: SolidTable = SolidTable {
    name: "icosahedron",
    vertices: &[
        [-1.0, PHI, 0.0],
        [1.0, PHI, 0.0],
        [-1.0, -PHI, 0.0],
        [1.0, -PHI, 0.0],
        [0.0, -1.0, PHI],
        [0.0, 1.0, PHI],
        [0.0, -1.0, -PHI],
        [0.0, 1.0, -PHI],
        [PHI, 0.0, -1.0],
        [PHI, 0.0, 1.0],
        [-PHI, 0.0, -1.0],
        [-PHI, 0.0, 1.0],
    ],
    faces: &[
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ],
    faceted: false,
};

/// Scale a solid table per axis and build its mesh with accumulated normals
pub fn build_solid(table: &SolidTable, scale: Vector3<f64>) -> Mesh {
    let corner = |i: u32| {
        let [x, y, z] = table.vertices[i as usize];
        Point3::new(x * scale.x, y * scale.y, z * scale.z)
    };

    let mut mesh = if table.faceted {
        let mut mesh = Mesh::with_capacity(table.faces.len() * 3, table.faces.len() * 3);
        for &[a, b, c] in table.faces {
            let ia = mesh.push_vertex(corner(a));
            let ib = mesh.push_vertex(corner(b));
            let ic = mesh.push_vertex(corner(c));
            mesh.push_triangle(ia, ib, ic);
        }
        mesh
    } else {
        let mut mesh = Mesh::with_capacity(table.vertices.len(), table.faces.len() * 3);
        for i in 0..table.vertices.len() as u32 {
            mesh.push_vertex(corner(i));
        }
        for &[a, b, c] in table.faces {
            mesh.push_triangle(a, b, c);
        }
        mesh
    };

    mesh.compute_normals(&NormalStrategy::Accumulated);
    debug!(
        "Built {} ({} vertices, {} triangles)",
        table.name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Generate a flat-shaded cube with edge length `size`
pub fn generate_cube(size: f64) -> Mesh {
    let half = size * 0.5;
    build_solid(&CUBE, Vector3::new(half, half, half))
}

/// Generate a box with shared corners
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
pub fn generate_cuboid(width: f64, height: f64, depth: f64) -> Mesh {
    build_solid(&CUBOID, Vector3::new(width, height, depth) * 0.5)
}

/// Generate a square pyramid `size` wide and `size` tall, apex up
pub fn generate_pyramid(size: f64) -> Mesh {
    let half = size * 0.5;
    build_solid(&PYRAMID, Vector3::new(half, half, half))
}

/// Generate a prism over an equilateral triangle
///
/// # Arguments
/// * `base_size` - Edge length of the base triangle
/// * `height` - Extent along Y
pub fn generate_triangular_prism(base_size: f64, height: f64) -> Mesh {
    let triangle_height = base_size * 3.0_f64.sqrt() * 0.5;
    build_solid(
        &TRIANGULAR_PRISM,
        Vector3::new(base_size * 0.5, height * 0.5, triangle_height / 3.0),
    )
}

/// Generate a regular tetrahedron inscribed in a cube of half-edge `size/√2`
pub fn generate_tetrahedron(size: f64) -> Mesh {
    let a = size / 2.0_f64.sqrt();
    build_solid(&TETRAHEDRON, Vector3::new(a, a, a))
}

/// Generate a regular octahedron with vertices at distance `size` on each axis
pub fn generate_octahedron(size: f64) -> Mesh {
    build_solid(&OCTAHEDRON, Vector3::new(size, size, size))
}

/// Generate a regular icosahedron with circumradius `size`
pub fn generate_icosahedron(size: f64) -> Mesh {
    let s = size / (1.0 + PHI * PHI).sqrt();
    build_solid(&ICOSAHEDRON, Vector3::new(s, s, s))
}

/// Generate a spur gear lying in the XY plane
///
/// # Arguments
/// * `inner_radius` - Root radius between teeth
/// * `outer_radius` - Tip radius of the teeth
/// * `thickness` - Extent along Z, centered on the origin
/// * `teeth` - Number of teeth
///
/// The profile holds `4·teeth + 1` points per face, alternating between the
/// two radii every quarter tooth.
pub fn generate_gear(inner_radius: f64, outer_radius: f64, thickness: f64, teeth: u32) -> Mesh {
    let profile_steps = teeth * 4;
    let points_per_side = profile_steps + 1;
    let half_thickness = thickness * 0.5;
    let tooth_angle = 2.0 * PI / teeth.max(1) as f64;

    let mut mesh = Mesh::with_capacity(
        2 * points_per_side as usize + 2,
        profile_steps as usize * 12,
    );

    for z in [-half_thickness, half_thickness] {
        for i in 0..=profile_steps {
            let angle = (i as f64 / 4.0) * tooth_angle;
            let radius = match i % 4 {
                0 | 3 => inner_radius,
                _ => outer_radius,
            };
            mesh.push_vertex(Point3::new(radius * angle.cos(), radius * angle.sin(), z));
        }
    }

    for i in 0..profile_steps {
        let front = i;
        let front_next = i + 1;
        let back = points_per_side + i;
        let back_next = back + 1;

        mesh.push_triangle(front, front_next, back);
        mesh.push_triangle(back, front_next, back_next);
    }

    let center_front = mesh.push_vertex(Point3::new(0.0, 0.0, -half_thickness));
    for i in 0..profile_steps {
        mesh.push_triangle(center_front, i + 1, i);
    }

    let center_back = mesh.push_vertex(Point3::new(0.0, 0.0, half_thickness));
    for i in 0..profile_steps {
        mesh.push_triangle(center_back, points_per_side + i, points_per_side + i + 1);
    }

    mesh.compute_normals(&NormalStrategy::Accumulated);
    debug!("Generated gear with {} teeth ({} vertices)", teeth, mesh.vertex_count());
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{EuclideanSpace, InnerSpace};

    /// Every face of a convex solid centered at the origin must face away from it
    fn assert_outward(mesh: &Mesh) {
        for triangle in mesh.triangles() {
            let centroid = triangle
                .iter()
                .map(|&i| mesh.positions[i as usize].to_vec())
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p)
                / 3.0;
            assert!(
                mesh.face_normal(triangle).dot(centroid) > 0.0,
                "triangle {:?} faces inward",
                triangle
            );
        }
    }

    #[test]
    fn test_cube_is_faceted() {
        let cube = generate_cube(2.0);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.indices, (0..36).collect::<Vec<u32>>());
        assert_outward(&cube);

        let mut directions: Vec<[i64; 3]> = cube
            .normals
            .iter()
            .map(|n| [n.x.round() as i64, n.y.round() as i64, n.z.round() as i64])
            .collect();
        directions.sort();
        directions.dedup();
        assert_eq!(directions.len(), 6);
        for n in &cube.normals {
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cuboid_shares_corners() {
        let cuboid = generate_cuboid(2.0, 1.5, 1.0);
        assert_eq!(cuboid.vertex_count(), 8);
        assert_eq!(cuboid.indices.len(), 36);
        assert_outward(&cuboid);
        assert_relative_eq!(cuboid.positions[6].y, 0.75);
    }

    #[test]
    fn test_convex_solids_wind_outward() {
        for mesh in [
            generate_pyramid(2.0),
            generate_triangular_prism(1.5, 2.5),
            generate_tetrahedron(1.5),
            generate_octahedron(1.5),
            generate_icosahedron(1.5),
        ] {
            assert!(mesh.check_invariants().is_ok());
            assert_outward(&mesh);
        }
    }

    #[test]
    fn test_icosahedron_counts_and_radius() {
        let ico = generate_icosahedron(1.5);
        assert_eq!(ico.vertex_count(), 12);
        assert_eq!(ico.indices.len(), 60);
        for p in &ico.positions {
            assert_relative_eq!(p.to_vec().magnitude(), 1.5, epsilon = 1e-9);
        }
        // Shared vertices of a regular solid get radial normals
        for (p, n) in ico.positions.iter().zip(&ico.normals) {
            assert_relative_eq!(p.to_vec().normalize().dot(*n), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_prism_base_is_equilateral() {
        let prism = generate_triangular_prism(1.5, 2.5);
        let (a, b, c) = (prism.positions[0], prism.positions[1], prism.positions[2]);
        assert_relative_eq!((b - a).magnitude(), 1.5, epsilon = 1e-12);
        assert_relative_eq!((c - b).magnitude(), 1.5, epsilon = 1e-12);
        assert_relative_eq!((a - c).magnitude(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gear_layout() {
        let teeth = 12;
        let gear = generate_gear(0.5, 1.0, 0.3, teeth);
        assert!(gear.check_invariants().is_ok());
        assert_eq!(gear.vertex_count() as u32, 2 * (4 * teeth + 1) + 2);
        assert_eq!(gear.triangle_count() as u32, 4 * 4 * teeth);

        let front_center = gear.normals[gear.vertex_count() - 2];
        let back_center = gear.normals[gear.vertex_count() - 1];
        assert_relative_eq!(front_center.z, -1.0, epsilon = 1e-9);
        assert_relative_eq!(back_center.z, 1.0, epsilon = 1e-9);
    }
}
