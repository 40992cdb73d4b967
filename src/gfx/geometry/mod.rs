//! # Procedural Geometry Generation
//!
//! This module provides the [`Mesh`] buffer type and the functions that fill it
//! procedurally, so demonstration models need no external files.
//!
//! ## Submodules
//!
//! - [`primitives`] - Parametric surfaces (sphere, ellipsoid, cylinder, cone,
//!   torus, Möbius strip, spring, sine wave, orbit ring, spiral lattice)
//! - [`polyhedra`] - Fixed-topology solids built from static vertex/face tables
//! - [`normals`] - Analytic and face-accumulated vertex normals
//!
//! ## Usage
//!
//! ```rust
//! use meshforge::gfx::geometry::{generate_cube, generate_sphere, generate_torus};
//!
//! let cube = generate_cube(2.0);
//! assert_eq!(cube.vertex_count(), 36);
//!
//! let sphere = generate_sphere(1.5, 32);
//! let torus = generate_torus(1.0, 0.3, 32, 16);
//! assert!(sphere.triangle_count() > 0 && torus.triangle_count() > 0);
//! ```

pub mod normals;
pub mod polyhedra;
pub mod primitives;

pub use normals::{accumulate_face_normals, analytic_normal, AnalyticSurface, NormalStrategy};
pub use polyhedra::*;
pub use primitives::*;

use cgmath::{Point3, Vector3};
use thiserror::Error;

use crate::gfx::scene::vertex::Vertex3D;

/// Violations of the [`Mesh`] buffer invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("index count {0} is not a multiple of three")]
    IncompleteTriangle(usize),
    #[error("{normals} normals do not match {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
    #[error("{tex_coords} texture coordinates do not match {vertices} vertices")]
    TexCoordCountMismatch { tex_coords: usize, vertices: usize },
}

/// Triangulated surface buffers
///
/// Triangles wind counter-clockwise when seen from their outward side.
/// `normals` and `tex_coords` are either empty or exactly as long as `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Point3<f64>>,
    /// Per-vertex normals (empty until computed)
    pub normals: Vec<Vector3<f64>>,
    /// Optional single UV channel, only filled by the importer
    pub tex_coords: Vec<[f64; 2]>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `vertices` positions and `indices` indices
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether normals have been computed for every vertex
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.positions.len()
    }

    /// Index of the next vertex that [`Mesh::push_vertex`] will add
    pub fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Push a position without a normal and return its index
    pub fn push_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.next_index();
        self.positions.push(position);
        index
    }

    /// Push one triangle
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Iterate over the triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized face normal of one triangle (length is twice its area)
    pub fn face_normal(&self, triangle: [u32; 3]) -> Vector3<f64> {
        let p0 = self.positions[triangle[0] as usize];
        let p1 = self.positions[triangle[1] as usize];
        let p2 = self.positions[triangle[2] as usize];
        (p1 - p0).cross(p2 - p0)
    }

    /// Append another mesh, offsetting its indices past the current vertices.
    ///
    /// Normals are kept only if both meshes carry them; texture coordinates
    /// likewise.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.next_index();
        let keep_normals = (self.positions.is_empty() || self.has_normals()) && other.has_normals();
        let keep_uvs = (self.positions.is_empty() || self.tex_coords.len() == self.positions.len())
            && !other.tex_coords.is_empty()
            && other.tex_coords.len() == other.positions.len();

        self.positions.extend_from_slice(&other.positions);
        if keep_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        if keep_uvs {
            self.tex_coords.extend_from_slice(&other.tex_coords);
        } else {
            self.tex_coords.clear();
        }
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Move every position by `offset`
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for position in &mut self.positions {
            *position += offset;
        }
    }

    /// Replace the normal buffer using the given strategy
    pub fn compute_normals(&mut self, strategy: &NormalStrategy) {
        self.normals = match strategy {
            NormalStrategy::Analytic(surface) => self
                .positions
                .iter()
                .map(|p| analytic_normal(surface, *p))
                .collect(),
            NormalStrategy::Accumulated => accumulate_face_normals(&self.positions, &self.indices),
        };
    }

    /// Check the buffer invariants
    pub fn check_invariants(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }

        let vertex_count = self.positions.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        if !self.normals.is_empty() && self.normals.len() != vertex_count {
            return Err(MeshError::NormalCountMismatch {
                normals: self.normals.len(),
                vertices: vertex_count,
            });
        }

        if !self.tex_coords.is_empty() && self.tex_coords.len() != vertex_count {
            return Err(MeshError::TexCoordCountMismatch {
                tex_coords: self.tex_coords.len(),
                vertices: vertex_count,
            });
        }

        Ok(())
    }

    /// Convert to the interleaved single-precision layout used by the renderer.
    ///
    /// Vertices without a normal get `+Y`.
    pub fn to_vertex_buffer(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices: Vec<Vertex3D> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let n = self
                    .normals
                    .get(i)
                    .copied()
                    .unwrap_or(Vector3::new(0.0, 1.0, 0.0));
                Vertex3D {
                    position: [p.x as f32, p.y as f32, p.z as f32],
                    normal: [n.x as f32, n.y as f32, n.z as f32],
                }
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.push_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = triangle();
        mesh.append(&triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_append_drops_normals_when_one_side_lacks_them() {
        let mut with_normals = triangle();
        with_normals.compute_normals(&NormalStrategy::Accumulated);
        with_normals.append(&triangle());
        assert!(with_normals.normals.is_empty());
        assert!(with_normals.check_invariants().is_ok());
    }

    #[test]
    fn test_invariant_violations() {
        let mut mesh = triangle();
        mesh.indices.push(7);
        assert_eq!(mesh.check_invariants(), Err(MeshError::IncompleteTriangle(4)));

        mesh.indices.extend_from_slice(&[0, 1]);
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshError::IndexOutOfRange { index: 7, .. })
        ));

        let mut mesh = triangle();
        mesh.normals.push(Vector3::new(0.0, 0.0, 1.0));
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshError::NormalCountMismatch { normals: 1, vertices: 3 })
        ));
    }

    #[test]
    fn test_vertex_buffer_conversion() {
        let mut mesh = triangle();
        let (vertices, indices) = mesh.to_vertex_buffer();
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(indices, vec![0, 1, 2]);

        mesh.compute_normals(&NormalStrategy::Accumulated);
        let (vertices, _) = mesh.to_vertex_buffer();
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    }
}
