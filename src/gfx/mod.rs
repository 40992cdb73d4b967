//! # Graphics Module
//!
//! Everything that describes what is on screen, independent of how it is drawn.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Procedural mesh generation and normal estimation
//! - **Materials** ([`material`]) - Diffuse/specular surface descriptions and a color palette
//! - **Scene Management** ([`scene`]) - Node tree, transforms, and the displayed-model slot
//!
//! A renderer consumes the scene by walking it with [`scene::SceneNode::visit`]
//! and converting each mesh with [`geometry::Mesh::to_vertex_buffer`].

pub mod geometry;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use geometry::Mesh;
pub use material::Material;
pub use scene::{Scene, SceneNode, Transform};
