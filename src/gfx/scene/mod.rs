//! # Scene Management Module
//!
//! The scene graph that generated and imported models are assembled into.
//!
//! ## Key Components
//!
//! - [`Scene`] - Slot holding the currently displayed model
//! - [`SceneNode`] - Tree node carrying a transform and a mesh or children
//! - [`Transform`] - Affine placement relative to the parent
//! - [`Vertex3D`] - Interleaved vertex layout for upload to a renderer
//!
//! ## Usage
//!
//! ```rust
//! use meshforge::gfx::geometry::generate_cube;
//! use meshforge::gfx::material::Material;
//! use meshforge::gfx::scene::{Scene, SceneNode, Transform};
//! use cgmath::Vector3;
//!
//! let cube = SceneNode::leaf("Cube", generate_cube(2.0), Material::default())
//!     .with_transform(Transform::translation(Vector3::new(0.0, 1.0, 0.0)));
//!
//! let mut scene = Scene::new();
//! scene.replace_root(SceneNode::group("Model", vec![cube]));
//! assert_eq!(scene.get_statistics().mesh_count, 1);
//! ```

pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use node::{Bounds, NodeContent, NodeId, SceneNode, SceneStatistics, Transform};
pub use scene::Scene;
pub use vertex::Vertex3D;
