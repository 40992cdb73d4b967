//! # meshforge Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ## Usage
//!
//! ```rust
//! use meshforge::prelude::*;
//!
//! let mut viewer = Viewer::new();
//! viewer.show_sample(SampleModel::SolarSystem);
//! viewer.update(1.0 / 60.0);
//!
//! let positions = viewer.planet_positions().unwrap_or_default();
//! assert_eq!(positions[0].0, "Sun");
//! ```

// Re-export core viewer types
pub use crate::app::Viewer;
pub use crate::presets::{SampleModel, SampleScene};

// Re-export geometry, material and scene types
pub use crate::gfx::geometry::{
    generate_cone, generate_cube, generate_cylinder, generate_sphere, generate_torus, Mesh,
    NormalStrategy,
};
pub use crate::gfx::material::{palette, Material};
pub use crate::gfx::scene::{NodeId, Scene, SceneNode, Transform};

// Re-export import boundary
pub use crate::import::{ImportError, ModelImporter, ModelInfo, ObjImporter};

// Re-export simulation framework
pub use crate::simulation::manager::SimulationManager;
pub use crate::simulation::orbital::{OrbitalSimulation, OrbitalSystem};
pub use crate::simulation::traits::Simulation;

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Point3, Vector3};
