//! meshforge
//!
//! Core of a 3D model viewer: procedural mesh generation, a scene graph with a
//! single displayed model, composite molecular structures, an orbital
//! animation and the import boundary for mesh files.

pub mod app;
pub mod composite;
pub mod gfx;
pub mod import;
pub mod prelude;
pub mod presets;
pub mod simulation;

// Re-export main types for convenience
pub use app::Viewer;
pub use presets::SampleModel;
