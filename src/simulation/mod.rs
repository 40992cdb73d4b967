//! Simulation system
//!
//! Time-driven animations of the displayed model. An animation never rebuilds
//! geometry: it rewrites transforms of nodes it registered when its model was
//! generated.
//!
//! - [`traits::Simulation`] - interface every animation implements
//! - [`manager::SimulationManager`] - owns the attached animation, time scale and pause
//! - [`orbital`] - the planets of the solar system preset
//! - [`helix_spin`] - continuous spin of the DNA preset

pub mod cpu;
pub mod helix_spin;
pub mod manager;
pub mod orbital;
pub mod traits;

pub use helix_spin::HelixSpin;
pub use manager::SimulationManager;
pub use orbital::{
    default_bodies, AnimationRegistry, BodyParameters, OrbitalSettings, OrbitalSimulation,
    OrbitalSystem, PlanetaryBody, SPEED_FACTOR,
};
pub use traits::Simulation;
