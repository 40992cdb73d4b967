//! Core simulation traits
//!
//! Defines the interface that animations must implement to be driven by the
//! viewer's tick loop.

use std::any::Any;

use crate::gfx::scene::Scene;

/// Core trait for time-driven animations of the displayed model
///
/// Simulations never regenerate geometry. They rewrite transforms of nodes that
/// already live in the scene, found by the handles they recorded when the
/// model was built.
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once when the simulation is attached, after its model has been
    /// installed in the scene.
    ///
    /// # Arguments
    /// * `scene` - Mutable reference to the scene holding the model
    fn initialize(&mut self, scene: &mut Scene);

    /// Update simulation state
    ///
    /// Called every tick to advance the simulation.
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last update, in time units
    /// * `scene` - Mutable reference to scene for updating node transforms
    fn update(&mut self, delta_time: f64, scene: &mut Scene);

    /// Get simulation name for display
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self, scene: &mut Scene);

    /// Optional: Custom cleanup when simulation is removed
    fn cleanup(&mut self, _scene: &mut Scene) {
        // Default: no cleanup needed
    }

    /// Access to the concrete type, for callers that need simulation-specific queries
    fn as_any(&self) -> &dyn Any;

    /// Mutable access to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
