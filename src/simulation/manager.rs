//! Simulation manager
//!
//! Manages the lifecycle of the attached animation and integrates it with the
//! viewer's tick loop.

use log::{info, trace, warn};

use super::traits::Simulation;
use crate::gfx::scene::Scene;

/// Upper bound on fixed steps run by a single [`SimulationManager::update`]
pub const MAX_SUBSTEPS: u32 = 240;

/// Manages the animation of the displayed model
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f64,
    accumulated_time: f64,
    fixed_timestep: Option<f64>, // For deterministic simulations
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attach a simulation
    ///
    /// The previous simulation, if any, is cleaned up first.
    ///
    /// # Arguments
    /// * `simulation` - Boxed simulation implementing the Simulation trait
    /// * `scene` - Scene to initialize the simulation with
    pub fn attach_simulation(&mut self, mut simulation: Box<dyn Simulation>, scene: &mut Scene) {
        // Clean up previous simulation if any
        self.detach_simulation(scene);

        info!("Attaching simulation '{}'", simulation.name());
        simulation.initialize(scene);
        self.simulation = Some(simulation);
        self.is_paused = false;
        self.accumulated_time = 0.0;
    }

    /// Remove current simulation
    ///
    /// # Arguments
    /// * `scene` - Scene to clean up simulation resources from
    pub fn detach_simulation(&mut self, scene: &mut Scene) {
        if let Some(mut sim) = self.simulation.take() {
            info!("Detaching simulation '{}'", sim.name());
            sim.cleanup(scene);
        }
    }

    /// Update simulation (called every tick)
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last tick
    /// * `scene` - Scene to update with simulation results
    pub fn update(&mut self, delta_time: f64, scene: &mut Scene) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            let scaled_delta = delta_time * self.time_scale;

            if let Some(fixed_dt) = self.fixed_timestep {
                // Fixed timestep simulation for deterministic results
                self.accumulated_time += scaled_delta;

                let mut steps = 0;
                while self.accumulated_time >= fixed_dt && steps < MAX_SUBSTEPS {
                    simulation.update(fixed_dt, scene);
                    self.accumulated_time -= fixed_dt;
                    steps += 1;
                }

                if self.accumulated_time >= fixed_dt {
                    warn!(
                        "'{}' fell behind by {:.3}, dropping the backlog",
                        simulation.name(),
                        self.accumulated_time
                    );
                    self.accumulated_time %= fixed_dt;
                    if !self.accumulated_time.is_finite() {
                        self.accumulated_time = 0.0;
                    }
                }
            } else {
                // Variable timestep
                simulation.update(scaled_delta, scene);
            }
            trace!("Ticked '{}' by {}", simulation.name(), scaled_delta);
        }
    }

    /// Reset the attached simulation to its initial state
    pub fn reset(&mut self, scene: &mut Scene) {
        if let Some(simulation) = &mut self.simulation {
            simulation.reset(scene);
        }
        self.accumulated_time = 0.0;
    }

    /// The attached simulation, if any
    pub fn simulation(&self) -> Option<&dyn Simulation> {
        self.simulation.as_deref()
    }

    /// The attached simulation, mutable
    pub fn simulation_mut(&mut self) -> Option<&mut (dyn Simulation + 'static)> {
        self.simulation.as_deref_mut()
    }

    /// Get current simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// Check if simulation is running
    ///
    /// # Returns
    /// `true` if simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    /// Check if simulation is paused
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    ///
    /// # Arguments
    /// * `paused` - Whether to pause the simulation
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enable fixed timestep mode
    ///
    /// # Arguments
    /// * `timestep` - Fixed timestep, or None for variable timestep.
    ///   Non-positive steps fall back to variable timestep.
    pub fn set_fixed_timestep(&mut self, timestep: Option<f64>) {
        self.fixed_timestep = timestep.filter(|dt| *dt > 0.0);
        self.accumulated_time = 0.0; // Reset accumulator
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set time scale
    ///
    /// # Arguments
    /// * `scale` - Time scale multiplier (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0); // Prevent negative time
    }

    /// Check if a simulation is currently attached
    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}
