//! Continuous spin of the displayed model about the vertical axis
//!
//! Used by the DNA helix preset. The whole root node turns, no geometry moves.

use std::any::Any;

use super::cpu::CpuSimulationBase;
use super::traits::Simulation;
use crate::gfx::scene::{Scene, Transform};
use crate::simulation::orbital::wrap_degrees;

/// Degrees per time unit at speed 1: one turn every ten units
pub const DEGREES_PER_UNIT: f64 = 36.0;

/// Spins the scene root about Y
pub struct HelixSpin {
    base: CpuSimulationBase,
    angle: f64,
    speed: f64,
}

impl Default for HelixSpin {
    fn default() -> Self {
        Self::new()
    }
}

impl HelixSpin {
    pub fn new() -> Self {
        Self {
            base: CpuSimulationBase::new("Helix Spin"),
            angle: 0.0,
            speed: 1.0,
        }
    }

    /// Current rotation in degrees, in `[0, 360)`
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Flip between spinning and stopped, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.base.running = !self.base.running;
        self.base.running
    }

    fn apply(&self, scene: &mut Scene) {
        if let Some(root) = scene.root_mut() {
            root.transform = Some(Transform::rotation_y(self.angle));
        }
    }
}

impl Simulation for HelixSpin {
    fn initialize(&mut self, scene: &mut Scene) {
        self.base.running = true;
        self.angle = 0.0;
        self.apply(scene);
    }

    fn update(&mut self, delta_time: f64, scene: &mut Scene) {
        if !self.base.running {
            return;
        }
        self.angle = wrap_degrees(self.angle + DEGREES_PER_UNIT * delta_time * self.speed);
        self.apply(scene);
        self.base.record_step(delta_time);
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn is_running(&self) -> bool {
        self.base.running
    }

    fn set_running(&mut self, running: bool) {
        self.base.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.angle = 0.0;
        self.apply(scene);
        self.base.reset_stats();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
