//! CPU simulation utilities and base types
//!
//! Shared bookkeeping for animations stepped on the CPU.

/// Base struct for simulations with common functionality
///
/// Provides the standard fields every animation needs: a display name, the
/// running flag and step statistics.
#[derive(Debug, Clone)]
pub struct CpuSimulationBase {
    pub name: String,
    pub running: bool,
    pub delta_accumulator: f64,
    pub step_count: u64,
}

impl CpuSimulationBase {
    /// Create a new base with the given name, initially stopped
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            running: false,
            delta_accumulator: 0.0,
            step_count: 0,
        }
    }

    /// Record a simulation step (for debugging/statistics)
    pub fn record_step(&mut self, delta_time: f64) {
        self.step_count += 1;
        self.delta_accumulator += delta_time;
    }

    /// Total simulated time since the last reset
    pub fn elapsed(&self) -> f64 {
        self.delta_accumulator
    }

    /// Get average step length over the simulation's lifetime
    pub fn average_frame_time(&self) -> f64 {
        if self.step_count > 0 {
            self.delta_accumulator / self.step_count as f64
        } else {
            0.0
        }
    }

    /// Get simulation frequency (steps per time unit)
    pub fn frequency(&self) -> f64 {
        let avg = self.average_frame_time();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.step_count = 0;
        self.delta_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_statistics() {
        let mut base = CpuSimulationBase::new("test");
        assert_eq!(base.frequency(), 0.0);

        for _ in 0..4 {
            base.record_step(0.25);
        }
        assert_eq!(base.step_count, 4);
        assert_relative_eq!(base.elapsed(), 1.0);
        assert_relative_eq!(base.frequency(), 4.0);

        base.reset_stats();
        assert_eq!(base.average_frame_time(), 0.0);
    }
}
