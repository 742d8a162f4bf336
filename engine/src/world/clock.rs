//! Frame time source and match timer
//!
//! The host loop measures real elapsed milliseconds and hands them to
//! [`FrameClock::tick`]. Everything inside the simulation then reads the
//! scaled `delta_ms`, so changing the rate slows or speeds up the whole
//! match uniformly, gravity included.

use serde::{Deserialize, Serialize};

/// Scaled per-frame time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    rate: f64,
    delta_ms: u32,
    base_gravity: f64,
}

impl FrameClock {
    pub fn new(base_gravity: f64) -> Self {
        Self {
            rate: 1.0,
            delta_ms: 0,
            base_gravity,
        }
    }

    /// Advance by `elapsed_ms` of real time. The scaled delta is truncated
    /// to whole milliseconds.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        self.delta_ms = (elapsed_ms as f64 * self.rate) as u32;
        self.delta_ms
    }

    pub fn delta_ms(&self) -> u32 {
        self.delta_ms
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    /// Gravitational acceleration seen by this frame.
    pub fn gravity(&self) -> f64 {
        self.base_gravity * self.rate
    }
}

/// Remaining battle time, counted down by the scaled frame delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTimer {
    length_ms: u32,
    remaining_ms: u32,
}

impl MatchTimer {
    pub fn new(length_ms: u32) -> Self {
        Self {
            length_ms,
            remaining_ms: length_ms,
        }
    }

    pub fn tick(&mut self, delta_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(delta_ms);
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_over(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn reset(&mut self) {
        self.remaining_ms = self.length_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_scales_by_rate() {
        let mut clock = FrameClock::new(9.8);
        assert_eq!(clock.tick(16), 16);

        clock.set_rate(0.5);
        assert_eq!(clock.tick(17), 8);
        assert!((clock.gravity() - 4.9).abs() < 1e-12);
    }

    #[test]
    fn test_match_timer_saturates() {
        let mut timer = MatchTimer::new(100);
        timer.tick(60);
        assert_eq!(timer.remaining_ms(), 40);
        timer.tick(60);
        assert_eq!(timer.remaining_ms(), 0);
        assert!(timer.is_over());

        timer.reset();
        assert_eq!(timer.remaining_ms(), 100);
    }
}
