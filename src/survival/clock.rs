//! The countdown to sunrise.

use serde::{Deserialize, Serialize};

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Elapsed night time against a fixed sunrise horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightClock {
    elapsed: f64,
    horizon: f64,
    start_hour: f64,
    end_hour: f64,
}

impl NightClock {
    pub fn new(horizon: f64, start_hour: f64, end_hour: f64) -> Self {
        Self {
            elapsed: 0.0,
            horizon,
            start_hour,
            end_hour,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Per-tick advance. Time never flows backwards.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Time spent on an expedition, charged in one lump.
    pub fn apply_cost(&mut self, time_cost: u32) {
        self.elapsed += f64::from(time_cost);
    }

    pub fn has_reached_horizon(&self) -> bool {
        self.elapsed >= self.horizon
    }

    /// Fraction of the night that has passed, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.horizon <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.horizon).clamp(0.0, 1.0)
    }

    pub fn seconds_until_sunrise(&self) -> f64 {
        (self.horizon - self.elapsed).max(0.0)
    }

    /// Wall clock shown on the HUD, e.g. `"4:30 AM"`.
    pub fn format_clock(&self) -> String {
        format_clock(self.elapsed, self.horizon, self.start_hour, self.end_hour)
    }

    /// Sun light intensity between `night` and `day` for the current time.
    pub fn daylight(&self, night: f64, day: f64) -> f64 {
        lerp(night, day, self.progress())
    }
}

/// Maps elapsed night time onto an `H:MM AM` clock.
///
/// The hour is interpolated linearly from `start_hour` to `end_hour`;
/// minutes are the floored fractional hour.
pub fn format_clock(elapsed: f64, horizon: f64, start_hour: f64, end_hour: f64) -> String {
    let t = if horizon > 0.0 {
        (elapsed / horizon).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let hour = lerp(start_hour, end_hour, t);
    let whole = hour.floor();
    let minutes = ((hour - whole) * 60.0).floor() as u32;
    format!("{}:{:02} AM", whole as u32, minutes.min(59))
}
