//! Survival resources and the night clock.
//!
//! The two leaf models everything else in the simulation mutates: the
//! player's clamped stats and the countdown to sunrise.

pub mod clock;
pub mod resources;

pub use clock::{format_clock, lerp, NightClock};
pub use resources::{DecayRates, Stat, SurvivalStats};
