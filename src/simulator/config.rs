//! Simulation configuration.

use crate::core::config::SurvivalConfig;

/// How the scripted player behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct AutopilotPolicy {
    /// Chance of whistling back at any given whisper.
    pub whistle_accuracy: f64,

    /// Seconds between a whisper starting and the whistle.
    pub whistle_latency: f64,

    /// Go for wood when fire drops below this.
    pub fire_threshold: f64,

    /// Go for food when hunger drops below this.
    pub hunger_threshold: f64,

    /// Stay by the fire while sanity is below this.
    pub min_sanity_to_explore: f64,

    /// Fight a predator when the post-cost win chance is at least this,
    /// otherwise run.
    pub fight_threshold: f64,

    /// Never leave the fire at all.
    pub stay_at_camp: bool,
}

impl Default for AutopilotPolicy {
    fn default() -> Self {
        Self {
            whistle_accuracy: 0.85,
            whistle_latency: 1.2,
            fire_threshold: 55.0,
            hunger_threshold: 55.0,
            min_sanity_to_explore: 25.0,
            fight_threshold: 60.0,
            stay_at_camp: false,
        }
    }
}

impl AutopilotPolicy {
    /// Answers every whisper instantly.
    pub fn perfect_ears() -> Self {
        Self {
            whistle_accuracy: 1.0,
            whistle_latency: 0.0,
            ..Default::default()
        }
    }

    /// Sits by the fire and never explores.
    pub fn homebody() -> Self {
        Self {
            stay_at_camp: true,
            ..Default::default()
        }
    }

    /// Checks the whistle settings the command line can set.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.whistle_accuracy) {
            return Err(format!(
                "--accuracy must be between 0 and 1, got {}",
                self.whistle_accuracy
            ));
        }
        if !(self.whistle_latency.is_finite() && self.whistle_latency >= 0.0) {
            return Err(format!(
                "--latency must be a non-negative number of seconds, got {}",
                self.whistle_latency
            ));
        }
        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of nights to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Seconds per simulated tick
    pub dt: f64,

    /// Ticks per night before giving up on it
    pub max_ticks_per_run: u64,

    /// Night tunables
    pub survival: SurvivalConfig,

    /// Scripted player
    pub policy: AutopilotPolicy,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per night)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            dt: 0.1,
            max_ticks_per_run: 100_000,
            survival: SurvivalConfig::default(),
            policy: AutopilotPolicy::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A small reproducible batch for quick balance checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }
}
