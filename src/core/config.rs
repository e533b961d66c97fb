//! Night configuration with documented tunables.
//!
//! Every balance number the simulation uses lives here. Defaults come from
//! [`crate::core::constants`]; a TOML file may override any subset of them.

use crate::core::constants::*;
use crate::core::error::ConfigError;
use crate::survival::resources::DecayRates;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a single night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    // === DECAY ===
    /// Sanity lost per second at camp, before regeneration.
    pub sanity_decay: f64,
    /// Hunger lost per second at camp.
    pub hunger_decay: f64,
    /// Fire lost per second at camp.
    pub fire_decay: f64,
    /// Sanity regained per second by the fire.
    ///
    /// At the default rates this outpaces sanity decay, so sanity at camp
    /// only falls through whispers and expeditions.
    pub sanity_regen: f64,

    // === CLOCK ===
    /// Seconds of camp time until sunrise.
    pub sunrise_seconds: f64,
    pub clock_start_hour: f64,
    pub clock_end_hour: f64,
    /// Sun light intensity at the start of the night.
    pub night_light: f64,
    /// Sun light intensity at sunrise.
    pub day_light: f64,

    // === EXPLORATION ===
    /// Smallest cost rolled for each of time, sanity and hunger.
    pub explore_cost_min: u32,
    /// Largest cost rolled (inclusive).
    pub explore_cost_max: u32,
    /// Seconds between committing to a search and learning its result.
    pub search_delay: f64,
    /// Seconds before the explore menu can be opened again.
    pub explore_cooldown: f64,

    // === WHISPERS ===
    pub whisper_min_delay: f64,
    pub whisper_max_delay: f64,
    /// Seconds the player has to whistle back once a whisper starts.
    pub reaction_time: f64,
    pub whisper_penalty: f64,
    pub whistle_reward: f64,
    /// Number of distinct whisper voices the audio layer can choose from.
    pub whisper_voices: u32,

    // === HINT ===
    /// Sanity below which the whistle hint is shown (once per night).
    pub hint_sanity_threshold: f64,
    pub hint_duration: f64,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            sanity_decay: SANITY_DECAY_PER_SECOND,
            hunger_decay: HUNGER_DECAY_PER_SECOND,
            fire_decay: FIRE_DECAY_PER_SECOND,
            sanity_regen: SANITY_REGEN_PER_SECOND,
            sunrise_seconds: SUNRISE_SECONDS,
            clock_start_hour: CLOCK_START_HOUR,
            clock_end_hour: CLOCK_END_HOUR,
            night_light: NIGHT_LIGHT_INTENSITY,
            day_light: DAY_LIGHT_INTENSITY,
            explore_cost_min: EXPLORE_COST_MIN,
            explore_cost_max: EXPLORE_COST_MAX,
            search_delay: SEARCH_DELAY_SECONDS,
            explore_cooldown: EXPLORE_COOLDOWN_SECONDS,
            whisper_min_delay: WHISPER_MIN_DELAY_SECONDS,
            whisper_max_delay: WHISPER_MAX_DELAY_SECONDS,
            reaction_time: WHISPER_REACTION_SECONDS,
            whisper_penalty: WHISPER_SANITY_PENALTY,
            whistle_reward: WHISTLE_SANITY_REWARD,
            whisper_voices: WHISPER_VOICES,
            hint_sanity_threshold: HINT_SANITY_THRESHOLD,
            hint_duration: HINT_DURATION_SECONDS,
        }
    }
}

impl SurvivalConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SurvivalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// A night with no decay at all, handy for isolating other systems.
    pub fn without_decay() -> Self {
        Self {
            sanity_decay: 0.0,
            hunger_decay: 0.0,
            fire_decay: 0.0,
            sanity_regen: 0.0,
            ..Default::default()
        }
    }

    pub fn decay_rates(&self) -> DecayRates {
        DecayRates {
            sanity: self.sanity_decay,
            hunger: self.hunger_decay,
            fire: self.fire_decay,
            sanity_regen: self.sanity_regen,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // TOML accepts `inf` and `nan`; neither means anything for a night.
        let numbers = [
            ("sanity_decay", self.sanity_decay),
            ("hunger_decay", self.hunger_decay),
            ("fire_decay", self.fire_decay),
            ("sanity_regen", self.sanity_regen),
            ("sunrise_seconds", self.sunrise_seconds),
            ("clock_start_hour", self.clock_start_hour),
            ("clock_end_hour", self.clock_end_hour),
            ("night_light", self.night_light),
            ("day_light", self.day_light),
            ("search_delay", self.search_delay),
            ("explore_cooldown", self.explore_cooldown),
            ("whisper_min_delay", self.whisper_min_delay),
            ("whisper_max_delay", self.whisper_max_delay),
            ("reaction_time", self.reaction_time),
            ("whisper_penalty", self.whisper_penalty),
            ("whistle_reward", self.whistle_reward),
            ("hint_sanity_threshold", self.hint_sanity_threshold),
            ("hint_duration", self.hint_duration),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        let rates = [
            ("sanity_decay", self.sanity_decay),
            ("hunger_decay", self.hunger_decay),
            ("fire_decay", self.fire_decay),
            ("sanity_regen", self.sanity_regen),
            ("search_delay", self.search_delay),
            ("explore_cooldown", self.explore_cooldown),
            ("whisper_penalty", self.whisper_penalty),
            ("whistle_reward", self.whistle_reward),
            ("hint_duration", self.hint_duration),
        ];
        for (name, value) in rates {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.sunrise_seconds <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sunrise_seconds must be positive, got {}",
                self.sunrise_seconds
            )));
        }
        if self.clock_end_hour < self.clock_start_hour {
            return Err(ConfigError::Invalid(format!(
                "clock runs backwards: {} -> {}",
                self.clock_start_hour, self.clock_end_hour
            )));
        }
        if self.explore_cost_min > self.explore_cost_max {
            return Err(ConfigError::Invalid(format!(
                "explore cost range is empty: {}..={}",
                self.explore_cost_min, self.explore_cost_max
            )));
        }
        if self.whisper_min_delay < 0.0 || self.whisper_min_delay > self.whisper_max_delay {
            return Err(ConfigError::Invalid(format!(
                "whisper delay range is invalid: {}..={}",
                self.whisper_min_delay, self.whisper_max_delay
            )));
        }
        if self.reaction_time <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reaction_time must be positive, got {}",
                self.reaction_time
            )));
        }
        if self.whisper_voices == 0 {
            return Err(ConfigError::Invalid(
                "whisper_voices must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
