//! Whisper reaction game data structures.

use crate::core::config::SurvivalConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where the whisper cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WhisperState {
    /// Counting up toward the next whisper.
    Idle { waited: f64, delay: f64 },
    /// A whisper is playing; the player has until the reaction budget
    /// runs out to whistle back.
    Active { elapsed: f64 },
}

/// The hallucination whisper / whistle response mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhisperSystem {
    pub(crate) state: WhisperState,
    pub min_delay: f64,
    pub max_delay: f64,
    /// Seconds allowed to answer an active whisper.
    pub reaction_time: f64,
    pub penalty: f64,
    pub reward: f64,
    pub voices: u32,
}

impl WhisperSystem {
    /// Starts idle with a freshly drawn delay.
    pub fn new<R: Rng>(config: &SurvivalConfig, rng: &mut R) -> Self {
        let mut system = Self {
            state: WhisperState::Idle {
                waited: 0.0,
                delay: config.whisper_min_delay,
            },
            min_delay: config.whisper_min_delay,
            max_delay: config.whisper_max_delay,
            reaction_time: config.reaction_time,
            penalty: config.whisper_penalty,
            reward: config.whistle_reward,
            voices: config.whisper_voices.max(1),
        };
        system.go_idle(rng);
        system
    }

    pub fn state(&self) -> WhisperState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, WhisperState::Active { .. })
    }

    /// Seconds left to answer the current whisper, if one is playing.
    pub fn reaction_remaining(&self) -> Option<f64> {
        match self.state {
            WhisperState::Active { elapsed } => Some((self.reaction_time - elapsed).max(0.0)),
            WhisperState::Idle { .. } => None,
        }
    }

    /// Draws a delay uniformly from `[min_delay, max_delay]`.
    pub(crate) fn draw_delay<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.min_delay >= self.max_delay {
            self.min_delay
        } else {
            rng.gen_range(self.min_delay..=self.max_delay)
        }
    }

    pub(crate) fn go_idle<R: Rng>(&mut self, rng: &mut R) {
        self.state = WhisperState::Idle {
            waited: 0.0,
            delay: self.draw_delay(rng),
        };
    }
}
