//! Game logic for the whisper reaction game.

use super::types::{WhisperState, WhisperSystem};
use crate::core::tick::NightEvent;
use crate::survival::resources::{Stat, SurvivalStats};
use rand::Rng;

impl WhisperSystem {
    /// Handles a whistle press.
    ///
    /// During a whisper it restores sanity and ends the whisper; otherwise
    /// it is just a whistle.
    pub fn whistle<R: Rng>(&mut self, stats: &mut SurvivalStats, rng: &mut R) -> NightEvent {
        match self.state {
            WhisperState::Active { .. } => {
                let gained = stats.adjust(Stat::Sanity, self.reward);
                self.go_idle(rng);
                tracing::debug!(sanity_gained = gained, "whistled back at a whisper");
                NightEvent::WhistleSuccess {
                    sanity_gained: gained,
                }
            }
            WhisperState::Idle { .. } => NightEvent::Whistle,
        }
    }

    /// Advances the whisper cycle by `dt` seconds.
    ///
    /// A whistle pressed this tick is handled before any timer moves.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        whistle: bool,
        stats: &mut SurvivalStats,
        rng: &mut R,
    ) -> Vec<NightEvent> {
        let mut events = Vec::new();

        if whistle {
            let event = self.whistle(stats, rng);
            let answered = matches!(event, NightEvent::WhistleSuccess { .. });
            events.push(event);
            if answered {
                return events;
            }
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.state {
            WhisperState::Idle { waited, delay } => {
                let waited = waited + dt;
                if waited >= delay {
                    let voice = rng.gen_range(0..self.voices);
                    self.state = WhisperState::Active { elapsed: 0.0 };
                    tracing::debug!(voice, "whisper started");
                    events.push(NightEvent::WhisperTriggered { voice });
                } else {
                    self.state = WhisperState::Idle { waited, delay };
                }
            }
            WhisperState::Active { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.reaction_time {
                    let lost = -stats.adjust(Stat::Sanity, -self.penalty);
                    self.go_idle(rng);
                    tracing::debug!(sanity_lost = lost, "whisper went unanswered");
                    events.push(NightEvent::WhisperMissed { sanity_lost: lost });
                } else {
                    self.state = WhisperState::Active { elapsed };
                }
            }
        }

        events
    }
}
