//! The simulation instance that owns one night.

use crate::core::config::SurvivalConfig;
use crate::core::schedule::Schedule;
use crate::exploration::outcomes::FailureStreak;
use crate::exploration::types::{Expedition, SearchKind};
use crate::survival::clock::NightClock;
use crate::survival::resources::{DecayRates, Stat, SurvivalStats};
use crate::whisper::WhisperSystem;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where the run stands. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunState {
    /// By the fire: time flows, stats decay, whispers happen.
    AtCamp,
    /// Away from the fire. Decay, the clock and whispers are suspended.
    Exploring(Expedition),
    /// Sunrise reached.
    Won,
    /// A stat ran out.
    Lost,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Won | RunState::Lost)
    }

    pub fn is_exploring(&self) -> bool {
        matches!(self, RunState::Exploring(_))
    }

    pub fn expedition(&self) -> Option<&Expedition> {
        match self {
            RunState::Exploring(expedition) => Some(expedition),
            _ => None,
        }
    }
}

/// Continuations queued on the tick schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    ResolveSearch(SearchKind),
    HideWhistleHint,
}

/// A single night at camp.
///
/// Owns every piece of mutable state plus the random source, so a night
/// built from the same seed and driven with the same ticks and commands
/// always plays out the same way.
pub struct Simulation<R: Rng = ChaCha8Rng> {
    pub(crate) config: SurvivalConfig,
    pub(crate) rates: DecayRates,
    pub(crate) stats: SurvivalStats,
    pub(crate) clock: NightClock,
    pub(crate) run_state: RunState,
    pub(crate) streak: FailureStreak,
    pub(crate) whisper: WhisperSystem,
    pub(crate) schedule: Schedule<Deferred>,
    /// Seconds until the explore menu may open again.
    pub(crate) explore_cooldown: f64,
    pub(crate) hint_shown: bool,
    pub(crate) hint_visible: bool,
    pub(crate) rng: R,
}

impl Simulation<ChaCha8Rng> {
    /// A night seeded from OS entropy.
    pub fn new(config: SurvivalConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// A reproducible night.
    pub fn seeded(config: SurvivalConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// A night drawing every random number from `rng`.
    pub fn with_rng(config: SurvivalConfig, mut rng: R) -> Self {
        let whisper = WhisperSystem::new(&config, &mut rng);
        let clock = NightClock::new(
            config.sunrise_seconds,
            config.clock_start_hour,
            config.clock_end_hour,
        );
        tracing::debug!(
            sunrise = config.sunrise_seconds,
            "night begins at {}",
            clock.format_clock()
        );
        Self {
            rates: config.decay_rates(),
            config,
            stats: SurvivalStats::new(),
            clock,
            run_state: RunState::AtCamp,
            streak: FailureStreak::new(),
            whisper,
            schedule: Schedule::new(),
            explore_cooldown: 0.0,
            hint_shown: false,
            hint_visible: false,
            rng,
        }
    }

    pub fn config(&self) -> &SurvivalConfig {
        &self.config
    }

    pub fn stats(&self) -> &SurvivalStats {
        &self.stats
    }

    pub fn clock(&self) -> &NightClock {
        &self.clock
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn expedition(&self) -> Option<&Expedition> {
        self.run_state.expedition()
    }

    pub fn failure_streak(&self) -> FailureStreak {
        self.streak
    }

    pub fn whisper(&self) -> &WhisperSystem {
        &self.whisper
    }

    pub fn is_exploring(&self) -> bool {
        self.run_state.is_exploring()
    }

    pub fn is_over(&self) -> bool {
        self.run_state.is_terminal()
    }

    /// Seconds until the explore menu can be opened again.
    pub fn explore_cooldown(&self) -> f64 {
        self.explore_cooldown
    }

    /// True while a committed search is waiting to resolve.
    pub fn search_pending(&self) -> bool {
        self.schedule
            .contains(|a| matches!(a, Deferred::ResolveSearch(_)))
    }

    /// Seconds until the committed search resolves, if one is under way.
    pub fn search_remaining(&self) -> Option<f64> {
        self.schedule
            .time_until(|a| matches!(a, Deferred::ResolveSearch(_)))
    }

    /// Directly nudges a stat, clamped. Returns the change that landed.
    ///
    /// Loss is only decided by the next camp tick.
    pub fn adjust(&mut self, stat: Stat, delta: f64) -> f64 {
        self.stats.adjust(stat, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tick::TickInput;

    #[test]
    fn test_new_night_starts_at_camp() {
        let sim = Simulation::seeded(SurvivalConfig::default(), 0);
        assert_eq!(*sim.run_state(), RunState::AtCamp);
        assert_eq!(*sim.stats(), SurvivalStats::new());
        assert_eq!(sim.clock().elapsed(), 0.0);
        assert_eq!(sim.failure_streak().count(), 0);
        assert!(!sim.is_exploring());
        assert!(!sim.is_over());
        assert!(!sim.search_pending());
        assert_eq!(sim.search_remaining(), None);
    }

    #[test]
    fn test_same_seed_same_night() {
        let mut a = Simulation::seeded(SurvivalConfig::default(), 99);
        let mut b = Simulation::seeded(SurvivalConfig::default(), 99);
        for i in 0..600 {
            let input = TickInput {
                whistle: i % 37 == 0,
            };
            let ra = a.tick(0.1, input);
            let rb = b.tick(0.1, input);
            assert_eq!(ra.events, rb.events);
        }
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_run_state_helpers() {
        assert!(RunState::Won.is_terminal());
        assert!(RunState::Lost.is_terminal());
        assert!(!RunState::AtCamp.is_terminal());
        assert!(RunState::AtCamp.expedition().is_none());
    }
}
