//! The per-tick driver of a night at camp.
//!
//! [`Simulation::tick`] advances the clock, decays stats, decides the run
//! and runs the whisper game. It returns a [`TickResult`] describing what
//! happened so the presentation layer can react without the simulation
//! knowing anything about it.

use crate::core::simulation::{Deferred, RunState, Simulation};
use crate::exploration::types::{
    ExplorationCost, FoodFind, PredatorCost, PredatorFight, SearchKind, WoodFind,
};
use crate::survival::resources::Stat;
use rand::Rng;

/// Player input sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// The whistle key went down since the previous tick.
    pub whistle: bool,
}

impl TickInput {
    pub fn whistle() -> Self {
        Self { whistle: true }
    }
}

/// Something that happened during a tick or a command.
///
/// The presentation layer maps these to log lines, sounds and scene
/// changes. Nothing here refers to presentation types.
#[derive(Debug, Clone, PartialEq)]
pub enum NightEvent {
    // ── Exploration ─────────────────────────────────────────────
    /// The explore menu opened with freshly rolled costs.
    ExploreMenuOpened { cost: ExplorationCost },

    /// The player backed out of the explore menu without paying.
    ExploreMenuClosed,

    /// Costs were paid and the search is under way.
    SearchStarted {
        kind: SearchKind,
        cost: ExplorationCost,
    },

    /// A wood search resolved.
    WoodFound { find: WoodFind, fire_gained: f64 },

    /// A food search resolved without a predator.
    FoodFound { find: FoodFind, hunger_gained: f64 },

    /// A predator blocks the way back.
    PredatorEncountered { cost: PredatorCost },

    /// The player fought the predator.
    PredatorFought {
        fight: PredatorFight,
        hunger_gained: f64,
    },

    /// The player is back by the fire.
    ReturnedToCamp {
        time_cost: u32,
        sanity_cost: u32,
        fled: bool,
    },

    // ── Whispers ────────────────────────────────────────────────
    /// A hallucinated whisper started playing.
    WhisperTriggered { voice: u32 },

    /// The player whistled back in time.
    WhistleSuccess { sanity_gained: f64 },

    /// A whistle with no whisper to answer.
    Whistle,

    /// The reaction window ran out.
    WhisperMissed { sanity_lost: f64 },

    // ── Hint ────────────────────────────────────────────────────
    WhistleHintShown,
    WhistleHintHidden,

    // ── Run end ─────────────────────────────────────────────────
    /// Sunrise reached.
    NightWon,

    /// A stat ran out.
    NightLost { cause: Stat },
}

/// Everything the display needs to draw the camp for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub sanity: f64,
    pub hunger: f64,
    pub fire: f64,
    /// `H:MM AM` wall clock.
    pub clock: String,
    /// Fraction of the night that has passed.
    pub progress: f64,
    pub seconds_until_sunrise: f64,
    /// Sun light intensity for the sky.
    pub daylight: f64,
    /// Fire as a 0.0 - 1.0 fraction; drives flame size and glow.
    pub fire_glow: f64,
    /// 0.0 when fully sane, 1.0 at zero sanity; drives the hallucination
    /// overlay.
    pub distortion: f64,
    pub hint_visible: bool,
}

/// What the display should be told this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayUpdate {
    /// A full refresh while at camp.
    Frame(DisplayFrame),
    /// Away from camp only the sanity percentage is forwarded.
    SanityOnly(f64),
}

/// Result of processing a single tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<NightEvent>,
    /// `None` once the run is over.
    pub display: Option<DisplayUpdate>,
}

impl TickResult {
    pub fn won(&self) -> bool {
        self.events.iter().any(|e| matches!(e, NightEvent::NightWon))
    }

    pub fn lost(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, NightEvent::NightLost { .. }))
    }
}

impl<R: Rng> Simulation<R> {
    /// Processes `dt` seconds of the night.
    ///
    /// Order at camp: clock, decay, loss, win, hint, display, whispers.
    /// Away from camp only pending continuations run and sanity telemetry
    /// is forwarded. Once the run is over this does nothing.
    pub fn tick(&mut self, dt: f64, input: TickInput) -> TickResult {
        let mut result = TickResult::default();
        if self.run_state.is_terminal() {
            return result;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.explore_cooldown = (self.explore_cooldown - dt).max(0.0);
        for action in self.schedule.advance(dt) {
            match action {
                Deferred::ResolveSearch(kind) => {
                    let events = self.resolve_search(kind);
                    result.events.extend(events);
                }
                Deferred::HideWhistleHint => {
                    self.hint_visible = false;
                    result.events.push(NightEvent::WhistleHintHidden);
                }
            }
        }

        if self.run_state.is_exploring() {
            result.display = Some(DisplayUpdate::SanityOnly(self.stats.sanity_percent()));
            return result;
        }

        // A stat emptied between ticks is fatal before the fire can restore it.
        if let Some(cause) = self.stats.depleted_stat() {
            self.lose(cause, &mut result);
            return result;
        }

        self.clock.advance(dt);
        self.stats.apply_decay(dt, true, &self.rates);

        if let Some(cause) = self.stats.depleted_stat() {
            self.lose(cause, &mut result);
            return result;
        }

        if self.clock.has_reached_horizon() {
            self.run_state = RunState::Won;
            tracing::info!(
                elapsed = self.clock.elapsed(),
                sanity = self.stats.sanity(),
                hunger = self.stats.hunger(),
                fire = self.stats.fire(),
                "survived until sunrise"
            );
            result.events.push(NightEvent::NightWon);
            result.display = Some(DisplayUpdate::Frame(self.display_frame()));
            return result;
        }

        if !self.hint_shown && self.stats.sanity() < self.config.hint_sanity_threshold {
            self.hint_shown = true;
            self.hint_visible = true;
            self.schedule
                .after(self.config.hint_duration, Deferred::HideWhistleHint);
            result.events.push(NightEvent::WhistleHintShown);
        }

        result.display = Some(DisplayUpdate::Frame(self.display_frame()));

        let events = self
            .whisper
            .tick(dt, input.whistle, &mut self.stats, &mut self.rng);
        result.events.extend(events);

        result
    }

    fn lose(&mut self, cause: Stat, result: &mut TickResult) {
        self.run_state = RunState::Lost;
        tracing::info!(
            cause = cause.name(),
            elapsed = self.clock.elapsed(),
            "the night claimed another"
        );
        result.events.push(NightEvent::NightLost { cause });
        result.display = Some(DisplayUpdate::Frame(self.display_frame()));
    }

    /// Derived values for the display, computed from current state.
    pub fn display_frame(&self) -> DisplayFrame {
        DisplayFrame {
            sanity: self.stats.sanity(),
            hunger: self.stats.hunger(),
            fire: self.stats.fire(),
            clock: self.clock.format_clock(),
            progress: self.clock.progress(),
            seconds_until_sunrise: self.clock.seconds_until_sunrise(),
            daylight: self
                .clock
                .daylight(self.config.night_light, self.config.day_light),
            fire_glow: self.stats.fire() / 100.0,
            distortion: 1.0 - self.stats.sanity_percent(),
            hint_visible: self.hint_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;

    fn quiet_config() -> SurvivalConfig {
        SurvivalConfig {
            whisper_min_delay: 1_000.0,
            whisper_max_delay: 1_000.0,
            ..SurvivalConfig::without_decay()
        }
    }

    #[test]
    fn test_tick_advances_clock_at_camp() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        let result = sim.tick(0.5, TickInput::default());
        assert_eq!(sim.clock().elapsed(), 0.5);
        assert!(matches!(result.display, Some(DisplayUpdate::Frame(_))));
    }

    #[test]
    fn test_tick_applies_decay() {
        let config = SurvivalConfig {
            whisper_min_delay: 1_000.0,
            whisper_max_delay: 1_000.0,
            ..Default::default()
        };
        let mut sim = Simulation::seeded(config, 1);
        sim.adjust(Stat::Sanity, -50.0);
        sim.tick(10.0, TickInput::default());
        let stats = sim.stats();
        assert!((stats.sanity() - 58.2).abs() < 1e-9);
        assert!((stats.hunger() - 96.8).abs() < 1e-9);
        assert!((stats.fire() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.tick(-5.0, TickInput::default());
        sim.tick(f64::NAN, TickInput::default());
        assert_eq!(sim.clock().elapsed(), 0.0);
    }

    #[test]
    fn test_loss_checked_before_win() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.adjust(Stat::Fire, -100.0);
        let result = sim.tick(500.0, TickInput::default());
        assert!(result.lost());
        assert!(!result.won());
        assert_eq!(*sim.run_state(), RunState::Lost);
    }

    #[test]
    fn test_hint_shown_once_then_hidden() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.adjust(Stat::Sanity, -40.0);

        let first = sim.tick(0.1, TickInput::default());
        assert!(first.events.contains(&NightEvent::WhistleHintShown));
        assert!(sim.display_frame().hint_visible);

        let second = sim.tick(0.1, TickInput::default());
        assert!(!second.events.contains(&NightEvent::WhistleHintShown));

        let later = sim.tick(7.0, TickInput::default());
        assert!(later.events.contains(&NightEvent::WhistleHintHidden));
        assert!(!sim.display_frame().hint_visible);

        sim.adjust(Stat::Sanity, 50.0);
        sim.adjust(Stat::Sanity, -50.0);
        let again = sim.tick(0.1, TickInput::default());
        assert!(!again.events.contains(&NightEvent::WhistleHintShown));
    }

    #[test]
    fn test_display_frame_derivations() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.adjust(Stat::Sanity, -25.0);
        sim.adjust(Stat::Fire, -60.0);
        sim.tick(50.0, TickInput::default());

        let frame = sim.display_frame();
        assert_eq!(frame.clock, "4:30 AM");
        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.seconds_until_sunrise, 50.0);
        assert!((frame.fire_glow - 0.4).abs() < 1e-9);
        assert!((frame.distortion - 0.25).abs() < 1e-9);
    }
}
