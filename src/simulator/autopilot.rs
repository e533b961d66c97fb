//! A scripted player for simulated nights.
//!
//! Reads the simulation through its public accessors only and acts through
//! the same commands and tick input the terminal front end uses.

use super::config::AutopilotPolicy;
use crate::core::simulation::Simulation;
use crate::core::tick::{NightEvent, TickInput};
use crate::exploration::command::Command;
use crate::exploration::outcomes::predator_win_chance;
use crate::exploration::types::ExplorationPhase;
use rand::Rng;

pub struct Autopilot<R: Rng> {
    policy: AutopilotPolicy,
    rng: R,
    /// Decided to answer the whisper currently playing.
    answering: bool,
}

impl<R: Rng> Autopilot<R> {
    pub fn new(policy: AutopilotPolicy, rng: R) -> Self {
        Self {
            policy,
            rng,
            answering: false,
        }
    }

    /// Takes note of what just happened.
    pub fn observe(&mut self, events: &[NightEvent]) {
        for event in events {
            match event {
                NightEvent::WhisperTriggered { .. } => {
                    let accuracy = if self.policy.whistle_accuracy.is_nan() {
                        0.0
                    } else {
                        self.policy.whistle_accuracy.clamp(0.0, 1.0)
                    };
                    self.answering = self.rng.gen_bool(accuracy);
                }
                NightEvent::WhistleSuccess { .. } | NightEvent::WhisperMissed { .. } => {
                    self.answering = false;
                }
                _ => {}
            }
        }
    }

    /// Input for the coming tick.
    pub fn input<S: Rng>(&mut self, sim: &Simulation<S>) -> TickInput {
        if !self.answering {
            return TickInput::default();
        }
        let whisper = sim.whisper();
        match whisper.reaction_remaining() {
            Some(remaining) if whisper.reaction_time - remaining >= self.policy.whistle_latency => {
                TickInput::whistle()
            }
            Some(_) => TickInput::default(),
            None => {
                self.answering = false;
                TickInput::default()
            }
        }
    }

    /// The command to issue before the coming tick, if any.
    pub fn decide<S: Rng>(&self, sim: &Simulation<S>) -> Option<Command> {
        if sim.is_over() {
            return None;
        }
        let stats = sim.stats();
        let policy = &self.policy;

        let Some(expedition) = sim.expedition() else {
            let wants_out =
                stats.fire() < policy.fire_threshold || stats.hunger() < policy.hunger_threshold;
            let can_go = !policy.stay_at_camp
                && sim.explore_cooldown() <= 0.0
                && stats.sanity() >= policy.min_sanity_to_explore;
            return (wants_out && can_go).then_some(Command::OpenMenu);
        };

        match expedition.phase {
            ExplorationPhase::MenuOpen => {
                let cost = expedition.cost;
                if f64::from(cost.sanity) >= stats.sanity()
                    || f64::from(cost.hunger) >= stats.hunger()
                {
                    return Some(Command::CloseMenu);
                }
                let fire_gap = stats.fire() - policy.fire_threshold;
                let hunger_gap = stats.hunger() - policy.hunger_threshold;
                if fire_gap <= hunger_gap {
                    Some(Command::CommitWood)
                } else {
                    Some(Command::CommitFood)
                }
            }
            ExplorationPhase::Searching(_) => None,
            ExplorationPhase::PredatorEncounter => {
                let cost = expedition.predator?;
                let sanity = (stats.sanity() - f64::from(cost.fight_sanity)).max(0.0);
                let hunger = (stats.hunger() - f64::from(cost.fight_hunger)).max(0.0);
                // Fighting to zero sanity loses the night even on a win.
                if sanity > 0.0 && predator_win_chance(sanity, hunger) >= policy.fight_threshold {
                    Some(Command::Fight)
                } else {
                    Some(Command::Run)
                }
            }
            _ => Some(Command::Return),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::survival::resources::Stat;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pilot(policy: AutopilotPolicy) -> Autopilot<ChaCha8Rng> {
        Autopilot::new(policy, ChaCha8Rng::seed_from_u64(0))
    }

    #[test]
    fn test_stays_put_when_comfortable() {
        let sim = Simulation::seeded(SurvivalConfig::default(), 1);
        assert_eq!(pilot(AutopilotPolicy::default()).decide(&sim), None);
    }

    #[test]
    fn test_goes_for_wood_when_fire_low() {
        let mut sim = Simulation::seeded(SurvivalConfig::default(), 1);
        sim.adjust(Stat::Fire, -60.0);
        let pilot = pilot(AutopilotPolicy::default());

        assert_eq!(pilot.decide(&sim), Some(Command::OpenMenu));
        Command::OpenMenu.apply(&mut sim).unwrap();
        assert_eq!(pilot.decide(&sim), Some(Command::CommitWood));
    }

    #[test]
    fn test_homebody_never_leaves() {
        let mut sim = Simulation::seeded(SurvivalConfig::default(), 1);
        sim.adjust(Stat::Fire, -90.0);
        assert_eq!(pilot(AutopilotPolicy::homebody()).decide(&sim), None);
    }

    #[test]
    fn test_perfect_ears_whistle_immediately() {
        let config = SurvivalConfig {
            whisper_min_delay: 1.0,
            whisper_max_delay: 1.0,
            ..SurvivalConfig::without_decay()
        };
        let mut sim = Simulation::seeded(config, 1);
        let mut pilot = pilot(AutopilotPolicy::perfect_ears());

        let result = sim.tick(1.0, TickInput::default());
        pilot.observe(&result.events);
        assert!(sim.whisper().is_active());

        let input = pilot.input(&sim);
        assert!(input.whistle);
        let result = sim.tick(0.1, input);
        assert!(matches!(
            result.events.as_slice(),
            [NightEvent::WhistleSuccess { .. }]
        ));
    }

    #[test]
    fn test_nan_accuracy_never_whistles() {
        let config = SurvivalConfig {
            whisper_min_delay: 1.0,
            whisper_max_delay: 1.0,
            ..SurvivalConfig::without_decay()
        };
        let mut sim = Simulation::seeded(config, 1);
        let mut pilot = pilot(AutopilotPolicy {
            whistle_accuracy: f64::NAN,
            ..Default::default()
        });
        let result = sim.tick(1.0, TickInput::default());
        pilot.observe(&result.events);
        assert!(!pilot.input(&sim).whistle);
    }

    #[test]
    fn test_deaf_pilot_never_whistles() {
        let config = SurvivalConfig {
            whisper_min_delay: 1.0,
            whisper_max_delay: 1.0,
            ..SurvivalConfig::without_decay()
        };
        let mut sim = Simulation::seeded(config, 1);
        let mut pilot = pilot(AutopilotPolicy {
            whistle_accuracy: 0.0,
            ..Default::default()
        });
        let result = sim.tick(1.0, TickInput::default());
        pilot.observe(&result.events);
        assert!(!pilot.input(&sim).whistle);
    }
}
