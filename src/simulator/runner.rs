//! Plays simulated nights with the autopilot and tallies what happened.
//!
//! Statistics are tracked outside the simulation from the events its ticks
//! and commands return, the same events the terminal front end consumes.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::simulation::{RunState, Simulation};
use crate::core::tick::NightEvent;
use crate::exploration::types::{FoodFind, SearchKind, WoodFind};
use crate::survival::resources::Stat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Keeps the autopilot's random stream apart from the night's.
const POLICY_SEED_SALT: u64 = 0x5eed_cafe;

/// How a single night ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightOutcome {
    Survived,
    Lost(Stat),
    /// Ran out of ticks before the night was decided.
    TimedOut,
}

/// Everything recorded about one night.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub outcome: Option<NightOutcome>,
    pub ticks: u64,
    /// Clock seconds when the night ended.
    pub elapsed: f64,
    pub final_sanity: f64,
    pub final_hunger: f64,
    pub final_fire: f64,

    pub wood_trips: u32,
    pub food_trips: u32,
    pub sticks: u32,
    pub logs: u32,
    pub empty_wood: u32,
    pub berries: u32,
    pub rabbits: u32,
    pub empty_food: u32,
    pub dead_rolls: u32,

    pub predators: u32,
    pub fights: u32,
    pub fights_won: u32,
    pub escapes: u32,

    pub whispers: u32,
    pub whistled_back: u32,
    pub whispers_missed: u32,
}

impl RunStats {
    pub fn survived(&self) -> bool {
        self.outcome == Some(NightOutcome::Survived)
    }

    /// Folds events into the tally.
    fn record(&mut self, events: &[NightEvent]) {
        for event in events {
            match event {
                NightEvent::SearchStarted { kind, .. } => match kind {
                    SearchKind::Wood => self.wood_trips += 1,
                    SearchKind::Food => self.food_trips += 1,
                },
                NightEvent::WoodFound { find, .. } => match find {
                    WoodFind::Nothing => self.empty_wood += 1,
                    WoodFind::Stick => self.sticks += 1,
                    WoodFind::Log => self.logs += 1,
                },
                NightEvent::FoodFound { find, .. } => match find {
                    FoodFind::Berries => self.berries += 1,
                    FoodFind::Rabbit => self.rabbits += 1,
                    FoodFind::DeadRoll => self.dead_rolls += 1,
                    FoodFind::Nothing | FoodFind::Predator => self.empty_food += 1,
                },
                NightEvent::PredatorEncountered { .. } => self.predators += 1,
                NightEvent::PredatorFought { fight, .. } => {
                    self.fights += 1;
                    if fight.won {
                        self.fights_won += 1;
                    }
                }
                NightEvent::ReturnedToCamp { fled: true, .. } => self.escapes += 1,
                NightEvent::WhisperTriggered { .. } => self.whispers += 1,
                NightEvent::WhistleSuccess { .. } => self.whistled_back += 1,
                NightEvent::WhisperMissed { .. } => self.whispers_missed += 1,
                NightEvent::NightWon => self.outcome = Some(NightOutcome::Survived),
                NightEvent::NightLost { cause } => self.outcome = Some(NightOutcome::Lost(*cause)),
                _ => {}
            }
        }
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let (night_rng, policy_rng) = match config.seed {
            Some(seed) => {
                let seed = seed.wrapping_add(u64::from(run_idx));
                (
                    ChaCha8Rng::seed_from_u64(seed),
                    ChaCha8Rng::seed_from_u64(seed ^ POLICY_SEED_SALT),
                )
            }
            None => (ChaCha8Rng::from_entropy(), ChaCha8Rng::from_entropy()),
        };

        let run = simulate_single_night(config, night_rng, policy_rng);
        if config.verbosity >= 2 {
            tracing::info!(
                night = run_idx + 1,
                outcome = ?run.outcome,
                elapsed = run.elapsed,
                wood_trips = run.wood_trips,
                food_trips = run.food_trips,
                whispers = run.whispers,
                "night finished"
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one night to its end or to the tick limit.
pub fn simulate_single_night(
    config: &SimConfig,
    night_rng: ChaCha8Rng,
    policy_rng: ChaCha8Rng,
) -> RunStats {
    let mut sim = Simulation::with_rng(config.survival.clone(), night_rng);
    let mut pilot = Autopilot::new(config.policy.clone(), policy_rng);
    let mut stats = RunStats::default();

    while stats.ticks < config.max_ticks_per_run && !sim.is_over() {
        if let Some(command) = pilot.decide(&sim) {
            match command.apply(&mut sim) {
                Ok(events) => {
                    pilot.observe(&events);
                    stats.record(&events);
                }
                Err(err) => tracing::warn!(?command, %err, "autopilot command rejected"),
            }
        }

        let input = pilot.input(&sim);
        let result = sim.tick(config.dt, input);
        pilot.observe(&result.events);
        stats.record(&result.events);
        stats.ticks += 1;
    }

    if stats.outcome.is_none() {
        stats.outcome = Some(match sim.run_state() {
            RunState::Won => NightOutcome::Survived,
            _ => NightOutcome::TimedOut,
        });
    }
    stats.elapsed = sim.clock().elapsed();
    stats.final_sanity = sim.stats().sanity();
    stats.final_hunger = sim.stats().hunger();
    stats.final_fire = sim.stats().fire();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::simulator::config::AutopilotPolicy;

    fn seeded_night(config: &SimConfig, seed: u64) -> RunStats {
        simulate_single_night(
            config,
            ChaCha8Rng::seed_from_u64(seed),
            ChaCha8Rng::seed_from_u64(seed ^ POLICY_SEED_SALT),
        )
    }

    #[test]
    fn test_night_without_decay_is_survived() {
        let config = SimConfig {
            survival: SurvivalConfig::without_decay(),
            policy: AutopilotPolicy::perfect_ears(),
            ..Default::default()
        };
        let run = seeded_night(&config, 3);
        assert!(run.survived());
        assert!(run.elapsed >= 100.0);
        assert_eq!(run.whispers_missed, 0);
    }

    #[test]
    fn test_deaf_homebody_misses_every_whisper() {
        let config = SimConfig {
            survival: SurvivalConfig::without_decay(),
            policy: AutopilotPolicy {
                whistle_accuracy: 0.0,
                ..AutopilotPolicy::homebody()
            },
            ..Default::default()
        };
        let run = seeded_night(&config, 4);
        assert_eq!(run.whistled_back, 0);
        assert_eq!(run.wood_trips + run.food_trips, 0);
        assert!(run.whispers_missed > 0);
    }

    #[test]
    fn test_tick_limit_times_out() {
        let config = SimConfig {
            max_ticks_per_run: 10,
            ..Default::default()
        };
        let run = seeded_night(&config, 5);
        assert_eq!(run.ticks, 10);
        assert_eq!(run.outcome, Some(NightOutcome::TimedOut));
    }

    #[test]
    fn test_every_night_ends() {
        let config = SimConfig {
            num_runs: 20,
            seed: Some(11),
            ..Default::default()
        };
        let report = run_simulation(&config);
        assert_eq!(report.wins + report.losses + report.timeouts, 20);
    }
}
