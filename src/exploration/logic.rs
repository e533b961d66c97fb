//! Expedition commands and deferred search resolution.
//!
//! Every command checks the current phase first and returns a
//! [`SurvivalError`] without touching state when it does not apply.

use super::outcomes::{roll_food, roll_predator, roll_wood};
use super::types::{
    ExplorationCost, ExplorationPhase, Expedition, FoodFind, PredatorCost, SearchKind,
};
use crate::core::constants::PREDATOR_WIN_HUNGER;
use crate::core::error::{Result, SurvivalError};
use crate::core::simulation::{Deferred, RunState, Simulation};
use crate::core::tick::NightEvent;
use crate::survival::resources::Stat;
use rand::Rng;

impl<R: Rng> Simulation<R> {
    /// The current expedition, or the error a command expecting one gets.
    fn current_expedition(&self, at_camp: SurvivalError) -> Result<Expedition> {
        match self.run_state {
            RunState::Exploring(expedition) => Ok(expedition),
            RunState::AtCamp => Err(at_camp),
            RunState::Won | RunState::Lost => Err(SurvivalError::RunOver),
        }
    }

    /// Rolls fresh costs and shows the explore menu.
    pub fn open_explore_menu(&mut self) -> Result<Vec<NightEvent>> {
        match self.run_state {
            RunState::AtCamp => {}
            RunState::Exploring(_) => return Err(SurvivalError::NotAtCamp),
            RunState::Won | RunState::Lost => return Err(SurvivalError::RunOver),
        }
        if self.explore_cooldown > 0.0 {
            return Err(SurvivalError::ExploreCoolingDown {
                remaining: self.explore_cooldown,
            });
        }

        let cost = ExplorationCost::roll(
            &mut self.rng,
            self.config.explore_cost_min,
            self.config.explore_cost_max,
        );
        self.run_state = RunState::Exploring(Expedition::new(cost));
        self.explore_cooldown = self.config.explore_cooldown;
        tracing::debug!(cost = %cost.label(), "explore menu opened");
        Ok(vec![NightEvent::ExploreMenuOpened { cost }])
    }

    /// Backs out of the menu. Nothing is paid.
    pub fn close_explore_menu(&mut self) -> Result<Vec<NightEvent>> {
        let expedition = self.current_expedition(SurvivalError::MenuNotOpen)?;
        match expedition.phase {
            ExplorationPhase::MenuOpen => {}
            ExplorationPhase::Searching(_) => return Err(SurvivalError::SearchPending),
            _ => return Err(SurvivalError::MenuNotOpen),
        }
        self.run_state = RunState::AtCamp;
        tracing::debug!("explore menu closed");
        Ok(vec![NightEvent::ExploreMenuClosed])
    }

    pub fn commit_wood(&mut self) -> Result<Vec<NightEvent>> {
        self.commit(SearchKind::Wood)
    }

    pub fn commit_food(&mut self) -> Result<Vec<NightEvent>> {
        self.commit(SearchKind::Food)
    }

    /// Pays the rolled cost and queues the search result.
    fn commit(&mut self, kind: SearchKind) -> Result<Vec<NightEvent>> {
        let mut expedition = self.current_expedition(SurvivalError::MenuNotOpen)?;
        match expedition.phase {
            ExplorationPhase::MenuOpen => {}
            ExplorationPhase::Searching(_) => return Err(SurvivalError::SearchPending),
            _ => return Err(SurvivalError::MenuNotOpen),
        }

        let cost = expedition.cost;
        self.clock.apply_cost(cost.time);
        self.stats.adjust(Stat::Sanity, -f64::from(cost.sanity));
        self.stats.adjust(Stat::Hunger, -f64::from(cost.hunger));

        expedition.phase = ExplorationPhase::Searching(kind);
        self.run_state = RunState::Exploring(expedition);
        self.schedule
            .after(self.config.search_delay, Deferred::ResolveSearch(kind));

        tracing::debug!(?kind, cost = %cost.label(), "search started");
        Ok(vec![NightEvent::SearchStarted { kind, cost }])
    }

    /// Runs when a queued search comes due.
    pub(crate) fn resolve_search(&mut self, kind: SearchKind) -> Vec<NightEvent> {
        let mut expedition = match self.run_state {
            RunState::Exploring(expedition)
                if expedition.phase == ExplorationPhase::Searching(kind) =>
            {
                expedition
            }
            _ => return Vec::new(),
        };

        let event = match kind {
            SearchKind::Wood => {
                let find = roll_wood(&mut self.rng, &mut self.streak);
                let fire_gained = self.stats.adjust(Stat::Fire, find.fire_gain());
                expedition.phase = ExplorationPhase::WoodResult(find);
                tracing::debug!(?find, streak = self.streak.count(), "wood search resolved");
                NightEvent::WoodFound { find, fire_gained }
            }
            SearchKind::Food => match roll_food(&mut self.rng, self.clock.progress()) {
                FoodFind::Predator => {
                    let cost = PredatorCost::roll(
                        &mut self.rng,
                        self.config.explore_cost_min,
                        self.config.explore_cost_max,
                    );
                    expedition.predator = Some(cost);
                    expedition.phase = ExplorationPhase::PredatorEncounter;
                    tracing::debug!(progress = self.clock.progress(), "predator encountered");
                    NightEvent::PredatorEncountered { cost }
                }
                find => {
                    let hunger_gained = self.stats.adjust(Stat::Hunger, find.hunger_gain());
                    expedition.phase = ExplorationPhase::FoodResult(find);
                    tracing::debug!(?find, "food search resolved");
                    NightEvent::FoodFound {
                        find,
                        hunger_gained,
                    }
                }
            },
        };

        self.run_state = RunState::Exploring(expedition);
        vec![event]
    }

    /// Pays the fight costs and rolls the fight.
    pub fn fight_predator(&mut self) -> Result<Vec<NightEvent>> {
        let mut expedition = self.current_expedition(SurvivalError::NoPredator)?;
        let cost = match (expedition.phase, expedition.predator) {
            (ExplorationPhase::PredatorEncounter, Some(cost)) => cost,
            (ExplorationPhase::Searching(_), _) => return Err(SurvivalError::SearchPending),
            _ => return Err(SurvivalError::NoPredator),
        };

        self.stats.adjust(Stat::Sanity, -f64::from(cost.fight_sanity));
        self.stats.adjust(Stat::Hunger, -f64::from(cost.fight_hunger));

        let fight = roll_predator(&mut self.rng, &self.stats);
        let hunger_gained = if fight.won {
            self.stats.adjust(Stat::Hunger, PREDATOR_WIN_HUNGER)
        } else {
            0.0
        };

        expedition.predator = None;
        expedition.phase = ExplorationPhase::PredatorResult(fight);
        self.run_state = RunState::Exploring(expedition);

        tracing::debug!(
            won = fight.won,
            win_chance = fight.win_chance,
            roll = fight.roll,
            "predator fight"
        );
        Ok(vec![NightEvent::PredatorFought {
            fight,
            hunger_gained,
        }])
    }

    /// Walks back to the fire from a result, or flees a waiting predator.
    pub fn return_to_camp(&mut self) -> Result<Vec<NightEvent>> {
        let expedition = self.current_expedition(SurvivalError::NothingToReturnFrom)?;
        match expedition.phase {
            phase if phase.is_resolved() => {}
            ExplorationPhase::PredatorEncounter => {}
            ExplorationPhase::Searching(_) => return Err(SurvivalError::SearchPending),
            _ => return Err(SurvivalError::NothingToReturnFrom),
        }
        Ok(vec![self.head_back(expedition)])
    }

    /// Flees a predator, paying the run costs.
    pub fn run_from_predator(&mut self) -> Result<Vec<NightEvent>> {
        let expedition = self.current_expedition(SurvivalError::NoPredator)?;
        match expedition.phase {
            ExplorationPhase::PredatorEncounter => {}
            ExplorationPhase::Searching(_) => return Err(SurvivalError::SearchPending),
            _ => return Err(SurvivalError::NoPredator),
        }
        Ok(vec![self.head_back(expedition)])
    }

    fn head_back(&mut self, expedition: Expedition) -> NightEvent {
        let (time_cost, sanity_cost, fled) = match expedition.predator {
            Some(cost) => {
                self.clock.apply_cost(cost.run_time);
                self.stats.adjust(Stat::Sanity, -f64::from(cost.run_sanity));
                (cost.run_time, cost.run_sanity, true)
            }
            None => (0, 0, false),
        };

        self.run_state = RunState::AtCamp;
        tracing::debug!(time_cost, sanity_cost, fled, "back at camp");
        NightEvent::ReturnedToCamp {
            time_cost,
            sanity_cost,
            fled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::core::tick::TickInput;
    use crate::exploration::types::WoodFind;

    fn quiet_config() -> SurvivalConfig {
        SurvivalConfig {
            whisper_min_delay: 1_000.0,
            whisper_max_delay: 1_000.0,
            ..SurvivalConfig::without_decay()
        }
    }

    fn phase(sim: &Simulation) -> ExplorationPhase {
        sim.expedition().map(|e| e.phase).unwrap()
    }

    /// Drives a food search until a predator shows up.
    fn find_predator(sim: &mut Simulation) {
        for _ in 0..500 {
            sim.tick(9.0, TickInput::default());
            sim.open_explore_menu().unwrap();
            sim.commit_food().unwrap();
            sim.tick(3.0, TickInput::default());
            if phase(sim) == ExplorationPhase::PredatorEncounter {
                return;
            }
            sim.return_to_camp().unwrap();
            sim.adjust(Stat::Hunger, 100.0);
            sim.adjust(Stat::Sanity, 100.0);
        }
        panic!("no predator found");
    }

    fn late_night_config() -> SurvivalConfig {
        SurvivalConfig {
            sunrise_seconds: 1_000_000.0,
            ..quiet_config()
        }
    }

    #[test]
    fn test_open_menu_rolls_costs_in_range() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        let events = sim.open_explore_menu().unwrap();
        match events.as_slice() {
            [NightEvent::ExploreMenuOpened { cost }] => {
                for part in [cost.time, cost.sanity, cost.hunger] {
                    assert!((1..=9).contains(&part));
                }
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert_eq!(phase(&sim), ExplorationPhase::MenuOpen);
        assert!(sim.is_exploring());
    }

    #[test]
    fn test_close_menu_costs_nothing() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.open_explore_menu().unwrap();
        let events = sim.close_explore_menu().unwrap();
        assert_eq!(events, vec![NightEvent::ExploreMenuClosed]);
        assert_eq!(*sim.run_state(), RunState::AtCamp);
        assert_eq!(sim.clock().elapsed(), 0.0);
        assert_eq!(sim.stats().sanity(), 100.0);
    }

    #[test]
    fn test_cooldown_blocks_reopening() {
        let mut sim = Simulation::seeded(quiet_config(), 1);
        sim.open_explore_menu().unwrap();
        sim.close_explore_menu().unwrap();
        assert!(matches!(
            sim.open_explore_menu(),
            Err(SurvivalError::ExploreCoolingDown { .. })
        ));
        sim.tick(8.0, TickInput::default());
        assert!(sim.open_explore_menu().is_ok());
    }

    #[test]
    fn test_commit_applies_cost_atomically() {
        let mut sim = Simulation::seeded(quiet_config(), 2);
        let cost = match sim.open_explore_menu().unwrap()[0] {
            NightEvent::ExploreMenuOpened { cost } => cost,
            _ => unreachable!(),
        };
        sim.commit_wood().unwrap();

        assert_eq!(sim.clock().elapsed(), f64::from(cost.time));
        assert_eq!(sim.stats().sanity(), 100.0 - f64::from(cost.sanity));
        assert_eq!(sim.stats().hunger(), 100.0 - f64::from(cost.hunger));
        assert_eq!(phase(&sim), ExplorationPhase::Searching(SearchKind::Wood));
        assert!(sim.search_pending());
    }

    #[test]
    fn test_search_resolves_after_delay() {
        let mut sim = Simulation::seeded(quiet_config(), 3);
        sim.open_explore_menu().unwrap();
        sim.commit_wood().unwrap();
        let elapsed = sim.clock().elapsed();

        let early = sim.tick(2.0, TickInput::default());
        assert!(early.events.is_empty());
        assert!(matches!(
            early.display,
            Some(crate::core::tick::DisplayUpdate::SanityOnly(_))
        ));

        let due = sim.tick(1.0, TickInput::default());
        assert!(matches!(
            due.events.as_slice(),
            [NightEvent::WoodFound { .. }]
        ));
        assert!(matches!(phase(&sim), ExplorationPhase::WoodResult(_)));
        // The clock stood still while away.
        assert_eq!(sim.clock().elapsed(), elapsed);
    }

    #[test]
    fn test_wood_streak_forces_log() {
        let mut sim = Simulation::seeded(quiet_config(), 4);
        let mut nothings = 0;
        for _ in 0..200 {
            sim.explore_cooldown = 0.0;
            sim.adjust(Stat::Sanity, 100.0);
            sim.adjust(Stat::Hunger, 100.0);
            let forced = sim.failure_streak().forces_find();
            sim.open_explore_menu().unwrap();
            sim.commit_wood().unwrap();
            sim.tick(3.0, TickInput::default());
            let find = match phase(&sim) {
                ExplorationPhase::WoodResult(find) => find,
                other => panic!("unexpected phase {:?}", other),
            };
            if forced {
                assert_eq!(find, WoodFind::Log);
            }
            if find == WoodFind::Nothing {
                nothings += 1;
            }
            assert!(sim.failure_streak().count() <= 2);
            sim.return_to_camp().unwrap();
        }
        assert!(nothings > 0);
    }

    #[test]
    fn test_return_from_wood_is_free() {
        let mut sim = Simulation::seeded(quiet_config(), 5);
        sim.open_explore_menu().unwrap();
        sim.commit_wood().unwrap();
        sim.tick(3.0, TickInput::default());
        let before = *sim.stats();
        let elapsed = sim.clock().elapsed();

        let events = sim.return_to_camp().unwrap();
        assert_eq!(
            events,
            vec![NightEvent::ReturnedToCamp {
                time_cost: 0,
                sanity_cost: 0,
                fled: false
            }]
        );
        assert_eq!(*sim.stats(), before);
        assert_eq!(sim.clock().elapsed(), elapsed);
        assert_eq!(*sim.run_state(), RunState::AtCamp);
    }

    #[test]
    fn test_run_from_predator_pays_run_cost() {
        let mut sim = Simulation::seeded(late_night_config(), 6);
        sim.clock.apply_cost(900_000);
        find_predator(&mut sim);

        let cost = sim.expedition().and_then(|e| e.predator).unwrap();
        let sanity = sim.stats().sanity();
        let elapsed = sim.clock().elapsed();

        let events = sim.run_from_predator().unwrap();
        assert_eq!(
            events,
            vec![NightEvent::ReturnedToCamp {
                time_cost: cost.run_time,
                sanity_cost: cost.run_sanity,
                fled: true
            }]
        );
        assert_eq!(sim.clock().elapsed(), elapsed + f64::from(cost.run_time));
        assert_eq!(
            sim.stats().sanity(),
            (sanity - f64::from(cost.run_sanity)).max(0.0)
        );
    }

    #[test]
    fn test_fight_consumes_predator_cost() {
        let mut sim = Simulation::seeded(late_night_config(), 7);
        sim.clock.apply_cost(900_000);
        find_predator(&mut sim);

        let events = sim.fight_predator().unwrap();
        assert!(matches!(
            events.as_slice(),
            [NightEvent::PredatorFought { .. }]
        ));
        assert!(matches!(phase(&sim), ExplorationPhase::PredatorResult(_)));
        assert!(sim.expedition().unwrap().predator.is_none());
        assert_eq!(sim.fight_predator(), Err(SurvivalError::NoPredator));
        assert_eq!(sim.run_from_predator(), Err(SurvivalError::NoPredator));

        let elapsed = sim.clock().elapsed();
        let events = sim.return_to_camp().unwrap();
        assert!(matches!(
            events.as_slice(),
            [NightEvent::ReturnedToCamp {
                time_cost: 0,
                fled: false,
                ..
            }]
        ));
        assert_eq!(sim.clock().elapsed(), elapsed);
    }

    #[test]
    fn test_commands_rejected_in_wrong_phase() {
        let mut sim = Simulation::seeded(quiet_config(), 8);
        assert_eq!(sim.close_explore_menu(), Err(SurvivalError::MenuNotOpen));
        assert_eq!(sim.commit_food(), Err(SurvivalError::MenuNotOpen));
        assert_eq!(sim.fight_predator(), Err(SurvivalError::NoPredator));
        assert_eq!(
            sim.return_to_camp(),
            Err(SurvivalError::NothingToReturnFrom)
        );

        sim.open_explore_menu().unwrap();
        assert_eq!(sim.open_explore_menu(), Err(SurvivalError::NotAtCamp));
        assert_eq!(
            sim.return_to_camp(),
            Err(SurvivalError::NothingToReturnFrom)
        );

        sim.commit_food().unwrap();
        let snapshot = (*sim.stats(), sim.clock().elapsed());
        assert_eq!(sim.commit_wood(), Err(SurvivalError::SearchPending));
        assert_eq!(sim.close_explore_menu(), Err(SurvivalError::SearchPending));
        assert_eq!(sim.return_to_camp(), Err(SurvivalError::SearchPending));
        assert_eq!(snapshot, (*sim.stats(), sim.clock().elapsed()));
    }

    #[test]
    fn test_commands_rejected_after_run_ends() {
        let mut sim = Simulation::seeded(quiet_config(), 9);
        sim.adjust(Stat::Sanity, -100.0);
        sim.tick(0.1, TickInput::default());
        assert_eq!(sim.open_explore_menu(), Err(SurvivalError::RunOver));
        assert_eq!(sim.return_to_camp(), Err(SurvivalError::RunOver));
    }

    #[test]
    fn test_whispers_frozen_while_exploring() {
        let config = SurvivalConfig {
            whisper_min_delay: 5.0,
            whisper_max_delay: 5.0,
            ..SurvivalConfig::without_decay()
        };
        let mut sim = Simulation::seeded(config, 10);
        sim.tick(4.0, TickInput::default());
        let before = sim.whisper().state();

        sim.open_explore_menu().unwrap();
        for _ in 0..20 {
            let result = sim.tick(1.0, TickInput::whistle());
            assert!(result.events.is_empty());
        }
        assert_eq!(sim.whisper().state(), before);
    }
}
