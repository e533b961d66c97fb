//! Player commands as values, so input layers can map to them.

use crate::core::error::SurvivalError;
use crate::core::simulation::Simulation;
use crate::core::tick::NightEvent;
use rand::Rng;

/// One player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenMenu,
    CloseMenu,
    CommitWood,
    CommitFood,
    Fight,
    Run,
    Return,
}

impl Command {
    pub fn apply<R: Rng>(self, sim: &mut Simulation<R>) -> Result<Vec<NightEvent>, SurvivalError> {
        match self {
            Command::OpenMenu => sim.open_explore_menu(),
            Command::CloseMenu => sim.close_explore_menu(),
            Command::CommitWood => sim.commit_wood(),
            Command::CommitFood => sim.commit_food(),
            Command::Fight => sim.fight_predator(),
            Command::Run => sim.run_from_predator(),
            Command::Return => sim.return_to_camp(),
        }
    }
}
