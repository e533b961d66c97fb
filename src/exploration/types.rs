//! Expedition data: costs, finds and phases.

use crate::core::constants::{
    FOOD_BERRIES_HUNGER, FOOD_RABBIT_HUNGER, WOOD_LOG_FIRE, WOOD_STICK_FIRE,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

fn roll_cost<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// The price of heading into the forest, rolled when the menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationCost {
    pub time: u32,
    pub sanity: u32,
    pub hunger: u32,
}

impl ExplorationCost {
    /// Rolls each part independently and uniformly in `min..=max`.
    pub fn roll<R: Rng>(rng: &mut R, min: u32, max: u32) -> Self {
        Self {
            time: roll_cost(rng, min, max),
            sanity: roll_cost(rng, min, max),
            hunger: roll_cost(rng, min, max),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "Time -{} Sanity -{} Hunger -{}",
            self.time, self.sanity, self.hunger
        )
    }
}

/// What running from or fighting a predator will cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredatorCost {
    pub run_time: u32,
    pub run_sanity: u32,
    pub fight_sanity: u32,
    pub fight_hunger: u32,
}

impl PredatorCost {
    pub fn roll<R: Rng>(rng: &mut R, min: u32, max: u32) -> Self {
        Self {
            run_time: roll_cost(rng, min, max),
            run_sanity: roll_cost(rng, min, max),
            fight_sanity: roll_cost(rng, min, max),
            fight_hunger: roll_cost(rng, min, max),
        }
    }

    pub fn run_label(&self) -> String {
        format!("Time -{} | Sanity -{}", self.run_time, self.run_sanity)
    }

    pub fn fight_label(&self) -> String {
        format!(
            "Sanity -{} | Hunger -{}",
            self.fight_sanity, self.fight_hunger
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    Wood,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodFind {
    Nothing,
    Stick,
    Log,
}

impl WoodFind {
    pub fn fire_gain(&self) -> f64 {
        match self {
            WoodFind::Nothing => 0.0,
            WoodFind::Stick => WOOD_STICK_FIRE,
            WoodFind::Log => WOOD_LOG_FIRE,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, WoodFind::Nothing)
    }

    pub fn message(&self) -> &'static str {
        match self {
            WoodFind::Nothing => "You found nothing...",
            WoodFind::Stick => "You found a stick (+15 fire)",
            WoodFind::Log => "You found a log (+30 fire)",
        }
    }
}

/// Result of a food roll.
///
/// `DeadRoll` is a roll above the rabbit band that the predator band does
/// not reach yet: nothing is found, but the player still sees a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodFind {
    Nothing,
    Berries,
    Rabbit,
    Predator,
    DeadRoll,
}

impl FoodFind {
    pub fn hunger_gain(&self) -> f64 {
        match self {
            FoodFind::Berries => FOOD_BERRIES_HUNGER,
            FoodFind::Rabbit => FOOD_RABBIT_HUNGER,
            FoodFind::Nothing | FoodFind::Predator | FoodFind::DeadRoll => 0.0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FoodFind::Nothing => "You found nothing...",
            FoodFind::Berries => "You found berries (+25 hunger)",
            FoodFind::Rabbit => "You caught a rabbit (+40 hunger)",
            FoodFind::Predator => "Something is watching you...",
            FoodFind::DeadRoll => "The forest gives you nothing.",
        }
    }
}

/// Outcome of fighting a predator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredatorFight {
    pub won: bool,
    /// Win chance in percent, computed after the fight costs landed.
    pub win_chance: f64,
    pub roll: f64,
}

impl PredatorFight {
    pub fn message(&self) -> &'static str {
        if self.won {
            "Predator killed (+80 hunger)"
        } else {
            "Predator won (+0 hunger)"
        }
    }
}

/// Where the player is within an expedition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplorationPhase {
    /// Costs are on display, nothing has been paid yet.
    MenuOpen,
    /// Costs paid, waiting on the deferred resolution.
    Searching(SearchKind),
    WoodResult(WoodFind),
    FoodResult(FoodFind),
    PredatorEncounter,
    PredatorResult(PredatorFight),
}

impl ExplorationPhase {
    /// Phases from which the player may walk back to camp.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            ExplorationPhase::WoodResult(_)
                | ExplorationPhase::FoodResult(_)
                | ExplorationPhase::PredatorResult(_)
        )
    }
}

/// A single trip away from the fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expedition {
    pub phase: ExplorationPhase,
    pub cost: ExplorationCost,
    /// Set when a predator shows up; taken by whichever of fight or run
    /// the player picks.
    pub predator: Option<PredatorCost>,
}

impl Expedition {
    pub fn new(cost: ExplorationCost) -> Self {
        Self {
            phase: ExplorationPhase::MenuOpen,
            cost,
            predator: None,
        }
    }
}
