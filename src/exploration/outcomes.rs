//! Loot tables for wood, food and predator fights.
//!
//! Each table is a pure function of its roll so the bands can be tested
//! exactly; the `roll_*` wrappers draw the roll from an injected RNG.

use super::types::{FoodFind, PredatorFight, WoodFind};
use crate::core::constants::{
    FOOD_BERRIES_BELOW, FOOD_NOTHING_BELOW, FOOD_RABBIT_BELOW, PREDATOR_HUNGER_WEIGHT,
    PREDATOR_MAX_CHANCE, PREDATOR_SANITY_WEIGHT, STAT_MAX, WOOD_FAILURE_STREAK_LIMIT,
    WOOD_FORCED_ROLL, WOOD_NOTHING_BELOW, WOOD_STICK_BELOW,
};
use crate::survival::clock::lerp;
use crate::survival::resources::SurvivalStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Consecutive empty-handed wood searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureStreak(u32);

impl FailureStreak {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn count(&self) -> u32 {
        self.0
    }

    /// True when the next wood search is guaranteed to find something.
    pub fn forces_find(&self) -> bool {
        self.0 >= WOOD_FAILURE_STREAK_LIMIT
    }

    fn record(&mut self, find: WoodFind) {
        if find.is_empty() {
            self.0 += 1;
        } else {
            self.0 = 0;
        }
    }
}

/// Resolves a wood search from a roll in `[0, 100)`.
///
/// After two failures in a row the roll is replaced so a log is found.
pub fn resolve_wood(roll: u32, streak: &mut FailureStreak) -> WoodFind {
    let roll = if streak.forces_find() {
        WOOD_FORCED_ROLL
    } else {
        roll
    };

    let find = if roll < WOOD_NOTHING_BELOW {
        WoodFind::Nothing
    } else if roll < WOOD_STICK_BELOW {
        WoodFind::Stick
    } else {
        WoodFind::Log
    };

    streak.record(find);
    find
}

pub fn roll_wood<R: Rng>(rng: &mut R, streak: &mut FailureStreak) -> WoodFind {
    resolve_wood(rng.gen_range(0..100), streak)
}

/// Width of the predator band in percentage points, growing toward sunrise.
pub fn predator_chance(progress: f64) -> f64 {
    lerp(0.0, PREDATOR_MAX_CHANCE, progress)
}

/// Resolves a food search from a roll in `[0, 100)`.
///
/// The predator band starts at the end of the rabbit band and is only as
/// wide as [`predator_chance`]; rolls past it are dead rolls.
pub fn resolve_food(roll: u32, progress: f64) -> FoodFind {
    if roll < FOOD_NOTHING_BELOW {
        FoodFind::Nothing
    } else if roll < FOOD_BERRIES_BELOW {
        FoodFind::Berries
    } else if roll < FOOD_RABBIT_BELOW {
        FoodFind::Rabbit
    } else if f64::from(roll) < f64::from(FOOD_RABBIT_BELOW) + predator_chance(progress) {
        FoodFind::Predator
    } else {
        FoodFind::DeadRoll
    }
}

pub fn roll_food<R: Rng>(rng: &mut R, progress: f64) -> FoodFind {
    resolve_food(rng.gen_range(0..100), progress)
}

/// Chance to beat a predator, weighted toward sanity.
pub fn predator_win_chance(sanity: f64, hunger: f64) -> f64 {
    (sanity * PREDATOR_SANITY_WEIGHT + hunger * PREDATOR_HUNGER_WEIGHT).clamp(0.0, STAT_MAX)
}

/// Resolves a predator fight from a roll in `[0, 100)`.
pub fn resolve_predator(roll: f64, stats: &SurvivalStats) -> PredatorFight {
    let win_chance = predator_win_chance(stats.sanity(), stats.hunger());
    PredatorFight {
        won: roll < win_chance,
        win_chance,
        roll,
    }
}

pub fn roll_predator<R: Rng>(rng: &mut R, stats: &SurvivalStats) -> PredatorFight {
    resolve_predator(rng.gen_range(0.0..STAT_MAX), stats)
}
