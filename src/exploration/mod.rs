//! Trips into the forest for wood and food.
//!
//! `types` holds the expedition data, `outcomes` the loot tables and
//! `logic` the commands that move an expedition through its phases.

pub mod command;
pub mod logic;
pub mod outcomes;
pub mod types;

pub use command::Command;
pub use outcomes::{
    predator_chance, predator_win_chance, resolve_food, resolve_predator, resolve_wood,
    FailureStreak,
};
pub use types::*;
