//! Error types for commands and configuration.

use thiserror::Error;

/// A player command that the current phase of the night does not allow.
///
/// Rejected commands never change the simulation state.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SurvivalError {
    #[error("the night is already over")]
    RunOver,

    #[error("can only do that while sitting at camp")]
    NotAtCamp,

    #[error("the explore menu is not open")]
    MenuNotOpen,

    #[error("still searching the forest")]
    SearchPending,

    #[error("there is no predator to face")]
    NoPredator,

    #[error("nothing to return from yet")]
    NothingToReturnFrom,

    #[error("too tired to head out again ({remaining:.1}s)")]
    ExploreCoolingDown { remaining: f64 },
}

/// Failure to load or validate a [`SurvivalConfig`](crate::core::config::SurvivalConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SurvivalError>;
