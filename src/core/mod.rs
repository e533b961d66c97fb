//! Core simulation: the night, its tick driver and its collaborators.

pub mod config;
pub mod constants;
pub mod error;
pub mod schedule;
pub mod simulation;
pub mod sinks;
pub mod tick;

pub use config::SurvivalConfig;
pub use error::{ConfigError, SurvivalError};
pub use schedule::Schedule;
pub use simulation::{RunState, Simulation};
pub use sinks::{DisplaySink, EffectCue, EffectSink, SceneSink, Sinks};
pub use tick::{DisplayFrame, DisplayUpdate, NightEvent, TickInput, TickResult};
