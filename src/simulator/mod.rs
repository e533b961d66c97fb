//! Night balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded nights with a scripted player to see:
//! - How often the night is survived, and what kills it when it isn't
//! - How often searches come back empty, including food dead rolls
//! - How dangerous predators are as sunrise gets closer
//! - How much the whisper game costs a slow or careless player
//!
//! Nights run through the same `Simulation` the terminal front end uses.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::{AutopilotPolicy, SimConfig};
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_night, NightOutcome, RunStats};
