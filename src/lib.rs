//! Campfire - survive the night by the fire.
//!
//! Keep sanity, hunger and fire above zero until sunrise while foraging in
//! a forest that gets more dangerous toward dawn and answering the whispers
//! in your head. The library holds the whole simulation; the binaries are a
//! terminal front end and a balance simulator.

pub mod build_info;
pub mod core;
pub mod exploration;
pub mod input;
pub mod simulator;
pub mod survival;
pub mod ui;
pub mod whisper;
