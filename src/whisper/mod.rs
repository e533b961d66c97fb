//! Whisper reaction game.
//!
//! Auditory hallucinations arrive at random intervals. Whistling back
//! before the reaction budget runs out restores a little sanity; missing
//! the window costs a lot more.

pub mod logic;
pub mod types;

pub use types::*;
