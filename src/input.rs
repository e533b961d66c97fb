//! Key handling for the camp screen.
//!
//! Keys mean different things depending on where the player is, so the
//! mapping reads the run state before picking an action.

use crate::core::simulation::{RunState, Simulation};
use crate::exploration::command::Command;
use crate::exploration::types::ExplorationPhase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    /// Queue a whistle for the next tick.
    Whistle,
    Command(Command),
    Ignore,
}

pub fn map_key<R: Rng>(key: KeyEvent, sim: &Simulation<R>) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
        KeyCode::Char(' ') => return InputAction::Whistle,
        _ => {}
    }

    let phase = match sim.run_state() {
        RunState::AtCamp => {
            return match key.code {
                KeyCode::Char('e') | KeyCode::Char('E') => InputAction::Command(Command::OpenMenu),
                _ => InputAction::Ignore,
            };
        }
        RunState::Exploring(expedition) => expedition.phase,
        RunState::Won | RunState::Lost => return InputAction::Ignore,
    };

    let command = match (phase, key.code) {
        (ExplorationPhase::MenuOpen, KeyCode::Char('1')) => Command::CommitWood,
        (ExplorationPhase::MenuOpen, KeyCode::Char('2')) => Command::CommitFood,
        (ExplorationPhase::MenuOpen, KeyCode::Esc) => Command::CloseMenu,
        (ExplorationPhase::PredatorEncounter, KeyCode::Char('f') | KeyCode::Char('F')) => {
            Command::Fight
        }
        (ExplorationPhase::PredatorEncounter, KeyCode::Char('r') | KeyCode::Char('R')) => {
            Command::Run
        }
        (p, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) if p.is_resolved() => {
            Command::Return
        }
        _ => return InputAction::Ignore,
    };
    InputAction::Command(command)
}
