//! What the terminal remembers between frames.
//!
//! The simulation pushes into a [`ViewHandle`] through the sink traits; the
//! draw functions only ever read the [`CampView`] behind it.

use crate::core::sinks::{DisplaySink, EffectCue, EffectSink, SceneSink};
use crate::core::tick::{DisplayFrame, NightEvent};
use crate::survival::resources::Stat;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;

const MAX_LOG_ENTRIES: usize = 50;

/// Colour family for a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Bad,
    Eerie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Sunrise,
    Lost(Stat),
}

#[derive(Debug, Default)]
pub struct CampView {
    pub frame: Option<DisplayFrame>,
    /// Sanity fraction reported while away from camp.
    pub away_sanity: Option<f64>,
    /// Voice of the whisper currently playing.
    pub whisper: Option<u32>,
    pub hint_visible: bool,
    pub ending: Option<Ending>,
    pub log: VecDeque<LogEntry>,
}

impl CampView {
    pub fn push_log(&mut self, message: impl Into<String>, tone: Tone) {
        self.log.push_back(LogEntry {
            message: message.into(),
            tone,
        });
        while self.log.len() > MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    /// Logs command results that carry no effect cue.
    pub fn record_command(&mut self, events: &[NightEvent]) {
        for event in events {
            match event {
                NightEvent::ExploreMenuOpened { cost } => {
                    self.push_log(format!("Heading out will cost {}", cost.label()), Tone::Neutral)
                }
                NightEvent::SearchStarted { cost, .. } => {
                    self.away_sanity = None;
                    self.push_log(format!("You leave the fire ({})", cost.label()), Tone::Neutral)
                }
                NightEvent::ReturnedToCamp {
                    fled: true,
                    time_cost,
                    sanity_cost,
                } => self.push_log(
                    format!(
                        "You ran back to the fire (Time -{} Sanity -{})",
                        time_cost, sanity_cost
                    ),
                    Tone::Bad,
                ),
                NightEvent::ReturnedToCamp { .. } => {
                    self.push_log("You return to the fire.", Tone::Neutral)
                }
                _ => {}
            }
        }
    }
}

/// Shared handle the sinks write through.
#[derive(Debug, Clone, Default)]
pub struct ViewHandle(Rc<RefCell<CampView>>);

impl ViewHandle {
    pub fn borrow(&self) -> Ref<'_, CampView> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, CampView> {
        self.0.borrow_mut()
    }
}

impl DisplaySink for ViewHandle {
    fn show(&mut self, frame: &DisplayFrame) {
        let mut view = self.0.borrow_mut();
        view.hint_visible = frame.hint_visible;
        view.away_sanity = None;
        view.frame = Some(frame.clone());
    }

    fn sanity_telemetry(&mut self, percent: f64) {
        self.0.borrow_mut().away_sanity = Some(percent);
    }
}

impl EffectSink for ViewHandle {
    fn cue(&mut self, cue: EffectCue) {
        let mut view = self.0.borrow_mut();
        match cue {
            EffectCue::WhisperTriggered { voice } => {
                view.whisper = Some(voice);
                view.push_log("Something whispers your name...", Tone::Eerie);
            }
            EffectCue::WhistleSuccess => {
                view.whisper = None;
                view.push_log("You whistle back. The voice fades.", Tone::Good);
            }
            EffectCue::WhisperMissed => {
                view.whisper = None;
                view.push_log("The whisper crawls into your head.", Tone::Bad);
            }
            EffectCue::Whistle => view.push_log("You whistle into the dark.", Tone::Neutral),
            EffectCue::WoodFound(find) => {
                let tone = if find.is_empty() { Tone::Bad } else { Tone::Good };
                view.push_log(find.message(), tone);
            }
            EffectCue::FoodFound(find) => {
                let tone = if find.hunger_gain() > 0.0 {
                    Tone::Good
                } else {
                    Tone::Bad
                };
                view.push_log(find.message(), tone);
            }
            EffectCue::PredatorEncountered => {
                view.push_log("A predator blocks the path back!", Tone::Bad)
            }
            EffectCue::PredatorResult { won } => {
                let tone = if won { Tone::Good } else { Tone::Bad };
                let message = if won {
                    "Predator killed (+80 hunger)"
                } else {
                    "Predator won (+0 hunger)"
                };
                view.push_log(message, tone);
            }
            EffectCue::HintShown => {
                view.hint_visible = true;
                view.push_log("Whistle [Space] when you hear whispers.", Tone::Eerie);
            }
            EffectCue::HintHidden => view.hint_visible = false,
        }
    }
}

impl SceneSink for ViewHandle {
    fn on_win(&mut self) {
        let mut view = self.0.borrow_mut();
        view.ending = Some(Ending::Sunrise);
        view.whisper = None;
        view.push_log("The sun rises. You made it.", Tone::Good);
    }

    fn on_lose(&mut self, cause: Stat) {
        let mut view = self.0.borrow_mut();
        view.ending = Some(Ending::Lost(cause));
        view.whisper = None;
        view.push_log(
            format!("Your {} ran out.", cause.name().to_lowercase()),
            Tone::Bad,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::core::simulation::Simulation;
    use crate::core::sinks::Sinks;
    use crate::core::tick::TickInput;

    fn attach(view: &ViewHandle) -> Sinks {
        Sinks::new()
            .with_display(view.clone())
            .with_effects(view.clone())
            .with_scene(view.clone())
    }

    #[test]
    fn test_log_is_capped() {
        let mut view = CampView::default();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            view.push_log(format!("line {}", i), Tone::Neutral);
        }
        assert_eq!(view.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(view.log.back().map(|e| e.message.as_str()), Some("line 59"));
    }

    #[test]
    fn test_view_follows_a_night() {
        let view = ViewHandle::default();
        let mut sinks = attach(&view);
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 3);

        sinks.deliver(&sim.tick(0.1, TickInput::default()));
        assert!(view.borrow().frame.is_some());

        let events = sim.open_explore_menu().unwrap();
        view.borrow_mut().record_command(&events);
        sinks.dispatch(&events);
        sinks.deliver(&sim.tick(0.1, TickInput::default()));
        assert_eq!(view.borrow().away_sanity, Some(1.0));
        assert!(view.borrow().log.back().unwrap().message.contains("cost"));
    }

    #[test]
    fn test_loss_recorded() {
        let view = ViewHandle::default();
        let mut sinks = attach(&view);
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 4);
        sim.adjust(Stat::Hunger, -100.0);
        sinks.deliver(&sim.tick(0.1, TickInput::default()));
        assert_eq!(view.borrow().ending, Some(Ending::Lost(Stat::Hunger)));
    }
}
