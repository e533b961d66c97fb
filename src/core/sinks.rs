//! Collaborators the simulation reports to.
//!
//! The simulation itself never calls these; it returns events and display
//! updates, and [`Sinks`] fans them out to whichever collaborators are
//! attached. A missing collaborator is simply skipped.

use crate::core::tick::{DisplayFrame, DisplayUpdate, NightEvent, TickResult};
use crate::exploration::types::{FoodFind, WoodFind};
use crate::survival::resources::Stat;

/// Receives the camp readout.
pub trait DisplaySink {
    /// Called once per camp tick with freshly derived values.
    fn show(&mut self, frame: &DisplayFrame);

    /// Called once per tick while away from camp.
    fn sanity_telemetry(&mut self, _percent: f64) {}
}

/// Receives one-shot audio/visual cues.
pub trait EffectSink {
    fn cue(&mut self, cue: EffectCue);
}

/// Receives the end of the night. At most one call per run.
pub trait SceneSink {
    fn on_win(&mut self);
    fn on_lose(&mut self, cause: Stat);
}

/// Fire-and-forget effect notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCue {
    WhisperTriggered { voice: u32 },
    WhistleSuccess,
    /// A whistle with nothing to answer.
    Whistle,
    WhisperMissed,
    WoodFound(WoodFind),
    FoodFound(FoodFind),
    PredatorEncountered,
    PredatorResult { won: bool },
    HintShown,
    HintHidden,
}

impl NightEvent {
    /// The effect this event should trigger, if any.
    pub fn effect_cue(&self) -> Option<EffectCue> {
        match self {
            NightEvent::WhisperTriggered { voice } => {
                Some(EffectCue::WhisperTriggered { voice: *voice })
            }
            NightEvent::WhistleSuccess { .. } => Some(EffectCue::WhistleSuccess),
            NightEvent::Whistle => Some(EffectCue::Whistle),
            NightEvent::WhisperMissed { .. } => Some(EffectCue::WhisperMissed),
            NightEvent::WoodFound { find, .. } => Some(EffectCue::WoodFound(*find)),
            NightEvent::FoodFound { find, .. } => Some(EffectCue::FoodFound(*find)),
            NightEvent::PredatorEncountered { .. } => Some(EffectCue::PredatorEncountered),
            NightEvent::PredatorFought { fight, .. } => {
                Some(EffectCue::PredatorResult { won: fight.won })
            }
            NightEvent::WhistleHintShown => Some(EffectCue::HintShown),
            NightEvent::WhistleHintHidden => Some(EffectCue::HintHidden),
            NightEvent::ExploreMenuOpened { .. }
            | NightEvent::ExploreMenuClosed
            | NightEvent::SearchStarted { .. }
            | NightEvent::ReturnedToCamp { .. }
            | NightEvent::NightWon
            | NightEvent::NightLost { .. } => None,
        }
    }
}

/// The attached collaborators.
#[derive(Default)]
pub struct Sinks {
    display: Option<Box<dyn DisplaySink>>,
    effects: Option<Box<dyn EffectSink>>,
    scene: Option<Box<dyn SceneSink>>,
    scene_notified: bool,
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, sink: impl DisplaySink + 'static) -> Self {
        self.display = Some(Box::new(sink));
        self
    }

    pub fn with_effects(mut self, sink: impl EffectSink + 'static) -> Self {
        self.effects = Some(Box::new(sink));
        self
    }

    pub fn with_scene(mut self, sink: impl SceneSink + 'static) -> Self {
        self.scene = Some(Box::new(sink));
        self
    }

    /// Pushes a tick's display update, then its events.
    pub fn deliver(&mut self, result: &TickResult) {
        if let (Some(display), Some(update)) = (self.display.as_mut(), result.display.as_ref()) {
            match update {
                DisplayUpdate::Frame(frame) => display.show(frame),
                DisplayUpdate::SanityOnly(percent) => display.sanity_telemetry(*percent),
            }
        }
        self.dispatch(&result.events);
    }

    /// Routes events from a tick or a command.
    pub fn dispatch(&mut self, events: &[NightEvent]) {
        for event in events {
            if let (Some(effects), Some(cue)) = (self.effects.as_mut(), event.effect_cue()) {
                effects.cue(cue);
            }

            match event {
                NightEvent::NightWon if !self.scene_notified => {
                    self.scene_notified = true;
                    if let Some(scene) = self.scene.as_mut() {
                        scene.on_win();
                    }
                }
                NightEvent::NightLost { cause } if !self.scene_notified => {
                    self.scene_notified = true;
                    if let Some(scene) = self.scene.as_mut() {
                        scene.on_lose(*cause);
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::core::simulation::Simulation;
    use crate::core::tick::TickInput;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        frames: usize,
        telemetry: usize,
        cues: Vec<EffectCue>,
        wins: usize,
        losses: usize,
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Log>>);

    impl DisplaySink for Recorder {
        fn show(&mut self, _frame: &DisplayFrame) {
            self.0.borrow_mut().frames += 1;
        }

        fn sanity_telemetry(&mut self, _percent: f64) {
            self.0.borrow_mut().telemetry += 1;
        }
    }

    impl EffectSink for Recorder {
        fn cue(&mut self, cue: EffectCue) {
            self.0.borrow_mut().cues.push(cue);
        }
    }

    impl SceneSink for Recorder {
        fn on_win(&mut self) {
            self.0.borrow_mut().wins += 1;
        }

        fn on_lose(&mut self, _cause: Stat) {
            self.0.borrow_mut().losses += 1;
        }
    }

    fn attach(recorder: &Recorder) -> Sinks {
        Sinks::new()
            .with_display(recorder.clone())
            .with_effects(recorder.clone())
            .with_scene(recorder.clone())
    }

    #[test]
    fn test_missing_sinks_are_skipped() {
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 1);
        let mut sinks = Sinks::new();
        for _ in 0..2_000 {
            let result = sim.tick(0.1, TickInput::whistle());
            sinks.deliver(&result);
        }
        assert!(sim.is_over());
    }

    #[test]
    fn test_frames_and_telemetry_routed() {
        let recorder = Recorder::default();
        let mut sinks = attach(&recorder);
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 2);

        sinks.deliver(&sim.tick(0.1, TickInput::default()));
        sinks.dispatch(&sim.open_explore_menu().unwrap());
        sinks.deliver(&sim.tick(0.1, TickInput::default()));

        let log = recorder.0.borrow();
        assert_eq!(log.frames, 1);
        assert_eq!(log.telemetry, 1);
    }

    #[test]
    fn test_scene_notified_once() {
        let recorder = Recorder::default();
        let mut sinks = attach(&recorder);
        let won = [NightEvent::NightWon];
        sinks.dispatch(&won);
        sinks.dispatch(&won);
        sinks.dispatch(&[NightEvent::NightLost { cause: Stat::Fire }]);

        let log = recorder.0.borrow();
        assert_eq!(log.wins, 1);
        assert_eq!(log.losses, 0);
    }

    #[test]
    fn test_effect_cues() {
        let recorder = Recorder::default();
        let mut sinks = attach(&recorder);
        sinks.dispatch(&[
            NightEvent::WhisperTriggered { voice: 2 },
            NightEvent::ExploreMenuClosed,
            NightEvent::WoodFound {
                find: WoodFind::Log,
                fire_gained: 30.0,
            },
            NightEvent::Whistle,
        ]);

        let log = recorder.0.borrow();
        assert_eq!(
            log.cues,
            vec![
                EffectCue::WhisperTriggered { voice: 2 },
                EffectCue::WoodFound(WoodFind::Log),
                EffectCue::Whistle,
            ]
        );
    }
}
