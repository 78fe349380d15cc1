//! Gesture interaction engine
//!
//! Turns one frame of detected hands into discrete input actions. All state
//! that survives between frames lives on [`InteractionEngine`]: the typed
//! text, three debounce timers, the current mode and the previous palm
//! height used for scroll deltas.
//!
//! ## Frame order
//!
//! 1. Every cooldown advances by one frame (also when no hand is visible).
//! 2. The current mode's logic runs over the hands in detector order.
//! 3. Any action that fires re-arms its cooldown at the full duration.
//!
//! When two hands compete for the same debounced action in one frame, the
//! first hand in detector order wins and the re-armed cooldown blocks the
//! rest.

pub mod cooldown;
mod keyboard;
mod pointer;

pub use cooldown::Cooldown;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::landmarks::Hand;
use crate::layout::Layout;
use crate::mode::{Mode, ModeController};

/// Discrete effect requested from the desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Type a literal character.
    KeyPress { key: char },
    Space,
    Backspace,
    /// Move the pointer to absolute screen coordinates.
    PointerMove { x: f32, y: f32 },
    Click,
    /// Scroll; positive `dy` scrolls up (hand moved up).
    Scroll { dx: i32, dy: i32 },
    /// Open a URL in the default browser.
    Launch { url: String },
    /// Close every process whose name matches one of `process_names`.
    Terminate { process_names: Vec<String> },
}

/// Rendering hint for a key on the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// A fingertip is over the key at this layout index.
    Hover(usize),
    /// The key at this layout index fired this frame.
    Pressed(usize),
}

/// Everything one frame produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    pub actions: Vec<Action>,
    pub highlights: Vec<Highlight>,
    /// Mode after the frame was processed.
    pub mode: Mode,
}

/// Thresholds and geometry the engine works with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub pinch_threshold: f32,
    pub typing_cooldown: u32,
    pub click_cooldown: u32,
    pub exit_cooldown: u32,
    pub scroll_sensitivity: f32,
    pub scroll_deadzone: f32,
    pub frame_width: f32,
    pub frame_height: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub browser_process_names: Vec<String>,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pinch_threshold: config.gestures.pinch_threshold,
            typing_cooldown: config.gestures.typing_cooldown,
            click_cooldown: config.gestures.click_cooldown,
            exit_cooldown: config.gestures.exit_cooldown,
            scroll_sensitivity: config.gestures.scroll_sensitivity,
            scroll_deadzone: config.gestures.scroll_deadzone,
            frame_width: config.capture.frame_width,
            frame_height: config.capture.frame_height,
            screen_width: config.screen.width,
            screen_height: config.screen.height,
            browser_process_names: config.browser.process_names.clone(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// The per-frame gesture state machine.
pub struct InteractionEngine {
    layout: Layout,
    settings: EngineSettings,
    mode: ModeController,
    text: String,
    typing: Cooldown,
    click: Cooldown,
    exit: Cooldown,
    /// Palm height seen in the previous pointer-mode frame, if that frame had a hand.
    previous_palm_y: Option<f32>,
}

impl InteractionEngine {
    pub fn new(layout: Layout, settings: EngineSettings) -> Self {
        Self {
            typing: Cooldown::new(settings.typing_cooldown),
            click: Cooldown::new(settings.click_cooldown),
            exit: Cooldown::new(settings.exit_cooldown),
            layout,
            settings,
            mode: ModeController::new(),
            text: String::new(),
            previous_palm_y: None,
        }
    }

    /// Engine with the standard layout and default settings.
    pub fn with_defaults() -> Self {
        let config = Config::default();
        Self::new(
            Layout::standard(&config.browser.url),
            EngineSettings::from_config(&config),
        )
    }

    /// Process one frame of detected hands.
    pub fn process_frame(&mut self, hands: &[Hand]) -> FrameOutcome {
        self.typing.tick();
        self.click.tick();
        self.exit.tick();

        let mut outcome = FrameOutcome::default();
        match self.mode.mode() {
            Mode::Keyboard => self.process_keyboard(hands, &mut outcome),
            Mode::Pointer => self.process_pointer(hands, &mut outcome),
        }
        outcome.mode = self.mode.mode();

        for action in &outcome.actions {
            if !matches!(action, Action::PointerMove { .. }) {
                tracing::debug!("Gesture action: {:?}", action);
            }
        }

        outcome
    }

    /// Forget everything typed so far.
    pub fn clear_text(&mut self) {
        if !self.text.is_empty() {
            tracing::debug!("Clearing {} typed characters", self.text.chars().count());
        }
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn typing_cooldown(&self) -> u32 {
        self.typing.remaining()
    }

    pub fn click_cooldown(&self) -> u32 {
        self.click.remaining()
    }

    pub fn exit_cooldown(&self) -> u32 {
        self.exit.remaining()
    }

    pub fn previous_palm_y(&self) -> Option<f32> {
        self.previous_palm_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::testing::HandBuilder;

    #[test]
    fn test_new_engine_state() {
        let engine = InteractionEngine::with_defaults();
        assert_eq!(engine.mode(), Mode::Keyboard);
        assert_eq!(engine.text(), "");
        assert_eq!(engine.typing_cooldown(), 0);
        assert_eq!(engine.click_cooldown(), 0);
        assert_eq!(engine.exit_cooldown(), 0);
        assert_eq!(engine.previous_palm_y(), None);
    }

    #[test]
    fn test_empty_frame_emits_nothing() {
        let mut engine = InteractionEngine::with_defaults();
        let outcome = engine.process_frame(&[]);
        assert!(outcome.actions.is_empty());
        assert!(outcome.highlights.is_empty());
        assert_eq!(outcome.mode, Mode::Keyboard);
    }

    #[test]
    fn test_empty_frames_count_down_cooldown() {
        let mut engine = InteractionEngine::with_defaults();
        let press = HandBuilder::at(0.0, 700.0).pinch_at(75.0, 75.0, 10.0).build();
        engine.process_frame(&[press]);
        assert_eq!(engine.typing_cooldown(), 10);

        for expected in (0..10).rev() {
            let outcome = engine.process_frame(&[]);
            assert!(outcome.actions.is_empty());
            assert_eq!(engine.typing_cooldown(), expected);
        }

        engine.process_frame(&[]);
        assert_eq!(engine.typing_cooldown(), 0);
    }

    #[test]
    fn test_clear_text() {
        let mut engine = InteractionEngine::with_defaults();
        let press = HandBuilder::at(0.0, 700.0).pinch_at(75.0, 75.0, 10.0).build();
        engine.process_frame(&[press]);
        assert_eq!(engine.text(), "Q");

        engine.clear_text();
        assert_eq!(engine.text(), "");
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.gestures.pinch_threshold = 42.0;
        config.screen.width = 2560.0;

        let settings = EngineSettings::from_config(&config);
        assert_eq!(settings.pinch_threshold, 42.0);
        assert_eq!(settings.screen_width, 2560.0);
        assert_eq!(settings.typing_cooldown, 10);
    }

    #[test]
    fn test_action_serialisation() {
        let json = serde_json::to_string(&Action::KeyPress { key: 'Q' }).unwrap();
        assert_eq!(json, r#"{"type":"key_press","key":"Q"}"#);
    }
}
