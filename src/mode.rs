//! Keyboard / pointer mode state machine
//!
//! ```text
//!              mode-switch key pressed
//! ┌──────────┐ ──────────────────────────► ┌─────────┐
//! │ KEYBOARD │                             │ POINTER │
//! └──────────┘ ◄────────────────────────── └─────────┘
//!              both palms raised (2 hands)
//! ```
//!
//! Entering pointer mode launches the browser; leaving it closes the
//! browser again and clears the typed text.

use serde::{Deserialize, Serialize};

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fingertip hovers over on-screen keys, pinch types.
    #[default]
    Keyboard,
    /// Fingertip drives the cursor, pinch clicks, raised fingers scroll.
    Pointer,
}

impl Mode {
    /// Returns a human-readable description of the mode
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Keyboard => "Virtual keyboard",
            Mode::Pointer => "Mouse control",
        }
    }

    /// On-screen help lines shown while in this mode.
    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            Mode::Keyboard => &[],
            Mode::Pointer => &[
                "Mouse Control Mode",
                "Show both palms to close Edge",
                "Hold up middle + ring fingers to scroll",
            ],
        }
    }
}

/// Events that can trigger a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// The mode-switch key was pressed.
    SwitchKeyPressed,
    /// Two raised palms were shown.
    ExitGesture,
}

/// A completed mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub event: ModeEvent,
}

/// Owns the current mode and applies transitions atomically.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Process an event and return the transition if one happened
    ///
    /// Returns `None` if the event is not valid for the current mode.
    pub fn process_event(&mut self, event: ModeEvent) -> Option<Transition> {
        let to = match (self.mode, event) {
            (Mode::Keyboard, ModeEvent::SwitchKeyPressed) => Mode::Pointer,
            (Mode::Pointer, ModeEvent::ExitGesture) => Mode::Keyboard,
            _ => return None,
        };

        let transition = Transition {
            from: self.mode,
            to,
            event,
        };
        self.mode = to;

        tracing::info!(
            "Mode transition: {:?} -> {:?} ({:?})",
            transition.from,
            transition.to,
            transition.event
        );

        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_keyboard() {
        let controller = ModeController::new();
        assert_eq!(controller.mode(), Mode::Keyboard);
    }

    #[test]
    fn test_switch_key_enters_pointer() {
        let mut controller = ModeController::new();
        let transition = controller.process_event(ModeEvent::SwitchKeyPressed);

        assert_eq!(
            transition,
            Some(Transition {
                from: Mode::Keyboard,
                to: Mode::Pointer,
                event: ModeEvent::SwitchKeyPressed,
            })
        );
        assert_eq!(controller.mode(), Mode::Pointer);
    }

    #[test]
    fn test_exit_gesture_returns_to_keyboard() {
        let mut controller = ModeController::new();
        controller.process_event(ModeEvent::SwitchKeyPressed);
        let transition = controller.process_event(ModeEvent::ExitGesture);

        assert_eq!(transition.map(|t| t.to), Some(Mode::Keyboard));
        assert_eq!(controller.mode(), Mode::Keyboard);
    }

    #[test]
    fn test_invalid_events_are_ignored() {
        let mut controller = ModeController::new();
        assert!(controller.process_event(ModeEvent::ExitGesture).is_none());
        assert_eq!(controller.mode(), Mode::Keyboard);

        controller.process_event(ModeEvent::SwitchKeyPressed);
        assert!(controller
            .process_event(ModeEvent::SwitchKeyPressed)
            .is_none());
        assert_eq!(controller.mode(), Mode::Pointer);
    }

    #[test]
    fn test_instructions() {
        assert!(Mode::Keyboard.instructions().is_empty());
        assert_eq!(Mode::Pointer.instructions().len(), 3);
        assert_eq!(Mode::Pointer.instructions()[0], "Mouse Control Mode");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::Pointer).unwrap(), "\"pointer\"");
    }
}
