//! Keyboard mode: hover to select a key, pinch to type it.

use super::{Action, FrameOutcome, Highlight, InteractionEngine};
use crate::landmarks::Hand;
use crate::layout::ButtonAction;
use crate::mode::ModeEvent;

impl InteractionEngine {
    pub(super) fn process_keyboard(&mut self, hands: &[Hand], outcome: &mut FrameOutcome) {
        for hand in hands {
            let Some((index, button)) = self.layout.hit_test(hand.index_tip()) else {
                continue;
            };
            outcome.highlights.push(Highlight::Hover(index));

            if !self.typing.is_ready() || hand.pinch_distance() >= self.settings.pinch_threshold
            {
                continue;
            }

            let action = button.action.clone();
            outcome.highlights.push(Highlight::Pressed(index));
            self.typing.trigger();

            if self.press(action, outcome) {
                // The rest of the frame belongs to the old mode
                break;
            }
        }
    }

    /// Apply a key press. Returns true when the key switched modes.
    fn press(&mut self, action: ButtonAction, outcome: &mut FrameOutcome) -> bool {
        match action {
            ButtonAction::Char(key) => {
                self.text.push(key);
                outcome.actions.push(Action::KeyPress { key });
            }
            ButtonAction::Space => {
                self.text.push(' ');
                outcome.actions.push(Action::Space);
            }
            ButtonAction::Backspace => {
                self.text.pop();
                outcome.actions.push(Action::Backspace);
            }
            ButtonAction::ModeSwitch { url } => {
                outcome.actions.push(Action::Launch { url });
                if self.mode.process_event(ModeEvent::SwitchKeyPressed).is_some() {
                    self.previous_palm_y = None;
                    return true;
                }
            }
        }
        false
    }
}
