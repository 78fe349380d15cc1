//! Pointer mode: index fingertip drives the cursor, pinch clicks, raised
//! middle and ring fingers scroll, and two raised palms leave the mode.

use super::{Action, FrameOutcome, InteractionEngine};
use crate::landmarks::{Hand, Point};
use crate::mode::ModeEvent;

/// Linear map from `value` in `[0, from_max]` to `[0, to_max]`, clamping at
/// the ends.
fn interpolate(value: f32, from_max: f32, to_max: f32) -> f32 {
    if from_max <= 0.0 {
        return 0.0;
    }
    value.clamp(0.0, from_max) / from_max * to_max
}

impl InteractionEngine {
    pub(super) fn process_pointer(&mut self, hands: &[Hand], outcome: &mut FrameOutcome) {
        if self.is_exit_gesture(hands) {
            self.leave_pointer_mode(outcome);
            return;
        }

        if hands.is_empty() {
            self.previous_palm_y = None;
            return;
        }

        for hand in hands {
            let (x, y) = self.map_to_screen(hand.index_tip());
            outcome.actions.push(Action::PointerMove { x, y });

            if self.click.is_ready() && hand.pinch_distance() < self.settings.pinch_threshold {
                outcome.actions.push(Action::Click);
                self.click.trigger();
            }

            self.scroll_step(hand, outcome);
        }
    }

    /// Exactly two hands, both with index and middle fingers raised.
    fn is_exit_gesture(&self, hands: &[Hand]) -> bool {
        hands.len() == 2 && self.exit.is_ready() && hands.iter().all(Hand::is_palm_up)
    }

    fn leave_pointer_mode(&mut self, outcome: &mut FrameOutcome) {
        if self.mode.process_event(ModeEvent::ExitGesture).is_none() {
            return;
        }
        outcome.actions.push(Action::Terminate {
            process_names: self.settings.browser_process_names.clone(),
        });
        self.text.clear();
        self.exit.trigger();
        self.previous_palm_y = None;
    }

    fn scroll_step(&mut self, hand: &Hand, outcome: &mut FrameOutcome) {
        let palm_y = hand.palm_y();

        if let Some(previous) = self.previous_palm_y {
            let movement = previous - palm_y;
            if hand.is_scroll_pose() && movement.abs() > self.settings.scroll_deadzone {
                let amount = (movement * self.settings.scroll_sensitivity).floor() as i32;
                outcome.actions.push(Action::Scroll { dx: 0, dy: amount });
            }
        }

        self.previous_palm_y = Some(palm_y);
    }

    /// Capture-frame pixel to screen pixel.
    pub fn map_to_screen(&self, point: Point) -> (f32, f32) {
        let s = &self.settings;
        (
            interpolate(point.x, s.frame_width, s.screen_width),
            interpolate(point.y, s.frame_height, s.screen_height),
        )
    }
}
