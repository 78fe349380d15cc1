//! Presentation of the engine state
//!
//! The loop hands a [`FrameView`] to a [`Renderer`] after every frame. The
//! bundled [`LogRenderer`] writes changes to the log; a graphical overlay can
//! implement the same trait.

use crate::engine::{FrameOutcome, Highlight};
use crate::layout::Layout;
use crate::mode::Mode;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub layout: &'a Layout,
    pub highlights: &'a [Highlight],
    pub mode: Mode,
    pub text: &'a str,
    /// Help lines for the current mode, empty in keyboard mode.
    pub instructions: &'static [&'static str],
}

impl<'a> FrameView<'a> {
    pub fn new(layout: &'a Layout, outcome: &'a FrameOutcome, text: &'a str) -> Self {
        Self {
            layout,
            highlights: &outcome.highlights,
            mode: outcome.mode,
            text,
            instructions: outcome.mode.instructions(),
        }
    }

    /// Labels of the keys pressed this frame.
    pub fn pressed_labels(&self) -> Vec<&'a str> {
        self.labels(|h| match h {
            Highlight::Pressed(i) => Some(*i),
            Highlight::Hover(_) => None,
        })
    }

    /// Labels of the keys under a fingertip this frame.
    pub fn hovered_labels(&self) -> Vec<&'a str> {
        self.labels(|h| match h {
            Highlight::Hover(i) => Some(*i),
            Highlight::Pressed(_) => None,
        })
    }

    fn labels(&self, pick: impl Fn(&Highlight) -> Option<usize>) -> Vec<&'a str> {
        let layout = self.layout;
        self.highlights
            .iter()
            .filter_map(pick)
            .filter_map(|i| layout.get(i))
            .map(|button| button.label.as_str())
            .collect()
    }
}

pub trait Renderer {
    fn present(&mut self, view: &FrameView<'_>);
}

/// Logs the view whenever the typed text, the mode or the pressed keys
/// change.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_text: String,
    last_mode: Mode,
    presented: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of views that produced output.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, view: &FrameView<'_>) {
        let pressed = view.pressed_labels();
        let changed =
            view.text != self.last_text || view.mode != self.last_mode || !pressed.is_empty();
        if !changed {
            return;
        }

        if view.mode != self.last_mode {
            for line in view.instructions {
                tracing::info!("{}", line);
            }
        }

        tracing::debug!(
            mode = view.mode.description(),
            pressed = ?pressed,
            "Text: {:?}",
            view.text
        );

        self.last_text.clear();
        self.last_text.push_str(view.text);
        self.last_mode = view.mode;
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::standard("https://www.youtube.com")
    }

    #[test]
    fn test_view_labels() {
        let layout = layout();
        let outcome = FrameOutcome {
            highlights: vec![Highlight::Hover(0), Highlight::Pressed(0), Highlight::Hover(32)],
            ..Default::default()
        };
        let view = FrameView::new(&layout, &outcome, "Q");

        assert_eq!(view.pressed_labels(), vec!["Q"]);
        assert_eq!(view.hovered_labels(), vec!["Q", "YOUTUBE"]);
        assert!(view.instructions.is_empty());
    }

    #[test]
    fn test_pointer_view_has_instructions() {
        let layout = layout();
        let outcome = FrameOutcome {
            mode: Mode::Pointer,
            ..Default::default()
        };
        let view = FrameView::new(&layout, &outcome, "");
        assert_eq!(view.instructions.len(), 3);
        assert_eq!(view.instructions[0], "Mouse Control Mode");
    }

    #[test]
    fn test_log_renderer_only_reports_changes() {
        let layout = layout();
        let mut renderer = LogRenderer::new();
        let idle = FrameOutcome::default();

        renderer.present(&FrameView::new(&layout, &idle, ""));
        assert_eq!(renderer.presented(), 0);

        let typed = FrameOutcome {
            highlights: vec![Highlight::Hover(0), Highlight::Pressed(0)],
            ..Default::default()
        };
        renderer.present(&FrameView::new(&layout, &typed, "Q"));
        assert_eq!(renderer.presented(), 1);

        renderer.present(&FrameView::new(&layout, &idle, "Q"));
        assert_eq!(renderer.presented(), 1);

        let pointer = FrameOutcome {
            mode: Mode::Pointer,
            ..Default::default()
        };
        renderer.present(&FrameView::new(&layout, &pointer, "Q"));
        assert_eq!(renderer.presented(), 2);
    }
}
