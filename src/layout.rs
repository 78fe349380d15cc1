//! On-screen key layout
//!
//! The keyboard is a fixed grid of character keys with a row of wide special
//! keys underneath. Positions are in capture-frame pixels so a fingertip
//! landmark can be hit-tested directly. The layout is built once at startup
//! and never changes.

use crate::landmarks::Point;

/// Horizontal and vertical distance between neighbouring key origins.
pub const KEY_PITCH: f32 = 100.0;

/// Side length of a regular key.
pub const KEY_SIZE: f32 = 85.0;

/// Offset of the first key from the frame's top-left corner.
pub const GRID_ORIGIN: f32 = 50.0;

/// Label of the key that switches to pointer mode.
pub const MODE_SWITCH_LABEL: &str = "YOUTUBE";

/// Character rows, top to bottom.
const KEY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL;", "ZXCVBNM,./"];

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `point` lies strictly inside the rectangle (edges excluded).
    pub fn contains(&self, point: Point) -> bool {
        self.x < point.x
            && point.x < self.x + self.width
            && self.y < point.y
            && point.y < self.y + self.height
    }

    /// Whether the interiors of two rectangles intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// What pressing a key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Type a literal character.
    Char(char),
    Space,
    Backspace,
    /// Open `url` and switch to pointer mode.
    ModeSwitch { url: String },
}

/// A single key on the virtual keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Text drawn on the key.
    pub label: String,
    pub rect: Rect,
    pub action: ButtonAction,
}

impl Button {
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}

/// Ordered, immutable set of keys.
#[derive(Debug, Clone)]
pub struct Layout {
    buttons: Vec<Button>,
}

impl Layout {
    /// Build the standard layout. `launch_url` is attached to the
    /// mode-switch key.
    pub fn standard(launch_url: &str) -> Self {
        let mut buttons = Vec::new();

        for (row, keys) in KEY_ROWS.iter().enumerate() {
            for (col, ch) in keys.chars().enumerate() {
                buttons.push(Button {
                    label: ch.to_string(),
                    rect: Rect::new(
                        KEY_PITCH * col as f32 + GRID_ORIGIN,
                        KEY_PITCH * row as f32 + GRID_ORIGIN,
                        KEY_SIZE,
                        KEY_SIZE,
                    ),
                    action: ButtonAction::Char(ch),
                });
            }
        }

        // Special keys sit one pitch below the last character row
        let special_y = GRID_ORIGIN + KEY_PITCH * KEY_ROWS.len() as f32;
        buttons.push(Button {
            label: "SPACE".to_string(),
            rect: Rect::new(50.0, special_y, 250.0, KEY_SIZE),
            action: ButtonAction::Space,
        });
        buttons.push(Button {
            label: "BACKSPACE".to_string(),
            rect: Rect::new(350.0, special_y, 400.0, KEY_SIZE),
            action: ButtonAction::Backspace,
        });
        buttons.push(Button {
            label: MODE_SWITCH_LABEL.to_string(),
            rect: Rect::new(850.0, special_y, 400.0, KEY_SIZE),
            action: ButtonAction::ModeSwitch {
                url: launch_url.to_string(),
            },
        });

        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    /// First key (in layout order) containing `point`, with its index.
    pub fn hit_test(&self, point: Point) -> Option<(usize, &Button)> {
        self.buttons
            .iter()
            .enumerate()
            .find(|(_, button)| button.contains(point))
    }

    pub fn find_label(&self, label: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.label == label)
    }
}
