//! Operator keys read from the physical keyboard
//!
//! `Q` stops the program and `C` clears the typed text. Keys are polled once
//! per frame and act on the press edge only, so holding a key does not
//! repeat it.
//!
//! The keyboard state is read system-wide and airkeys has no window to
//! focus, so these keys fire whichever application has focus: pressing `Q`
//! or `C` on the physical keyboard in any other program also quits airkeys
//! or clears its text.

use std::collections::HashSet;

use device_query::{DeviceQuery, DeviceState, Keycode};

/// Request from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    ClearText,
}

impl Control {
    fn from_keycode(key: Keycode) -> Option<Self> {
        match key {
            Keycode::Q => Some(Self::Quit),
            Keycode::C => Some(Self::ClearText),
            _ => None,
        }
    }
}

/// Edge detector over the set of held keys.
#[derive(Debug, Default)]
pub struct KeyEdges {
    previous: HashSet<Keycode>,
}

impl KeyEdges {
    /// Controls whose key went down since the last update.
    pub fn update(&mut self, keys: HashSet<Keycode>) -> Vec<Control> {
        let mut controls: Vec<Control> = keys
            .difference(&self.previous)
            .filter_map(|key| Control::from_keycode(*key))
            .collect();
        // Quit first so a clear in the same poll never outlives it
        controls.sort_by_key(|control| *control != Control::Quit);
        self.previous = keys;
        controls
    }
}

/// Polls the keyboard for operator controls.
pub struct ControlKeys {
    device: Option<DeviceState>,
    edges: KeyEdges,
}

impl ControlKeys {
    pub fn new() -> Self {
        #[cfg(target_os = "linux")]
        let device = DeviceState::checked_new();

        #[cfg(not(target_os = "linux"))]
        let device = Some(DeviceState::new());

        if device.is_none() {
            tracing::warn!("Keyboard polling unavailable, quit and clear keys disabled");
        }

        Self {
            device,
            edges: KeyEdges::default(),
        }
    }

    /// Controls pressed since the previous poll.
    pub fn poll(&mut self) -> Vec<Control> {
        let Some(device) = &self.device else {
            return Vec::new();
        };
        let keys: HashSet<Keycode> = device.get_keys().into_iter().collect();
        self.edges.update(keys)
    }
}

impl Default for ControlKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[Keycode]) -> HashSet<Keycode> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_press_fires_once() {
        let mut edges = KeyEdges::default();
        assert_eq!(edges.update(keys(&[Keycode::C])), vec![Control::ClearText]);
        assert!(edges.update(keys(&[Keycode::C])).is_empty());
        assert!(edges.update(keys(&[])).is_empty());
        assert_eq!(edges.update(keys(&[Keycode::C])), vec![Control::ClearText]);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut edges = KeyEdges::default();
        assert!(edges.update(keys(&[Keycode::A, Keycode::Space])).is_empty());
    }

    #[test]
    fn test_quit_reported_first() {
        let mut edges = KeyEdges::default();
        let controls = edges.update(keys(&[Keycode::C, Keycode::Q]));
        assert_eq!(controls, vec![Control::Quit, Control::ClearText]);
    }

    #[test]
    fn test_held_key_does_not_block_new_key() {
        let mut edges = KeyEdges::default();
        edges.update(keys(&[Keycode::C]));
        let controls = edges.update(keys(&[Keycode::C, Keycode::Q]));
        assert_eq!(controls, vec![Control::Quit]);
    }
}
