//! Action sinks
//!
//! [`DesktopSink`] carries engine actions out on the real desktop: keys and
//! the mouse through enigo, the browser through the platform opener, and
//! process termination through sysinfo. [`RecordingSink`] only remembers what
//! it was asked to do.

use std::process::Command;
use std::thread::{self, JoinHandle};

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::{debug, info};

use crate::engine::Action;
pub use crate::error::SinkError;

/// Anything that can carry out engine actions.
pub trait ActionSink {
    fn dispatch(&mut self, action: &Action) -> Result<(), SinkError>;
}

/// Injects input into the focused application.
pub struct DesktopSink {
    enigo: Option<Enigo>,
}

impl DesktopSink {
    /// Connect to the input system.
    ///
    /// If injection is unavailable (no display, missing permissions) the sink
    /// still launches and terminates processes; input actions report
    /// [`SinkError::InputUnavailable`].
    pub fn new() -> Self {
        let enigo = match Enigo::new(&Settings::default()) {
            Ok(enigo) => Some(enigo),
            Err(e) => {
                tracing::warn!("Input injection unavailable: {}", e);
                None
            }
        };
        Self { enigo }
    }

    fn enigo(&mut self) -> Result<&mut Enigo, SinkError> {
        self.enigo
            .as_mut()
            .ok_or_else(|| SinkError::InputUnavailable("no input connection".to_string()))
    }

    fn tap(&mut self, key: Key) -> Result<(), SinkError> {
        self.enigo()?
            .key(key, Direction::Click)
            .map_err(|e| SinkError::Input(e.to_string()))
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSink for DesktopSink {
    fn dispatch(&mut self, action: &Action) -> Result<(), SinkError> {
        match action {
            Action::KeyPress { key } => self.tap(Key::Unicode(*key)),
            Action::Space => self.tap(Key::Space),
            Action::Backspace => self.tap(Key::Backspace),
            Action::PointerMove { x, y } => self
                .enigo()?
                .move_mouse(x.round() as i32, y.round() as i32, Coordinate::Abs)
                .map_err(|e| SinkError::Input(e.to_string())),
            Action::Click => self
                .enigo()?
                .button(Button::Left, Direction::Click)
                .map_err(|e| SinkError::Input(e.to_string())),
            Action::Scroll { dx, dy } => {
                let enigo = self.enigo()?;
                // enigo scrolls down for positive lengths
                if *dy != 0 {
                    enigo
                        .scroll(-dy, Axis::Vertical)
                        .map_err(|e| SinkError::Input(e.to_string()))?;
                }
                if *dx != 0 {
                    enigo
                        .scroll(*dx, Axis::Horizontal)
                        .map_err(|e| SinkError::Input(e.to_string()))?;
                }
                Ok(())
            }
            Action::Launch { url } => open_url(url),
            Action::Terminate { process_names } => {
                let killed = terminate_processes(process_names);
                info!("Terminated {} browser process(es)", killed);
                Ok(())
            }
        }
    }
}

/// Open `url` with the platform's default handler.
pub fn open_url(url: &str) -> Result<(), SinkError> {
    info!("Opening {}", url);

    #[cfg(target_os = "macos")]
    let command = {
        let mut command = Command::new("open");
        command.arg(url);
        command
    };

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    spawn_reaped(command, url).map(|_| ())
}

/// Start `command` without blocking and wait for it on a background thread,
/// so the exited opener never lingers as a zombie.
fn spawn_reaped(mut command: Command, target: &str) -> Result<JoinHandle<()>, SinkError> {
    let mut child = command.spawn().map_err(|source| SinkError::Launch {
        target: target.to_string(),
        source,
    })?;

    Ok(thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => debug!("Opener exited with {}", status),
        Ok(_) => {}
        Err(e) => debug!("Failed to wait for opener: {}", e),
    }))
}

/// Case-insensitive process name match.
pub fn matches_process_name(name: &str, targets: &[String]) -> bool {
    targets.iter().any(|target| target.eq_ignore_ascii_case(name))
}

/// Kill every running process whose name is in `names`.
///
/// Returns how many processes were signalled. Processes that vanish or
/// refuse to die are skipped.
pub fn terminate_processes(names: &[String]) -> usize {
    let mut system = sysinfo::System::new();
    system.refresh_processes();

    let mut killed = 0;
    for (pid, process) in system.processes() {
        if !matches_process_name(process.name(), names) {
            continue;
        }
        if process.kill() {
            killed += 1;
        } else {
            debug!("Could not terminate {} ({})", process.name(), pid);
        }
    }
    killed
}

/// Remembers every dispatched action.
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Vec<Action>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl ActionSink for RecordingSink {
    fn dispatch(&mut self, action: &Action) -> Result<(), SinkError> {
        self.actions.push(action.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_name_match_ignores_case() {
        let targets = vec!["msedge.exe".to_string(), "microsoft-edge".to_string()];
        assert!(matches_process_name("MSEdge.EXE", &targets));
        assert!(matches_process_name("microsoft-edge", &targets));
        assert!(!matches_process_name("msedgewebview2.exe", &targets));
        assert!(!matches_process_name("firefox", &targets));
    }

    #[test]
    fn test_no_targets_matches_nothing() {
        assert!(!matches_process_name("msedge", &[]));
    }

    #[test]
    fn test_terminate_unknown_process_is_noop() {
        let killed = terminate_processes(&["airkeys-no-such-process".to_string()]);
        assert_eq!(killed, 0);
    }

    #[test]
    fn test_missing_opener_is_launch_error() {
        let result = spawn_reaped(Command::new("airkeys-no-such-opener"), "https://example.com");
        assert!(matches!(result, Err(SinkError::Launch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_is_waited_for() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 0"]);
        let reaper = spawn_reaped(command, "sh").unwrap();
        // The reaper thread only finishes once the child has been waited on
        reaper.join().unwrap();
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.dispatch(&Action::KeyPress { key: 'A' }).unwrap();
        sink.dispatch(&Action::Click).unwrap();

        assert_eq!(sink.actions(), &[Action::KeyPress { key: 'A' }, Action::Click]);
    }
}
