//! Landmark sources
//!
//! A source yields one frame of detected hands per call. The production
//! source is an external detector process that owns the camera and prints one
//! JSON object per frame on stdout:
//!
//! ```json
//! {"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":0,"y":0,"z":0}, ...]}],"error":null}
//! ```
//!
//! Coordinates are capture-frame pixels, already mirrored for display.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;

use crate::config::DetectorConfig;
pub use crate::error::SourceError;
use crate::landmarks::{Hand, Point};

/// Anything that can produce frames of hands.
pub trait LandmarkSource {
    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<Vec<Hand>, SourceError>;
}

#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    hands: Vec<WireHand>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireHand {
    #[serde(default)]
    handedness: Option<String>,
    #[serde(default = "full_confidence")]
    score: f32,
    landmarks: Vec<Point>,
}

fn full_confidence() -> f32 {
    1.0
}

/// Which detected hands are passed on to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFilter {
    pub min_confidence: f32,
    pub max_hands: usize,
}

impl HandFilter {
    pub fn from_config(config: &DetectorConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            max_hands: config.max_hands,
        }
    }
}

impl Default for HandFilter {
    fn default() -> Self {
        Self::from_config(&DetectorConfig::default())
    }
}

/// Parse one detector line into the hands that pass `filter`.
///
/// A frame that reports a detector error (the camera could not deliver a
/// frame) fails with [`SourceError::Acquisition`].
pub fn parse_frame(line: &str, filter: &HandFilter) -> Result<Vec<Hand>, SourceError> {
    let frame: WireFrame = serde_json::from_str(line)?;

    if let Some(error) = frame.error {
        tracing::error!("Detector reported an error: {}", error);
        return Err(SourceError::Acquisition(error));
    }

    let mut hands = Vec::with_capacity(filter.max_hands);
    for wire in frame.hands {
        if hands.len() >= filter.max_hands {
            break;
        }
        if wire.score < filter.min_confidence {
            tracing::trace!("Dropping hand with score {:.2}", wire.score);
            continue;
        }
        match Hand::from_points(&wire.landmarks) {
            Ok(mut hand) => {
                hand.handedness = wire.handedness;
                hand.score = wire.score;
                hands.push(hand);
            }
            Err(e) => tracing::warn!("Dropping malformed hand: {}", e),
        }
    }

    Ok(hands)
}

/// Frames read line by line from any buffered reader.
pub struct JsonLinesSource<R> {
    reader: R,
    filter: HandFilter,
    line: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R, filter: HandFilter) -> Self {
        Self {
            reader,
            filter,
            line: String::new(),
        }
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Vec<Hand>, SourceError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(SourceError::EndOfStream);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            return parse_frame(line, &self.filter);
        }
    }
}

/// External hand detector running as a child process.
///
/// The child is killed when this value is dropped.
pub struct DetectorProcess {
    child: Child,
    frames: JsonLinesSource<BufReader<ChildStdout>>,
}

impl DetectorProcess {
    pub fn spawn(config: &DetectorConfig) -> Result<Self, SourceError> {
        tracing::info!(
            "Starting hand detector: {} {}",
            config.program,
            config.args.join(" ")
        );

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| SourceError::Spawn {
                program: config.program.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SourceError::NoStdout);
        };

        Ok(Self {
            child,
            frames: JsonLinesSource::new(BufReader::new(stdout), HandFilter::from_config(config)),
        })
    }
}

impl LandmarkSource for DetectorProcess {
    fn next_frame(&mut self) -> Result<Vec<Hand>, SourceError> {
        self.frames.next_frame()
    }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) => tracing::debug!("Detector already exited: {}", status),
            _ => {
                if let Err(e) = self.child.kill() {
                    tracing::warn!("Failed to stop detector: {}", e);
                }
                let _ = self.child.wait();
                tracing::info!("Hand detector stopped");
            }
        }
    }
}

/// Pre-recorded frames, replayed in order.
///
/// Runs out with [`SourceError::EndOfStream`] like a detector that exits.
#[derive(Debug, Default)]
pub struct ReplaySource {
    frames: VecDeque<Vec<Hand>>,
}

impl ReplaySource {
    pub fn new(frames: impl IntoIterator<Item = Vec<Hand>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Vec<Hand>, SourceError> {
        self.frames.pop_front().ok_or(SourceError::EndOfStream)
    }
}
