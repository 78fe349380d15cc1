//! Error types for the frame source and the desktop sink.

/// Failure to obtain the next frame of landmarks.
///
/// Every variant ends the run: without frames there is nothing to drive.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to start detector {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Detector stdout was not captured")]
    NoStdout,

    #[error("Failed to read from detector: {0}")]
    Io(#[from] std::io::Error),

    #[error("Detector stream ended")]
    EndOfStream,

    #[error("Malformed detector frame: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Detector failed to capture a frame: {0}")]
    Acquisition(String),
}

/// Failure to carry out an action on the desktop.
///
/// Never fatal; the loop logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Input injection unavailable: {0}")]
    InputUnavailable(String),

    #[error("Input injection failed: {0}")]
    Input(String),

    #[error("Failed to launch {target}: {source}")]
    Launch {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

