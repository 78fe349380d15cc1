//! Airkeys - type and point with hand gestures
//!
//! A detector process reports hand landmarks for every camera frame. The
//! interaction engine turns them into key presses, pointer movement, clicks
//! and scrolling, which are injected into the desktop.

pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod landmarks;
pub mod layout;
pub mod mode;
pub mod render;
pub mod sink;
pub mod source;

use anyhow::Context;

use crate::controls::{Control, ControlKeys};
use crate::engine::{EngineSettings, InteractionEngine};
use crate::layout::Layout;
use crate::render::{FrameView, LogRenderer, Renderer};
use crate::sink::{ActionSink, DesktopSink};
use crate::source::{DetectorProcess, LandmarkSource, SourceError};

/// Drive the engine until a quit control arrives or the source fails.
///
/// `poll_controls` is called once per frame after the frame was rendered.
/// Returns `Ok` on quit and the source error otherwise. Sink failures are
/// logged and never stop the loop.
pub fn run_loop<S, K, R, C>(
    engine: &mut InteractionEngine,
    source: &mut S,
    sink: &mut K,
    renderer: &mut R,
    mut poll_controls: C,
) -> Result<(), SourceError>
where
    S: LandmarkSource,
    K: ActionSink,
    R: Renderer,
    C: FnMut() -> Vec<Control>,
{
    loop {
        let hands = source.next_frame()?;
        let outcome = engine.process_frame(&hands);

        for action in &outcome.actions {
            if let Err(e) = sink.dispatch(action) {
                tracing::warn!("Failed to perform {:?}: {}", action, e);
            }
        }

        renderer.present(&FrameView::new(engine.layout(), &outcome, engine.text()));

        for control in poll_controls() {
            match control {
                Control::Quit => {
                    tracing::info!("Quit requested");
                    return Ok(());
                }
                Control::ClearText => engine.clear_text(),
            }
        }
    }
}

/// Set up logging to stdout and `~/.airkeys/logs/airkeys.log`.
fn init_logging() {
    use tracing_subscriber::prelude::*;

    /// Format timestamps using the system's local time via chrono
    struct LocalTimer;
    impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
        fn format_time(
            &self,
            w: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
        }
    }

    let log_dir = config::get_config_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("airkeys.log"))
        .ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(file) = log_file {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_timer(LocalTimer)
            .with_ansi(false);
        let stdout_layer = tracing_subscriber::fmt::layer().with_timer(LocalTimer);
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_timer(LocalTimer))
            .init();
    }
}

/// Program entry point.
pub fn run() -> anyhow::Result<()> {
    init_logging();
    tracing::info!("Airkeys starting");

    let cfg = config::load();
    let mut engine = InteractionEngine::new(
        Layout::standard(&cfg.browser.url),
        EngineSettings::from_config(&cfg),
    );

    let mut source =
        DetectorProcess::spawn(&cfg.detector).context("Failed to start hand detector")?;
    let mut sink = DesktopSink::new();
    let mut renderer = LogRenderer::new();
    let mut controls = ControlKeys::new();

    tracing::info!("Ready: pinch over a key to type, press Q to quit, C to clear");

    run_loop(&mut engine, &mut source, &mut sink, &mut renderer, || {
        controls.poll()
    })
    .context("Hand tracking stopped")?;

    tracing::info!("Airkeys stopped");
    Ok(())
}
