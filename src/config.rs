//! Configuration for airkeys
//!
//! Settings are read from `~/.airkeys/config.json` when that file exists;
//! every field has a default so a partial (or missing) file is fine. The
//! file is only ever read, never written.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current config schema version
const CURRENT_VERSION: u32 = 1;

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown config version: {0}")]
    UnknownVersion(u32),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version for migrations
    pub version: u32,
    /// Camera frame geometry
    pub capture: CaptureConfig,
    /// Target pointer space
    pub screen: ScreenConfig,
    /// Gesture thresholds and debounce timings
    pub gestures: GestureConfig,
    /// Browser launched by the mode-switch key
    pub browser: BrowserConfig,
    /// External hand landmark detector
    pub detector: DetectorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            capture: CaptureConfig::default(),
            screen: ScreenConfig::default(),
            gestures: GestureConfig::default(),
            browser: BrowserConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

/// Camera frame configuration
///
/// Landmark coordinates are expected in this pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub frame_width: f32,
    pub frame_height: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280.0,
            frame_height: 720.0,
        }
    }
}

/// Pointer target configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Gesture recognition configuration
///
/// Cooldowns are counted in processed frames, not wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Index-to-middle fingertip distance (pixels) below which a pinch counts
    pub pinch_threshold: f32,
    /// Frames before another key can be typed
    pub typing_cooldown: u32,
    /// Frames before another click can fire
    pub click_cooldown: u32,
    /// Frames before the two-palm exit gesture can fire again
    pub exit_cooldown: u32,
    /// Scroll units per pixel of vertical palm movement
    pub scroll_sensitivity: f32,
    /// Palm movement (pixels) that must be exceeded before scrolling
    pub scroll_deadzone: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 30.0,
            typing_cooldown: 10,
            click_cooldown: 10,
            exit_cooldown: 20,
            scroll_sensitivity: 0.2,
            scroll_deadzone: 2.0,
        }
    }
}

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// URL opened when switching to pointer mode
    pub url: String,
    /// Process names (case-insensitive) terminated when leaving pointer mode
    pub process_names: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            url: "https://www.youtube.com".to_string(),
            process_names: vec![
                "msedge.exe".to_string(),
                "microsoftedge.exe".to_string(),
                "msedge".to_string(),
                "microsoft-edge".to_string(),
            ],
        }
    }
}

/// Hand landmark detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Detector executable; it owns the camera and prints one JSON frame per line
    pub program: String,
    /// Arguments passed to the detector
    pub args: Vec<String>,
    /// Hands scoring below this are ignored
    pub min_confidence: f32,
    /// At most this many hands are used per frame
    pub max_hands: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["hand_detect.py".to_string()],
            min_confidence: 0.8,
            max_hands: 2,
        }
    }
}

/// Get the path to the config file (~/.airkeys/config.json)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}

/// Get the path to the airkeys directory (~/.airkeys)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| {
            tracing::error!("Could not determine home directory, using /tmp");
            PathBuf::from("/tmp")
        })
        .join(".airkeys")
}

/// Load configuration from an explicit file
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = serde_json::from_str(&contents)?;
    migrate_config(config)
}

/// Load configuration from the default location
///
/// A missing file yields defaults. A broken file is logged and also yields
/// defaults so a typo never keeps the keyboard from starting.
pub fn load() -> Config {
    let path = get_config_path();

    if !path.exists() {
        tracing::info!("Config file not found, using defaults");
        return Config::default();
    }

    match load_from_path(&path) {
        Ok(config) => {
            tracing::info!("Config loaded from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Migrate configuration from older schema versions
fn migrate_config(mut config: Config) -> Result<Config, ConfigError> {
    let original_version = config.version;

    while config.version < CURRENT_VERSION {
        config = apply_migration(config)?;
    }

    if config.version > CURRENT_VERSION {
        return Err(ConfigError::UnknownVersion(config.version));
    }

    if config.version != original_version {
        tracing::info!(
            "Migrated config from version {} to {}",
            original_version,
            config.version
        );
    }

    Ok(config)
}

/// Apply a single migration step
fn apply_migration(config: Config) -> Result<Config, ConfigError> {
    match config.version {
        // Version 0 had no schema field; defaults already fill the gaps
        0 => Ok(Config {
            version: 1,
            ..config
        }),
        v => Err(ConfigError::UnknownVersion(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_current_version() {
        let config = Config::default();
        assert_eq!(config.version, CURRENT_VERSION);
    }

    #[test]
    fn test_gesture_defaults() {
        let gestures = GestureConfig::default();
        assert_eq!(gestures.pinch_threshold, 30.0);
        assert_eq!(gestures.typing_cooldown, 10);
        assert_eq!(gestures.click_cooldown, 10);
        assert_eq!(gestures.exit_cooldown, 20);
        assert!((gestures.scroll_sensitivity - 0.2).abs() < f32::EPSILON);
        assert_eq!(gestures.scroll_deadzone, 2.0);
    }

    #[test]
    fn test_geometry_defaults() {
        let config = Config::default();
        assert_eq!(config.capture.frame_width, 1280.0);
        assert_eq!(config.capture.frame_height, 720.0);
        assert_eq!(config.screen.width, 1920.0);
        assert_eq!(config.screen.height, 1080.0);
    }

    #[test]
    fn test_browser_defaults() {
        let browser = BrowserConfig::default();
        assert_eq!(browser.url, "https://www.youtube.com");
        assert!(browser.process_names.contains(&"msedge.exe".to_string()));
    }

    #[test]
    fn test_detector_defaults() {
        let detector = DetectorConfig::default();
        assert_eq!(detector.max_hands, 2);
        assert!((detector.min_confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_config_deserialisation() {
        let json = r#"{"version": 1, "screen": {"width": 2560}}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.screen.width, 2560.0);
        assert_eq!(config.screen.height, 1080.0); // Default
        assert_eq!(config.gestures, GestureConfig::default());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let json = r#"{"version": 1, "unknown_field": true, "gestures": {"extra": 1}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_migration_from_version_0() {
        let old_config = Config {
            version: 0,
            ..Default::default()
        };

        let migrated = migrate_config(old_config).unwrap();
        assert_eq!(migrated.version, CURRENT_VERSION);
    }

    #[test]
    fn test_future_version_rejected() {
        let future_config = Config {
            version: 999,
            ..Default::default()
        };

        let result = migrate_config(future_config);
        assert!(matches!(result, Err(ConfigError::UnknownVersion(999))));
    }

    #[test]
    fn test_config_path_format() {
        let path = get_config_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains(".airkeys"));
        assert!(path_str.ends_with("config.json"));
    }
}
