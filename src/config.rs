use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Thresholds for the region detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// OCR tokens must score strictly above this to become text regions.
    pub min_text_confidence: f32,

    /// Median blur radius applied before Otsu binarization (1 = 3x3 window).
    pub blur_radius: u32,

    /// Fixed binarization level for the UI pass; pixels at or below it are foreground.
    pub ui_threshold: u8,

    /// Contour boxes must be strictly wider and taller than this.
    pub min_ui_element_size: i32,

    /// Nominal confidence given to every UI element (no native signal exists).
    pub ui_element_confidence: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_text_confidence: 60.0,
            blur_radius: 1,
            ui_threshold: 127,
            min_ui_element_size: 20,
            ui_element_confidence: 0.8,
        }
    }
}

/// Thresholds for turning text regions into window lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrganizerConfig {
    /// Tokens below this confidence never reach the output.
    pub min_confidence: f32,

    /// A vertical step strictly greater than this starts a new line.
    pub line_gap_px: i32,

    /// Exact (case-sensitive) tokens dropped as generic menu chrome.
    pub menu_tokens: Vec<String>,

    /// Tokens containing this marker (case-insensitive) are debug overlays.
    pub overlay_marker: String,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            min_confidence: 70.0,
            line_gap_px: 10,
            menu_tokens: ["File", "Edit", "View", "Help"]
                .into_iter()
                .map(String::from)
                .collect(),
            overlay_marker: "confidence:".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActionLogConfig {
    pub capacity: usize,

    /// Buffer size of the channel between the input hook and the tracker.
    pub channel_capacity: usize,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            channel_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    pub interval_ms: u64,
    pub timeout_ms: u64,

    /// Actions attached to a window analysis.
    pub analysis_action_limit: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            timeout_ms: 10_000,
            analysis_action_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    pub detection: DetectionConfig,
    pub organizer: OrganizerConfig,
    pub action_log: ActionLogConfig,
    pub capture: CaptureConfig,
}

const CONFIG_PATH_ENV: &str = "SCREEN_CONTEXT_CONFIG";
const DEBUG_ENV: &str = "SCREEN_CONTEXT_DEBUG";
const DEBUG_INTERVAL_MS: u64 = 250;

impl ContextConfig {
    /// Read a JSON config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Load from `SCREEN_CONTEXT_CONFIG` if set, then apply `SCREEN_CONTEXT_DEBUG`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        let debug = std::env::var(DEBUG_ENV).ok();
        Self::from_overrides(path.as_deref(), debug.as_deref())
    }

    /// Resolve a config from an optional file path and an optional debug flag
    /// (`1` or `true` shortens the capture interval).
    pub fn from_overrides(path: Option<&str>, debug: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };

        let debug_mode = debug
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if debug_mode {
            config.capture.interval_ms = DEBUG_INTERVAL_MS;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = ContextConfig::default();
        assert_eq!(config.detection.min_text_confidence, 60.0);
        assert_eq!(config.detection.ui_threshold, 127);
        assert_eq!(config.detection.min_ui_element_size, 20);
        assert_eq!(config.organizer.min_confidence, 70.0);
        assert_eq!(config.organizer.line_gap_px, 10);
        assert_eq!(config.action_log.capacity, 100);
        assert_eq!(config.capture.interval_ms, 1000);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ContextConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ContextConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "organizer": { "line_gap_px": 14 }, "capture": { "interval_ms": 500 } }"#,
        )
        .unwrap();

        let config = ContextConfig::load(&path).unwrap();
        assert_eq!(config.organizer.line_gap_px, 14);
        assert_eq!(config.organizer.min_confidence, 70.0);
        assert_eq!(config.capture.interval_ms, 500);
        assert_eq!(config.detection, DetectionConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ContextConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn overrides_load_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        fs::write(&path, r#"{ "action_log": { "capacity": 12 } }"#).unwrap();

        let config = ContextConfig::from_overrides(path.to_str(), None).unwrap();
        assert_eq!(config.action_log.capacity, 12);
        assert_eq!(config.capture.interval_ms, 1000);
    }

    #[test]
    fn debug_flag_shortens_interval() {
        for flag in ["1", "true", "TRUE"] {
            let config = ContextConfig::from_overrides(None, Some(flag)).unwrap();
            assert_eq!(config.capture.interval_ms, 250);
        }
        for flag in ["0", "false", ""] {
            let config = ContextConfig::from_overrides(None, Some(flag)).unwrap();
            assert_eq!(config.capture.interval_ms, 1000);
        }
        assert_eq!(
            ContextConfig::from_overrides(None, None).unwrap(),
            ContextConfig::default()
        );
    }

    #[test]
    fn debug_flag_overrides_file_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        fs::write(&path, r#"{ "capture": { "interval_ms": 500 } }"#).unwrap();

        let config = ContextConfig::from_overrides(path.to_str(), Some("1")).unwrap();
        assert_eq!(config.capture.interval_ms, 250);
    }
}
