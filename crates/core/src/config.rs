//! Editor tuning knobs
//!
//! Configuration can be loaded from a TOML file, from environment
//! variables, or created programmatically. Environment variables override
//! file values when both are used through [`EditorConfig::load`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Thresholds and timings used by the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Rubber bands smaller than this on both axes count as clicks
    pub min_selection_size: f32,

    /// Smallest width or height a resize may produce
    pub min_element_size: f32,

    /// Gap between split panes in device pixels
    pub split_gap_px: f32,

    /// Minimum spacing between undo/redo shortcut firings
    pub undo_repeat_ms: u64,

    /// Quiet period before a text edit is recorded in history
    pub text_debounce_ms: u64,

    /// Quiet period after which a wheel zoom burst is considered settled
    pub zoom_idle_ms: u64,

    /// Undo levels kept (0 = unlimited)
    pub max_undo_levels: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_selection_size: 5.0,
            min_element_size: 20.0,
            split_gap_px: 20.0,
            undo_repeat_ms: 300,
            text_debounce_ms: 200,
            zoom_idle_ms: 120,
            max_undo_levels: 100,
        }
    }
}

const ENV_MIN_SELECTION: &str = "LAYOUT_EDITOR_MIN_SELECTION";
const ENV_MIN_ELEMENT: &str = "LAYOUT_EDITOR_MIN_ELEMENT";
const ENV_SPLIT_GAP: &str = "LAYOUT_EDITOR_SPLIT_GAP_PX";
const ENV_UNDO_REPEAT: &str = "LAYOUT_EDITOR_UNDO_REPEAT_MS";
const ENV_TEXT_DEBOUNCE: &str = "LAYOUT_EDITOR_TEXT_DEBOUNCE_MS";
const ENV_ZOOM_IDLE: &str = "LAYOUT_EDITOR_ZOOM_IDLE_MS";
const ENV_MAX_UNDO: &str = "LAYOUT_EDITOR_MAX_UNDO";

impl EditorConfig {
    pub fn with_min_selection_size(mut self, size: f32) -> Self {
        self.min_selection_size = size;
        self
    }

    pub fn with_min_element_size(mut self, size: f32) -> Self {
        self.min_element_size = size;
        self
    }

    pub fn with_split_gap_px(mut self, gap: f32) -> Self {
        self.split_gap_px = gap;
        self
    }

    pub fn with_undo_repeat_ms(mut self, ms: u64) -> Self {
        self.undo_repeat_ms = ms;
        self
    }

    pub fn with_text_debounce_ms(mut self, ms: u64) -> Self {
        self.text_debounce_ms = ms;
        self
    }

    pub fn with_zoom_idle_ms(mut self, ms: u64) -> Self {
        self.zoom_idle_ms = ms;
        self
    }

    pub fn with_max_undo_levels(mut self, levels: usize) -> Self {
        self.max_undo_levels = levels;
        self
    }

    /// Loads configuration from environment variables over the defaults.
    ///
    /// Environment variables:
    /// - `LAYOUT_EDITOR_MIN_SELECTION`: click threshold for rubber bands (default: 5)
    /// - `LAYOUT_EDITOR_MIN_ELEMENT`: minimum element size (default: 20)
    /// - `LAYOUT_EDITOR_SPLIT_GAP_PX`: split pane gap in pixels (default: 20)
    /// - `LAYOUT_EDITOR_UNDO_REPEAT_MS`: undo shortcut repeat guard (default: 300)
    /// - `LAYOUT_EDITOR_TEXT_DEBOUNCE_MS`: text edit debounce (default: 200)
    /// - `LAYOUT_EDITOR_ZOOM_IDLE_MS`: wheel zoom idle period (default: 120)
    /// - `LAYOUT_EDITOR_MAX_UNDO`: undo levels, 0 for unlimited (default: 100)
    ///
    /// # Errors
    /// Returns an error if any environment variable contains an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Applies any `LAYOUT_EDITOR_*` environment variables to this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = env_value(ENV_MIN_SELECTION)? {
            self.min_selection_size = value;
        }
        if let Some(value) = env_value(ENV_MIN_ELEMENT)? {
            self.min_element_size = value;
        }
        if let Some(value) = env_value(ENV_SPLIT_GAP)? {
            self.split_gap_px = value;
        }
        if let Some(value) = env_value(ENV_UNDO_REPEAT)? {
            self.undo_repeat_ms = value;
        }
        if let Some(value) = env_value(ENV_TEXT_DEBOUNCE)? {
            self.text_debounce_ms = value;
        }
        if let Some(value) = env_value(ENV_ZOOM_IDLE)? {
            self.zoom_idle_ms = value;
        }
        if let Some(value) = env_value(ENV_MAX_UNDO)? {
            self.max_undo_levels = value;
        }

        self.validate()?;
        Ok(self)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys keep their defaults:
    /// ```toml
    /// min_selection_size = 5.0
    /// min_element_size = 20.0
    /// text_debounce_ms = 200
    /// ```
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or holds an invalid value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads an optional file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Saves configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("min_selection_size", self.min_selection_size),
            ("min_element_size", self.min_element_size),
            ("split_gap_px", self.split_gap_px),
        ];
        for (key, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(key.to_string()));
            }
        }
        Ok(())
    }

    pub fn undo_repeat(&self) -> Duration {
        Duration::from_millis(self.undo_repeat_ms)
    }

    pub fn text_debounce(&self) -> Duration {
        Duration::from_millis(self.text_debounce_ms)
    }

    pub fn zoom_idle(&self) -> Duration {
        Duration::from_millis(self.zoom_idle_ms)
    }
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(None),
    }
}
