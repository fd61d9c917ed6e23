//! Kiosk configuration.
//!
//! One JSON file holds the pass threshold and the look of the canvas. The
//! binary owns the loaded [`KioskConfig`]; the scorer only ever sees the
//! threshold value it is handed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Minimum score (0..=100) an attempt needs to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ScoreThreshold(u8);

impl ScoreThreshold {
    pub const MAX: u8 = 100;
    /// Threshold used when no config file exists yet.
    pub const DEFAULT: ScoreThreshold = ScoreThreshold(30);

    pub fn new(value: u8) -> Result<Self> {
        Self::try_from(value as i64)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ScoreThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for ScoreThreshold {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if !(0..=Self::MAX as i64).contains(&value) {
            return Err(Error::ThresholdOutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl From<ScoreThreshold> for i64 {
    fn from(t: ScoreThreshold) -> Self {
        t.0 as i64
    }
}

impl std::fmt::Display for ScoreThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the canvas looks and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    /// Value the reference ink is lifted to in the preview.
    pub gray_value: u8,
    /// Color the child's strokes are shown in.
    pub highlight: [u8; 3],
    /// Stroke thickness in pixels.
    pub stroke_width: u32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            gray_value: 200,
            highlight: [255, 0, 0],
            stroke_width: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub score_threshold: ScoreThreshold,
    pub canvas_width: u32,
    pub canvas_height: u32,
    #[serde(flatten)]
    pub style: CanvasStyle,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            score_threshold: ScoreThreshold::DEFAULT,
            canvas_width: 800,
            canvas_height: 600,
            style: CanvasStyle::default(),
        }
    }
}

impl KioskConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: KioskConfig = serde_json::from_str(&text)?;
        debug!("Loaded config {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Load `path`, writing the defaults there first if it doesn't exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {:?}, writing defaults", path);
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Admin action: validate and apply a new threshold.
    /// The config is unchanged when the value is rejected.
    pub fn set_threshold(&mut self, value: i64) -> Result<()> {
        self.score_threshold = ScoreThreshold::try_from(value)?;
        info!("Score threshold set to {}", self.score_threshold);
        Ok(())
    }
}
