//! Trace-and-compare drawing kiosk.
//!
//! A child traces a faded reference outline on the [`DrawingCanvas`]; on
//! submit, [`score()`] compares the sketch with the reference pixel by pixel
//! and decides pass or fail against the configured [`ScoreThreshold`].

pub mod asset;
pub mod canvas;
pub mod config;
pub mod deferred;
pub mod draw;
pub mod error;
pub mod input;
pub mod level;
pub mod score;
pub mod session;
pub mod types;
pub mod vision;

pub use canvas::DrawingCanvas;
pub use config::{CanvasStyle, KioskConfig, ScoreThreshold};
pub use error::{Error, Result};
pub use score::{score, PixelTally, ScoreResult};
pub use session::{Attempt, Session};
pub use types::{Point, RasterImage, ToolMode};
