//! Scoring a finished sketch against its reference.
//!
//! Both rasters are binarized, reduced to ink masks and compared pixel by
//! pixel:
//!
//! - `matched`: ink in both (the child traced over the outline)
//! - `stray`: ink in the sketch where the reference is paper
//! - `total`: ink in the reference, the amount there was to trace
//!
//! `score = (matched - stray) / total * 100`, clamped below at 0.

use crate::config::ScoreThreshold;
use crate::error::{ensure_same_size, Error, Result};
use crate::types::RasterImage;
use crate::vision::{binarized, InkMask};
use tracing::debug;

/// Raw pixel counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelTally {
    pub matched: u64,
    pub stray: u64,
    pub total: u64,
}

impl PixelTally {
    /// Count matched, stray and total ink. Sizes must agree.
    pub fn count(reference: &RasterImage, sketch: &RasterImage) -> Result<Self> {
        ensure_same_size(reference.dimensions(), sketch.dimensions())?;
        let reference = InkMask::from_raster(&binarized(reference));
        let sketch = InkMask::from_raster(&binarized(sketch));
        Ok(Self {
            matched: reference.count_shared(&sketch)?,
            stray: reference.count_outside(&sketch)?,
            total: reference.count(),
        })
    }

    /// Percentage score, floored at 0. `None` when the reference had no ink.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let raw = (self.matched as f64 - self.stray as f64) / self.total as f64 * 100.0;
        Some(raw.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub passed: bool,
    pub tally: PixelTally,
}

/// Score `sketch` against `reference`.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if the two rasters differ in size.
/// - [`Error::EmptyReference`] if the reference has no ink at all; such a
///   reference is rejected instead of scored.
pub fn score(reference: &RasterImage, sketch: &RasterImage, threshold: ScoreThreshold) -> Result<ScoreResult> {
    let tally = PixelTally::count(reference, sketch)?;
    let score = tally.percent().ok_or(Error::EmptyReference)?;
    let passed = score >= threshold.value() as f64;
    debug!(
        "matched={} stray={} total={} score={:.2} threshold={} passed={}",
        tally.matched, tally.stray, tally.total, score, threshold, passed
    );
    Ok(ScoreResult { score, passed, tally })
}
