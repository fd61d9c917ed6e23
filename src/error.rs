// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two rasters that must line up pixel-for-pixel have different sizes.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The reference has no ink pixels, so there is nothing to trace.
    #[error("Reference drawing has no ink pixels")]
    EmptyReference,

    #[error("No reference drawing loaded")]
    NoReference,

    /// Two drawings of one level share a name, so progress can't tell them apart.
    #[error("Drawing {0:?} appears more than once in the level")]
    DuplicateItem(String),

    #[error("Score threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(i64),

    #[error("Image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fail unless `actual` has the `expected` (width, height).
pub fn ensure_same_size(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}
