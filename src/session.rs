// One child working through one level.
// Owns the canvas, knows which drawing is up, and decides what a submit
// means: a failed attempt wipes the sketch for another go, a passed one is
// recorded against the level.

use crate::canvas::DrawingCanvas;
use crate::config::{KioskConfig, ScoreThreshold};
use crate::error::{Error, Result};
use crate::level::LevelProgress;
use crate::score::{score, ScoreResult};
use crate::types::RasterImage;
use tracing::info;

/// What happened when the child pressed "done".
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub item: String,
    pub result: ScoreResult,
    /// This pass finished the level for the first time.
    pub level_complete: bool,
}

pub struct Session {
    canvas: DrawingCanvas,
    threshold: ScoreThreshold,
    level: LevelProgress,
    current: Option<String>,
}

impl Session {
    /// Fails with [`Error::DuplicateItem`] when two drawings share a name.
    pub fn new(config: &KioskConfig, items: Vec<String>) -> Result<Self> {
        Ok(Self {
            canvas: DrawingCanvas::new(config.canvas_width, config.canvas_height, config.style),
            threshold: config.score_threshold,
            level: LevelProgress::new(items)?,
            current: None,
        })
    }

    /// Put `item` up for tracing. `reference` must be canvas-sized.
    pub fn start(&mut self, item: &str, reference: RasterImage) -> Result<()> {
        let (w, h) = self.canvas.dimensions();
        self.canvas.reset(w, h);
        self.canvas.load_reference(reference)?;
        self.canvas.set_tool(Default::default());
        self.current = Some(item.to_owned());
        info!("Started drawing {:?}", item);
        Ok(())
    }

    /// Score the sketch of the current drawing.
    /// Any stroke still in progress ends here; later moves draw nothing.
    pub fn submit(&mut self) -> Result<Attempt> {
        let item = self.current.clone().ok_or(Error::NoReference)?;
        self.canvas.end_stroke();
        let result = score(self.canvas.reference(), self.canvas.sketch(), self.threshold)?;

        let level_complete = if result.passed {
            info!("{:?} passed with {:.1}", item, result.score);
            self.level.record(&item, result.score)
        } else {
            info!("{:?} scored {:.1}, below {}; try again", item, result.score, self.threshold);
            self.canvas.clear_sketch();
            false
        };

        Ok(Attempt { item, result, level_complete })
    }

    /// Leave the current drawing; the canvas goes blank.
    pub fn abandon(&mut self) {
        let (w, h) = self.canvas.dimensions();
        self.canvas.reset(w, h);
        self.current = None;
    }

    pub fn canvas(&self) -> &DrawingCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DrawingCanvas {
        &mut self.canvas
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The drawing that follows the current one in the level.
    pub fn next_item(&self) -> Option<&str> {
        self.level.next_after(self.current.as_deref()?)
    }

    pub fn level(&self) -> &LevelProgress {
        &self.level
    }

    pub fn threshold(&self) -> ScoreThreshold {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: ScoreThreshold) {
        self.threshold = threshold;
    }
}
