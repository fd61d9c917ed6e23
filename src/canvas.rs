// The drawing canvas the child traces on.
// Visual expectation: `composite()` is what the window shows: the reference
// outline faded to gray, with every inked sketch pixel in the highlight color
// on top of it.

use crate::config::CanvasStyle;
use crate::draw::draw_stroke;
use crate::error::{ensure_same_size, Result};
use crate::types::{blank_raster, Point, RasterImage, ToolMode};
use crate::vision::{binarize, lighten_ink, paint_ink, InkMask};
use image::Rgb;
use tracing::{debug, warn};

pub struct DrawingCanvas {
    reference: RasterImage, // binarized outline to trace
    sketch: RasterImage,    // what the child drew; black = ink
    composite: RasterImage, // what gets displayed
    tool: ToolMode,
    previous: Option<Point>,
    drawing: bool,
    gray_value: u8,
    highlight: Rgb<u8>,
    stroke_width: u32,
}

impl DrawingCanvas {
    /// A blank white canvas of the given size.
    pub fn new(width: u32, height: u32, style: CanvasStyle) -> Self {
        let blank = blank_raster(width, height);
        Self {
            reference: blank.clone(),
            sketch: blank.clone(),
            composite: blank,
            tool: ToolMode::Ink,
            previous: None,
            drawing: false,
            gray_value: style.gray_value,
            highlight: Rgb(style.highlight),
            stroke_width: style.stroke_width,
        }
    }

    /// Start over: reference, sketch and preview all become blank white.
    /// Visual: the drawing area is empty.
    pub fn reset(&mut self, width: u32, height: u32) {
        let blank = blank_raster(width, height);
        self.reference = blank.clone();
        self.sketch = blank.clone();
        self.composite = blank;
        self.previous = None;
        self.drawing = false;
    }

    /// Binarize `image` and make it the outline to trace.
    /// Visual: the outline appears in gray, ready to be traced.
    ///
    /// `image` must already be canvas-sized; resizing is the loader's job.
    pub fn load_reference(&mut self, mut image: RasterImage) -> Result<()> {
        ensure_same_size(self.dimensions(), image.dimensions())?;
        binarize(&mut image);
        if InkMask::from_raster(&image).count() == 0 {
            warn!("Reference drawing has no ink; it cannot be scored");
        }
        self.reference = image;
        self.recomposite();
        Ok(())
    }

    pub fn begin_stroke(&mut self, position: Point) {
        self.previous = Some(position);
        self.drawing = true;
    }

    /// Draw from the last pointer position to `position` with the current tool.
    /// Visual: the stroke grows under the finger and the preview refreshes.
    pub fn extend_stroke(&mut self, position: Point) {
        if !self.drawing {
            return;
        }
        let from = self.previous.unwrap_or(position);
        draw_stroke(&mut self.sketch, from, position, self.stroke_width, self.tool.stroke_color());
        self.previous = Some(position);
        self.recomposite();
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    pub fn set_tool(&mut self, mode: ToolMode) {
        debug!("Tool set to {:?}", mode);
        self.tool = mode;
    }

    /// Wipe the sketch but keep the reference.
    /// Visual: the child's strokes vanish; the gray outline stays.
    pub fn clear_sketch(&mut self) {
        let (w, h) = self.dimensions();
        self.sketch = blank_raster(w, h);
        self.previous = None;
        self.drawing = false;
        self.recomposite();
    }

    // Fresh faded reference, then the sketch ink painted over it.
    // O(canvas area); runs once per stroke segment.
    fn recomposite(&mut self) {
        let mut composite = lighten_ink(&self.reference, self.gray_value);
        paint_ink(&mut composite, &self.sketch, self.highlight);
        self.composite = composite;
    }

    pub fn reference(&self) -> &RasterImage {
        &self.reference
    }

    pub fn sketch(&self) -> &RasterImage {
        &self.sketch
    }

    pub fn composite(&self) -> &RasterImage {
        &self.composite
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.sketch.dimensions()
    }
}
