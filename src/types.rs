// Core types shared by the canvas, the scorer and the window.

use image::{Rgb, RgbImage};

/// The raster every part of the kiosk works on: 8-bit, 3 channels.
pub type RasterImage = RgbImage;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// A blank (all white) raster of the given size.
pub fn blank_raster(width: u32, height: u32) -> RasterImage {
    RgbImage::from_pixel(width, height, WHITE)
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Pack an RGB raster into 0x00RRGGBB pixels, ready to push to the screen.
    pub fn from_raster(raster: &RasterImage) -> Self {
        let (w, h) = raster.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for pixel in raster.pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            out.push((r << 16) | (g << 8) | b);
        }
        Self { width: w as usize, height: h as usize, pixels: out }
    }
}

/// A pointer position in canvas space. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which tool the next stroke segment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Ink,
    Erase,
}

impl ToolMode {
    /// Ink lays down black, erase paints back to white.
    pub fn stroke_color(self) -> Rgb<u8> {
        match self {
            ToolMode::Ink => BLACK,
            ToolMode::Erase => WHITE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolMode::Ink => "INK",
            ToolMode::Erase => "ERASE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_packs_rgb() {
        let mut img = blank_raster(2, 1);
        img.put_pixel(1, 0, Rgb([0x12, 0x34, 0x56]));
        let fb = FrameBuffer::from_raster(&img);
        assert_eq!((fb.width, fb.height), (2, 1));
        assert_eq!(fb.pixels, vec![0x00FF_FFFF, 0x0012_3456]);
    }

    #[test]
    fn tool_colors() {
        assert_eq!(ToolMode::Ink.stroke_color(), BLACK);
        assert_eq!(ToolMode::Erase.stroke_color(), WHITE);
        assert_eq!(ToolMode::default(), ToolMode::Ink);
    }
}
