// Pixel-set helpers for the trace exercise.
// Visual expectation: `binarize` turns a scanned outline into pure black on
// pure white; `lighten_ink` fades that outline to gray so the child's red
// strokes stand out on top of it.
use crate::error::{ensure_same_size, Result};
use crate::types::RasterImage;
use image::Rgb;

/// Channel values below this become ink (0), the rest paper (255).
pub const BINARY_CUTOFF: u8 = 128;

/// Threshold every channel in place: < 128 → 0, otherwise → 255.
/// Visual: grays and anti-aliased edges snap to black or white.
pub fn binarize(img: &mut RasterImage) {
    for v in img.iter_mut() {
        *v = if *v < BINARY_CUTOFF { 0 } else { 255 };
    }
}

/// Binarized copy; the input is left untouched.
pub fn binarized(img: &RasterImage) -> RasterImage {
    let mut out = img.clone();
    binarize(&mut out);
    out
}

/// Per-pixel "is this ink?" flags, read from the first channel of a raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkMask {
    pub width: u32,
    pub height: u32,
    ink: Vec<bool>, // length = width * height, row-major
}

impl InkMask {
    /// A pixel is ink when its first channel is exactly 0.
    /// Feed it a binarized raster; anything else is only 0-exact.
    pub fn from_raster(img: &RasterImage) -> Self {
        let (width, height) = img.dimensions();
        let ink = img.pixels().map(|p| p[0] == 0).collect();
        Self { width, height, ink }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Ink flag at (x, y); `None` outside the mask.
    pub fn is_ink(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.ink.get((y as usize) * (self.width as usize) + x as usize).copied()
    }

    /// Number of ink pixels.
    pub fn count(&self) -> u64 {
        self.ink.iter().filter(|&&i| i).count() as u64
    }

    /// Pixels that are ink in both masks.
    pub fn count_shared(&self, other: &InkMask) -> Result<u64> {
        ensure_same_size(self.dimensions(), other.dimensions())?;
        Ok(self
            .ink
            .iter()
            .zip(&other.ink)
            .filter(|&(&a, &b)| a && b)
            .count() as u64)
    }

    /// Pixels that are ink in `other` but paper in `self`.
    pub fn count_outside(&self, other: &InkMask) -> Result<u64> {
        ensure_same_size(self.dimensions(), other.dimensions())?;
        Ok(self
            .ink
            .iter()
            .zip(&other.ink)
            .filter(|&(&a, &b)| !a && b)
            .count() as u64)
    }
}

/// Copy of `img` with every 0 channel raised to `gray`.
/// Visual: a black outline turns into a soft gray guide line.
pub fn lighten_ink(img: &RasterImage, gray: u8) -> RasterImage {
    let mut out = img.clone();
    for v in out.iter_mut() {
        if *v == 0 {
            *v = gray;
        }
    }
    out
}

/// Paint `color` over `target` wherever `sketch` has ink.
/// Visual: the child's strokes appear in the highlight color on the preview.
pub fn overlay_ink(target: &mut RasterImage, sketch: &RasterImage, color: Rgb<u8>) -> Result<()> {
    ensure_same_size(target.dimensions(), sketch.dimensions())?;
    paint_ink(target, sketch, color);
    Ok(())
}

// Callers guarantee equal sizes; extra pixels on either side are left alone.
pub(crate) fn paint_ink(target: &mut RasterImage, sketch: &RasterImage, color: Rgb<u8>) {
    for (dst, src) in target.pixels_mut().zip(sketch.pixels()) {
        if src[0] == 0 {
            *dst = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{blank_raster, BLACK, RED};

    #[test]
    fn binarize_splits_at_128() {
        let mut img = blank_raster(3, 1);
        img.put_pixel(0, 0, Rgb([127, 128, 0]));
        img.put_pixel(1, 0, Rgb([255, 1, 200]));
        binarize(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 0, 255]));
        assert_eq!(img.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn binarize_is_idempotent() {
        let mut img = blank_raster(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let v = ((x * 16 + y) % 256) as u8;
            *p = Rgb([v, v.wrapping_mul(3), 255 - v]);
        }
        let once = binarized(&img);
        let twice = binarized(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn mask_counts() {
        let mut a = blank_raster(4, 4);
        let mut b = blank_raster(4, 4);
        a.put_pixel(0, 0, BLACK);
        a.put_pixel(1, 0, BLACK);
        b.put_pixel(1, 0, BLACK);
        b.put_pixel(3, 3, BLACK);
        let ma = InkMask::from_raster(&a);
        let mb = InkMask::from_raster(&b);
        assert_eq!(ma.count(), 2);
        assert_eq!(ma.count_shared(&mb).unwrap(), 1);
        assert_eq!(ma.count_outside(&mb).unwrap(), 1);
        assert_eq!(ma.is_ink(0, 0), Some(true));
        assert_eq!(ma.is_ink(3, 3), Some(false));
    }

    #[test]
    fn ink_lookup_outside_the_mask_is_none() {
        let m = InkMask::from_raster(&blank_raster(4, 3));
        assert_eq!(m.is_ink(4, 0), None);
        assert_eq!(m.is_ink(0, 3), None);
        assert_eq!(m.is_ink(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn mask_size_mismatch_is_an_error() {
        let a = InkMask::from_raster(&blank_raster(4, 4));
        let b = InkMask::from_raster(&blank_raster(4, 5));
        assert!(a.count_shared(&b).is_err());
        assert!(a.count_outside(&b).is_err());
    }

    #[test]
    fn lighten_and_overlay() {
        let mut reference = blank_raster(2, 1);
        reference.put_pixel(0, 0, BLACK);
        let mut preview = lighten_ink(&reference, 200);
        assert_eq!(preview.get_pixel(0, 0), &Rgb([200, 200, 200]));

        let mut sketch = blank_raster(2, 1);
        sketch.put_pixel(1, 0, BLACK);
        overlay_ink(&mut preview, &sketch, RED).unwrap();
        assert_eq!(preview.get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert_eq!(preview.get_pixel(1, 0), &RED);

        let mut wide = blank_raster(3, 1);
        assert!(overlay_ink(&mut wide, &sketch, RED).is_err());
        assert!(wide.pixels().all(|p| *p != RED));
    }
}
