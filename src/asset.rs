// Loads reference drawings from disk and fits them to the canvas.
// Visual expectation: whatever the source resolution, the outline fills the
// drawing area exactly.

use crate::error::Result;
use crate::types::RasterImage;
use image::imageops::{self, FilterType};
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// Decode `path` and resize it to `width` x `height`.
pub fn load_reference_asset(path: &Path, width: u32, height: u32) -> Result<RasterImage> {
    let img = image::open(path)?;
    debug!("Loaded {:?} at {}x{}", path, img.width(), img.height());
    Ok(fit_to_canvas(img, width, height))
}

/// RGB8 copy stretched to the canvas size with bilinear interpolation.
/// Already-fitting images are passed through without resampling.
pub fn fit_to_canvas(img: DynamicImage, width: u32, height: u32) -> RasterImage {
    let rgb = img.into_rgb8();
    if rgb.dimensions() == (width, height) {
        return rgb;
    }
    imageops::resize(&rgb, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{blank_raster, BLACK};
    use tempfile::TempDir;

    #[test]
    fn loads_and_resizes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        let mut img = blank_raster(20, 10);
        img.put_pixel(0, 0, BLACK);
        img.save(&path).unwrap();

        let loaded = load_reference_asset(&path, 40, 30).unwrap();
        assert_eq!(loaded.dimensions(), (40, 30));
    }

    #[test]
    fn same_size_is_untouched() {
        let mut img = blank_raster(8, 8);
        img.put_pixel(3, 3, BLACK);
        let fitted = fit_to_canvas(DynamicImage::ImageRgb8(img.clone()), 8, 8);
        assert_eq!(fitted, img);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let dir = TempDir::new().unwrap();
        let err = load_reference_asset(&dir.path().join("nope.png"), 4, 4).unwrap_err();
        assert!(matches!(err, Error::ImageLoad(_)));
    }
}
