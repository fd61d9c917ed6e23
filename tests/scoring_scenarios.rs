//! Scoring scenarios on a 100x100 reference with a 10x10 ink square.

use image::Rgb;
use trace_kiosk::types::{blank_raster, BLACK};
use trace_kiosk::vision::{binarized, InkMask};
use trace_kiosk::{score, DrawingCanvas, Error, PixelTally, Point, RasterImage, ScoreThreshold};

fn threshold(v: u8) -> ScoreThreshold {
    ScoreThreshold::new(v).unwrap()
}

fn fill_square(img: &mut RasterImage, x0: u32, y0: u32, size: u32) {
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            img.put_pixel(x, y, BLACK);
        }
    }
}

fn reference() -> RasterImage {
    let mut img = blank_raster(100, 100);
    fill_square(&mut img, 20, 20, 10);
    img
}

#[test]
fn exact_overlay_scores_100() {
    let reference = reference();
    let sketch = reference.clone();
    for t in [0, 30, 100] {
        let r = score(&reference, &sketch, threshold(t)).unwrap();
        assert_eq!(r.tally, PixelTally { matched: 100, stray: 0, total: 100 });
        assert_eq!(r.score, 100.0);
        assert!(r.passed);
    }
}

#[test]
fn blank_sketch_scores_0() {
    let r = score(&reference(), &blank_raster(100, 100), threshold(1)).unwrap();
    assert_eq!(r.tally.matched, 0);
    assert_eq!(r.score, 0.0);
    assert!(!r.passed);

    // A zero threshold is met by any score, including 0.
    assert!(score(&reference(), &blank_raster(100, 100), threshold(0)).unwrap().passed);
}

#[test]
fn extra_disjoint_square_cancels_out() {
    let mut sketch = reference();
    fill_square(&mut sketch, 60, 60, 10);
    let r = score(&reference(), &sketch, threshold(30)).unwrap();
    assert_eq!(r.tally, PixelTally { matched: 100, stray: 100, total: 100 });
    assert_eq!(r.score, 0.0);
    assert!(!r.passed);
}

#[test]
fn scribbling_everywhere_clamps_to_zero() {
    let mut sketch = blank_raster(100, 100);
    fill_square(&mut sketch, 0, 0, 100);
    let r = score(&reference(), &sketch, threshold(0)).unwrap();
    assert_eq!(r.tally.stray, 9_900);
    assert_eq!(r.score, 0.0);
}

#[test]
fn blank_reference_is_rejected() {
    let blank = blank_raster(100, 100);
    let mut sketch = blank_raster(100, 100);
    fill_square(&mut sketch, 0, 0, 5);
    assert!(matches!(score(&blank, &sketch, threshold(30)), Err(Error::EmptyReference)));
    assert!(matches!(score(&blank, &blank, threshold(0)), Err(Error::EmptyReference)));
}

#[test]
fn size_mismatch_is_rejected() {
    let err = score(&reference(), &blank_raster(100, 99), threshold(30)).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: (100, 100), actual: (100, 99) }));
}

#[test]
fn scoring_is_deterministic_and_leaves_inputs_alone() {
    let mut reference = reference();
    reference.put_pixel(50, 50, Rgb([90, 200, 10])); // unbinarized ink
    let mut sketch = blank_raster(100, 100);
    fill_square(&mut sketch, 22, 22, 10);
    let before = (reference.clone(), sketch.clone());

    let a = score(&reference, &sketch, threshold(30)).unwrap();
    let b = score(&reference, &sketch, threshold(30)).unwrap();
    assert_eq!(a, b);
    assert_eq!((reference, sketch), before);
}

#[test]
fn score_stays_in_range() {
    let reference = reference();
    for (x, y, size) in [(0, 0, 3), (15, 15, 20), (25, 25, 10), (20, 20, 5), (90, 0, 10)] {
        let mut sketch = blank_raster(100, 100);
        fill_square(&mut sketch, x, y, size);
        let r = score(&reference, &sketch, threshold(50)).unwrap();
        assert!((0.0..=100.0).contains(&r.score), "score {} for {:?}", r.score, (x, y, size));
        assert!(r.tally.matched <= r.tally.total);
    }
}

#[test]
fn binarize_twice_is_binarize_once() {
    let mut img = blank_raster(32, 32);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Rgb([(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8]);
    }
    let once = binarized(&img);
    assert_eq!(binarized(&once), once);
}

#[test]
fn traced_with_the_canvas() {
    let mut canvas = DrawingCanvas::new(100, 100, Default::default());
    canvas.load_reference(reference()).unwrap();

    // Zig-zag over the square with the 8px pen.
    canvas.begin_stroke(Point::new(21, 21));
    for (x, y) in [(28, 21), (28, 24), (21, 24), (21, 28), (28, 28)] {
        canvas.extend_stroke(Point::new(x, y));
    }
    canvas.end_stroke();

    let sketch_ink = InkMask::from_raster(canvas.sketch());
    let r = score(canvas.reference(), canvas.sketch(), threshold(30)).unwrap();
    assert_eq!(r.tally.total, 100);
    assert_eq!(r.tally.matched, 100);
    assert_eq!(r.tally.stray, sketch_ink.count() - 100);
    assert!(r.tally.stray > 0);
    let expected = ((100.0 - r.tally.stray as f64) / 100.0 * 100.0).max(0.0);
    assert_eq!(r.score, expected);
}
