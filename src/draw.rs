// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the traced drawing preview.
// 2) Thick stroke segments painted into the child's sketch raster.
// 3) A crosshair that follows the pointer.
// 4) A tiny 5x7 bitmap font to render HUD text on top of the preview.

use crate::error::{Error, Result};
use crate::input::KioskKey;
use crate::types::{FrameBuffer, Point, RasterImage};
use image::Rgb;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Keyboard layout of the kiosk. One entry per physical key.
const KEY_BINDINGS: [(Key, KioskKey); 6] = [
    (Key::P, KioskKey::Ink),
    (Key::E, KioskKey::Erase),
    (Key::C, KioskKey::Clear),
    (Key::Enter, KioskKey::Submit),
    (Key::NumPadEnter, KioskKey::Submit),
    (Key::Escape, KioskKey::Quit),
];

pub struct Drawer {
    window: Window, // the on-screen window the child draws in
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new preview.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current mouse position in canvas coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0) as i32, y.max(0.0) as i32))
    }

    /// True while the left button (or a touch) is held.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Kiosk actions whose key went down this frame.
    pub fn pressed_keys(&self) -> Vec<KioskKey> {
        KEY_BINDINGS
            .iter()
            .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|&(_, action)| action)
            .collect()
    }
}

/* ---------- Strokes into the sketch raster ---------- */

/// Visit every point of the Bresenham line from `a` to `b`, endpoints included.
/// Runs in i64 so far-away pointer samples can't overflow.
fn for_each_line_point(a: Point, b: Point, mut visit: impl FnMut(i64, i64)) {
    let (mut x0, mut y0) = (a.x as i64, a.y as i64);
    let (x1, y1) = (b.x as i64, b.y as i64);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        visit(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Fill a disc of `diameter` pixels centered at (cx,cy); off-canvas pixels are skipped.
fn stamp_disc(img: &mut RasterImage, cx: i64, cy: i64, diameter: u32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r = diameter.max(1) as f32 / 2.0;
    let reach = r.floor() as i64;
    let r2 = r * r;

    // Whole disc off the canvas: nothing to do.
    if cx + reach < 0 || cy + reach < 0 || cx - reach >= w || cy - reach >= h {
        return;
    }

    for y in (cy - reach).max(0)..=(cy + reach).min(h - 1) {
        for x in (cx - reach).max(0)..=(cx + reach).min(w - 1) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            if dx * dx + dy * dy > r2 { continue; }
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Paint a straight segment `width` pixels thick from `from` to `to`.
/// Visual: a round-capped stroke, like dragging a marker tip along the path.
/// Points outside the canvas are clipped per pixel; nothing panics.
pub fn draw_stroke(img: &mut RasterImage, from: Point, to: Point, width: u32, color: Rgb<u8>) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    // Only the part of the segment whose disc can touch the canvas is walked.
    let reach = (width.max(1) / 2) as f64;
    let min = (-reach, -reach);
    let max = (img.width() as f64 - 1.0 + reach, img.height() as f64 - 1.0 + reach);
    let Some((a, b)) = clip_segment(from, to, min, max) else {
        return;
    };
    for_each_line_point(a, b, |x, y| stamp_disc(img, x, y, width, color));
}

/// Liang-Barsky clip of the segment `a`-`b` to the box [min, max].
/// Endpoints already inside the box are returned untouched.
fn clip_segment(a: Point, b: Point, min: (f64, f64), max: (f64, f64)) -> Option<(Point, Point)> {
    let (x0, y0) = (a.x as f64, a.y as f64);
    let dx = b.x as f64 - x0;
    let dy = b.y as f64 - y0;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, x0 - min.0), (dx, max.0 - x0), (-dy, y0 - min.1), (dy, max.1 - y0)] {
        if p == 0.0 {
            if q < 0.0 { return None; } // parallel to this edge and outside it
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 { return None; }
            t0 = t0.max(r);
        } else {
            if r < t0 { return None; }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    let start = if t0 == 0.0 { a } else { at(t0) };
    let end = if t1 == 1.0 { b } else { at(t1) };
    Some((start, end))
}

/* ---------- Software drawing on the screen buffer: pixels, crosshair, font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin 1-pixel line between two points on the screen buffer.
fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, color: u32) {
    for_each_line_point(a, b, |x, y| {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            put_pixel(fb, x, y, color);
        }
    });
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows the pointer.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, Point::new(cx - size, cy), Point::new(cx - 2, cy), color);
    draw_line(fb, Point::new(cx + 2, cy), Point::new(cx + size, cy), color);
    draw_line(fb, Point::new(cx, cy - size), Point::new(cx, cy - 2), color);
    draw_line(fb, Point::new(cx, cy + 2), Point::new(cx, cy + size), color);
    put_pixel(fb, cx, cy, color);
}

/// Fill an axis-aligned rectangle, clipped to the buffer.
/// Visual: a solid banner strip behind HUD text.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase is drawn as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x0000_0000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{blank_raster, BLACK, WHITE};
    use crate::vision::InkMask;

    #[test]
    fn stroke_is_thick_and_round() {
        let mut img = blank_raster(40, 40);
        draw_stroke(&mut img, Point::new(10, 20), Point::new(30, 20), 8, BLACK);
        // Inside the band.
        assert_eq!(img.get_pixel(20, 20), &BLACK);
        assert_eq!(img.get_pixel(20, 16), &BLACK);
        assert_eq!(img.get_pixel(20, 24), &BLACK);
        // Outside it.
        assert_eq!(img.get_pixel(20, 15), &WHITE);
        assert_eq!(img.get_pixel(20, 25), &WHITE);
        // Round caps reach past both endpoints.
        assert_eq!(img.get_pixel(6, 20), &BLACK);
        assert_eq!(img.get_pixel(34, 20), &BLACK);
        assert_eq!(img.get_pixel(35, 20), &WHITE);
    }

    #[test]
    fn single_point_stroke_is_a_dot() {
        let mut img = blank_raster(20, 20);
        draw_stroke(&mut img, Point::new(10, 10), Point::new(10, 10), 8, BLACK);
        let ink = InkMask::from_raster(&img).count();
        assert!(ink > 40 && ink < 81, "dot has {ink} pixels");
    }

    #[test]
    fn stroke_clips_at_edges() {
        let mut img = blank_raster(10, 10);
        draw_stroke(&mut img, Point::new(-20, 5), Point::new(5, 5), 8, BLACK);
        assert_eq!(img.get_pixel(0, 5), &BLACK);
        assert_eq!(img.get_pixel(5, 5), &BLACK);
        draw_stroke(&mut img, Point::new(8, 8), Point::new(i32::MAX, i32::MAX), 1, BLACK);
        assert_eq!(img.get_pixel(9, 9), &BLACK);
    }

    #[test]
    fn stroke_fully_outside_is_a_no_op() {
        let mut img = blank_raster(10, 10);
        draw_stroke(&mut img, Point::new(-50, -50), Point::new(-30, -60), 8, BLACK);
        draw_stroke(&mut img, Point::new(100, 5), Point::new(200, 5), 8, BLACK);
        assert_eq!(InkMask::from_raster(&img).count(), 0);
    }

    #[test]
    fn text_and_crosshair_stay_in_bounds() {
        let mut fb = FrameBuffer { width: 8, height: 8, pixels: vec![0; 64] };
        draw_text_5x7(&mut fb, 4, 4, "Try again 100%", 0x00FF_FFFF);
        draw_crosshair(&mut fb, 0, 0, 12, 0x00FF_CC33);
        fill_rect(&mut fb, -3, -3, 20, 2, 0x0011_2233);
        assert_eq!(fb.pixels.len(), 64);
        assert_eq!(fb.pixels[0], 0x00FF_CC33);
    }

    #[test]
    fn every_hud_letter_has_a_glyph() {
        for ch in "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 |:.!-/%".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }
}
