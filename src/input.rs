// Turns polled pointer samples into stroke events.
// The window only tells us "button down at (x,y)" once per frame; the canvas
// wants begin / move / end. This is the adapter between the two.

use crate::types::Point;

/// Kiosk actions bound to keys (see the binding table in `draw`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskKey {
    Ink,
    Erase,
    Clear,
    Submit,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Begin(Point),
    Move(Point),
    End,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<Point>, // Some while the button is held
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's sample; returns the event it implies, if any.
    /// A held button that doesn't move produces nothing.
    pub fn sample(&mut self, position: Option<Point>, down: bool) -> Option<PointerEvent> {
        match (self.last, down, position) {
            (None, true, Some(p)) => {
                self.last = Some(p);
                Some(PointerEvent::Begin(p))
            }
            (Some(prev), true, Some(p)) if prev != p => {
                self.last = Some(p);
                Some(PointerEvent::Move(p))
            }
            (Some(_), false, _) => {
                self.last = None;
                Some(PointerEvent::End)
            }
            _ => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }
}
