// Actions that should happen a little later on the same loop.
// Nothing runs on another thread: the main loop asks for whatever is due
// each frame and handles it inline.

use std::time::{Duration, Instant};

pub struct DeferredQueue<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `item` once `delay` has passed since `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, item: T) {
        self.pending.push((now + delay, item));
    }

    /// Remove and return every item due at `now`, earliest first.
    /// Items due at the same instant keep their scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = later;
        due.sort_by_key(|(at, _)| *at); // stable
        due.into_iter().map(|(_, item)| item).collect()
    }

    /// Drop everything still waiting.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
