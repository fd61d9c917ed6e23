// Progress through one level (an ordered list of drawings) and the prize hook.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct LevelProgress {
    items: Vec<String>,
    scores: HashMap<String, f64>,
}

impl LevelProgress {
    /// Item names are the identity of a drawing; a repeated name is rejected.
    pub fn new(items: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|i| !seen.insert(i.as_str())) {
            return Err(Error::DuplicateItem(dup.clone()));
        }
        Ok(Self { items, scores: HashMap::new() })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Record a passing score for `item`.
    /// Returns true only when this completes the level for the first time;
    /// redoing an already-completed drawing never re-triggers the prize.
    pub fn record(&mut self, item: &str, score: f64) -> bool {
        let first_time = self.scores.insert(item.to_owned(), score).is_none();
        first_time && self.is_complete()
    }

    /// Best-known passing score of `item`, once it has been completed.
    pub fn score_of(&self, item: &str) -> Option<f64> {
        self.scores.get(item).copied()
    }

    pub fn is_completed(&self, item: &str) -> bool {
        self.scores.contains_key(item)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| self.is_completed(i)).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| self.is_completed(i))
    }

    /// The drawing after `item` in level order, if any.
    pub fn next_after(&self, item: &str) -> Option<&str> {
        let idx = self.items.iter().position(|i| i == item)?;
        self.items.get(idx + 1).map(String::as_str)
    }
}

/// Something that hands out a prize when a level is finished.
/// Fire-and-forget: failures are the dispenser's problem, not the kiosk's.
pub trait RewardTrigger {
    fn dispense(&mut self);
}

/// Stand-in dispenser that only writes to the log.
#[derive(Debug, Default)]
pub struct LogReward {
    pub dispensed: u32,
}

impl RewardTrigger for LogReward {
    fn dispense(&mut self) {
        self.dispensed += 1;
        info!("Dispensing prize (#{})", self.dispensed);
    }
}
