//! Monotonic stacking order

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::config::DEFAULT_Z_BASELINE;
use super::WindowId;

/// Tracks a stacking key per window.
///
/// Keys come from a counter that only ever increases, so the most recently
/// raised window always holds the largest key and no two tracked windows
/// share one. Removing a window never renumbers the others.
pub struct ZOrderStack {
    keys: RefCell<HashMap<WindowId, u64>>,
    counter: Cell<u64>,
    baseline: u64,
}

impl Default for ZOrderStack {
    fn default() -> Self {
        Self::new(DEFAULT_Z_BASELINE)
    }
}

impl ZOrderStack {
    /// Create a stack whose counter starts at `baseline`
    pub fn new(baseline: u64) -> Self {
        Self {
            keys: RefCell::new(HashMap::new()),
            counter: Cell::new(baseline),
            baseline,
        }
    }

    /// Raise `id` above every tracked window and return its new key
    pub fn bring_to_front(&self, id: &WindowId) -> u64 {
        let key = self.counter.get() + 1;
        self.counter.set(key);
        self.keys.borrow_mut().insert(id.clone(), key);
        key
    }

    /// Stop tracking `id`
    pub fn remove(&self, id: &WindowId) {
        self.keys.borrow_mut().remove(id);
    }

    /// Key of `id`, or the baseline if it was never raised
    pub fn key_of(&self, id: &WindowId) -> u64 {
        self.keys.borrow().get(id).copied().unwrap_or(self.baseline)
    }

    /// Check if `id` holds a key
    pub fn contains(&self, id: &WindowId) -> bool {
        self.keys.borrow().contains_key(id)
    }

    /// Tracked ids from back to front
    pub fn ordered(&self) -> Vec<WindowId> {
        let keys = self.keys.borrow();
        let mut entries: Vec<(&WindowId, &u64)> = keys.iter().collect();
        entries.sort_by_key(|(_, key)| **key);
        entries.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Window drawn on top
    pub fn topmost(&self) -> Option<WindowId> {
        self.keys
            .borrow()
            .iter()
            .max_by_key(|(_, key)| **key)
            .map(|(id, _)| id.clone())
    }

    /// Number of tracked windows
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// Check if no window is tracked
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Floor reported for untracked windows
    #[inline]
    pub fn baseline(&self) -> u64 {
        self.baseline
    }
}
