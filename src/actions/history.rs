use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::models::UserAction;

pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded FIFO of recent input actions.
///
/// Append and eviction happen under one lock, so readers never see the log
/// above capacity.
pub struct ActionLog {
    capacity: usize,
    entries: Mutex<VecDeque<UserAction>>,
}

impl ActionLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, action: UserAction) {
        let mut entries = self.lock();
        entries.push_back(action);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// The last `limit` actions, oldest first. `limit` is clamped to the log length.
    pub fn recent(&self, limit: usize) -> Vec<UserAction> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<UserAction>> {
        // Entries are pushed whole, so a poisoned guard still holds a consistent log.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
