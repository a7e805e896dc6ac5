//! Bounded error channel for detached mirror tasks.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// A bounded queue of mirror failures.
///
/// Detached best-effort uploads and deletes must not throw into the
/// caller's context; their failures land here instead, where the
/// façade (or a UI) can drain them. When full, the oldest entry is
/// dropped first - the queue reports recent trouble, it is not an
/// audit log.
#[derive(Debug)]
pub struct MirrorErrors {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl MirrorErrors {
    /// Creates a queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Records a failure, dropping the oldest entry when full.
    pub fn push(&self, message: impl Into<String>) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(message.into());
    }

    /// Removes and returns every recorded failure, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.entries.lock().drain(..).collect()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true when no failure is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let errors = MirrorErrors::new(8);
        errors.push("upload failed");
        errors.push("delete failed");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.drain(), vec!["upload failed", "delete failed"]);
        assert!(errors.is_empty());
    }

    #[test]
    fn drops_oldest_when_full() {
        let errors = MirrorErrors::new(2);
        errors.push("first");
        errors.push("second");
        errors.push("third");

        assert_eq!(errors.drain(), vec!["second", "third"]);
    }

    #[test]
    fn zero_capacity_still_holds_one() {
        let errors = MirrorErrors::new(0);
        errors.push("kept");
        assert_eq!(errors.drain(), vec!["kept"]);
    }
}
