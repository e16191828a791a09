//! Bounded history of projected centerline paths for the whirl trace.

use std::collections::VecDeque;

pub const TRACE_CAPACITY: usize = 60;

/// Identifies the animation the history belongs to. Any change of mode,
/// amplitude, or damping makes old paths geometrically meaningless, so a
/// key mismatch clears the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceKey {
    pub mode: usize,
    pub amplitude: f64,
    pub damping: f64,
}

/// Ring buffer of past centerline paths, oldest first. Pushing beyond
/// capacity evicts from the front (FIFO).
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    paths: VecDeque<Vec<(f64, f64)>>,
    key: Option<TraceKey>,
    capacity: usize,
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::with_capacity(TRACE_CAPACITY)
    }
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: VecDeque::with_capacity(capacity),
            key: None,
            capacity,
        }
    }

    /// Adopt `key`, clearing the history when it differs from the current
    /// one. Call once per frame before pushing.
    pub fn retune(&mut self, key: TraceKey) {
        if self.key != Some(key) {
            self.paths.clear();
            self.key = Some(key);
        }
    }

    pub fn push(&mut self, path: Vec<(f64, f64)>) {
        if self.paths.len() == self.capacity {
            self.paths.pop_front();
        }
        self.paths.push_back(path);
    }

    /// Paths oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vec<(f64, f64)>> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(tag: f64) -> Vec<(f64, f64)> {
        vec![(tag, 0.0), (tag, 1.0)]
    }

    #[test]
    fn test_push_beyond_capacity_evicts_oldest() {
        let mut buf = TraceBuffer::new();
        for i in 0..100 {
            buf.push(path(i as f64));
        }
        assert_eq!(buf.len(), TRACE_CAPACITY);
        // Oldest surviving path is push #40.
        assert_eq!(buf.iter().next().unwrap()[0].0, 40.0);
        assert_eq!(buf.iter().last().unwrap()[0].0, 99.0);
    }

    #[test]
    fn test_retune_with_same_key_keeps_history() {
        let key = TraceKey {
            mode: 1,
            amplitude: 0.5,
            damping: 0.1,
        };
        let mut buf = TraceBuffer::new();
        buf.retune(key);
        buf.push(path(0.0));
        buf.retune(key);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_retune_with_new_key_clears() {
        let mut buf = TraceBuffer::new();
        buf.retune(TraceKey {
            mode: 0,
            amplitude: 1.0,
            damping: 0.05,
        });
        buf.push(path(1.0));
        buf.push(path(2.0));

        // Mode change.
        buf.retune(TraceKey {
            mode: 1,
            amplitude: 1.0,
            damping: 0.05,
        });
        assert!(buf.is_empty());

        buf.push(path(3.0));
        // Damping change.
        buf.retune(TraceKey {
            mode: 1,
            amplitude: 1.0,
            damping: 0.3,
        });
        assert!(buf.is_empty());
    }
}
