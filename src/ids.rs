//! Process-wide object id allocation

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out ever-increasing object ids
///
/// Ids are never reused or reset. The allocator is lock-free and can be
/// shared across threads by reference (or `Arc`).
///
/// # Example
///
/// ```rust
/// use crystal_genesis::UniqueIdAllocator;
///
/// let ids = UniqueIdAllocator::new();
/// assert_eq!(ids.next_id(), 0);
/// assert_eq!(ids.next_id(), 1);
/// ```
#[derive(Debug, Default)]
pub struct UniqueIdAllocator {
    next: AtomicU64,
}

impl UniqueIdAllocator {
    /// Allocator whose first id is 0
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Allocator whose first id is `first`
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocate the next id
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to [`next_id`](Self::next_id) will return
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let ids = UniqueIdAllocator::new();
        let allocated: Vec<u64> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(allocated, vec![0, 1, 2, 3, 4]);
        assert_eq!(ids.peek(), 5);
    }

    #[test]
    fn test_starting_at() {
        let ids = UniqueIdAllocator::starting_at(100);
        assert_eq!(ids.next_id(), 100);
        assert_eq!(ids.next_id(), 101);
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let ids = UniqueIdAllocator::new();
        let per_thread = 1000;

        let results: Vec<Vec<u64>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..per_thread).map(|_| ids.next_id()).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut seen = HashSet::new();
        for batch in &results {
            // Each thread observes strictly increasing ids
            assert!(batch.windows(2).all(|w| w[0] < w[1]));
            for &id in batch {
                assert!(seen.insert(id), "id {} allocated twice", id);
            }
        }
        assert_eq!(seen.len(), 4 * per_thread);
    }
}
