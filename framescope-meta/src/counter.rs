/// Hands out 1-based button indices in the order buttons are met.
///
/// One tracker lives for exactly one encode pass; it is passed down the
/// traversal by `&mut` so concurrent encodes never share state.
#[derive(Debug)]
pub struct ButtonIndexTracker {
    next: u32,
}

impl ButtonIndexTracker {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next index and advances.
    pub fn next_index(&mut self) -> u32 {
        let index = self.next;
        self.next += 1;
        index
    }

    /// Number of indices handed out so far.
    pub fn issued(&self) -> usize {
        (self.next - 1) as usize
    }
}

impl Default for ButtonIndexTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let mut tracker = ButtonIndexTracker::new();
        assert_eq!(tracker.issued(), 0);
        assert_eq!(tracker.next_index(), 1);
    }

    #[test]
    fn increments_once_per_call() {
        let mut tracker = ButtonIndexTracker::default();
        let issued: Vec<u32> = (0..4).map(|_| tracker.next_index()).collect();
        assert_eq!(issued, vec![1, 2, 3, 4]);
        assert_eq!(tracker.issued(), 4);
    }

    #[test]
    fn trackers_are_independent() {
        let mut a = ButtonIndexTracker::new();
        let mut b = ButtonIndexTracker::new();
        a.next_index();
        a.next_index();
        assert_eq!(b.next_index(), 1);
        assert_eq!(a.next_index(), 3);
    }
}
