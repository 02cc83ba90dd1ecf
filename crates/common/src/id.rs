//! ID generation utilities.

/// Sequential ID generator for one entity collection.
///
/// IDs start at 1 and only ever grow, so an assigned id is never handed out
/// twice even when records are hydrated with gaps.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a new ID generator starting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next ID.
    pub const fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Record an externally assigned ID so it is never generated again.
    pub fn observe(&mut self, id: u64) {
        self.next = self.next.max(id.saturating_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sequential() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_observe_skips_past_seeded_ids() {
        let mut ids = IdGenerator::new();
        ids.observe(7);
        ids.observe(3);
        assert_eq!(ids.next_id(), 8);
    }
}
