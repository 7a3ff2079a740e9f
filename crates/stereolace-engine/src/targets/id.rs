use std::sync::atomic::{AtomicU64, Ordering};

/// Handle identifying one capture target allocation.
///
/// Ids grow monotonically, so a handle cached from before a resize never
/// compares equal to any live target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TargetId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// Takes the next id from the process-wide counter shared by all backends.
    pub fn next() -> Self {
        TargetId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let a = TargetId::next();
        let b = TargetId::next();
        assert!(b > a);
        assert_ne!(a, b);
    }
}
