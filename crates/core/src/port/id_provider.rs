// ID Provider Port (for deterministic testing)

use crate::constants::DEFAULT_SEQUENCE_PREFIX;
use std::sync::atomic::{AtomicU64, Ordering};

/// ID provider interface (allows deterministic IDs in tests)
///
/// Values must be unique for the lifetime of the storage instance that
/// uses the provider. The broker relies on uniqueness only, not on format.
pub trait IdProvider: Send + Sync {
    /// Generate a new unique message ID
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic counter provider: `<prefix>1`, `<prefix>2`, ...
pub struct SequenceIdProvider {
    prefix: String,
    next: AtomicU64,
}

impl SequenceIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequenceIdProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_PREFIX)
    }
}

impl IdProvider for SequenceIdProvider {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_sequence_ids_are_monotonic() {
        let ids = SequenceIdProvider::default();
        assert_eq!(ids.generate_id(), "message-1");
        assert_eq!(ids.generate_id(), "message-2");
    }

    #[test]
    fn test_sequence_ids_unique_across_threads() {
        let ids = Arc::new(SequenceIdProvider::new("t-"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.generate_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id generated");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidProvider;
        assert_ne!(ids.generate_id(), ids.generate_id());
    }
}
