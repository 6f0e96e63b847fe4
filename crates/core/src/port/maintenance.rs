// Queue maintenance port: inspection and idle-destination eviction
use crate::constants::{DEFAULT_EVICTION_IDLE, DEFAULT_EVICTION_INTERVAL};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Per-destination statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    pub destination: String,
    pub depth: usize,
    /// Milliseconds since the last enqueue, requeue or dequeue
    pub idle_ms: i64,
}

/// Outcome of one maintenance pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub evicted: usize,
    pub destinations: usize,
    pub total_depth: usize,
}

/// Eviction configuration
#[derive(Debug, Clone)]
pub struct EvictionConfig {
    /// How often the scheduler runs a pass
    pub interval: Duration,

    /// Minimum idle time before an empty destination is dropped
    pub idle_for: Duration,
}

impl Default for EvictionConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_EVICTION_INTERVAL,
            idle_for: DEFAULT_EVICTION_IDLE,
        }
    }
}

/// Maintenance operations over a queue storage
///
/// All operations fail with `NotStarted` outside the started state.
#[async_trait]
pub trait QueueMaintenance: Send + Sync {
    /// Statistics for every known destination, sorted by name
    async fn stats(&self) -> Result<Vec<QueueStats>>;

    /// Number of frames queued for `destination` (0 if unknown)
    async fn depth(&self, destination: &str) -> Result<usize>;

    /// Drop destination entries that are empty and idle for at least `idle_for`
    ///
    /// Never drops a queue holding frames or one in use by an in-flight
    /// operation.
    ///
    /// # Returns
    /// Number of destinations removed
    async fn evict_idle(&self, idle_for: Duration) -> Result<usize>;

    /// Run one maintenance pass (evict, then report)
    async fn run_maintenance(&self, config: &EvictionConfig) -> Result<MaintenanceReport> {
        let evicted = self.evict_idle(config.idle_for).await?;
        let stats = self.stats().await?;

        let report = MaintenanceReport {
            evicted,
            destinations: stats.len(),
            total_depth: stats.iter().map(|s| s.depth).sum(),
        };

        tracing::debug!(
            evicted = report.evicted,
            destinations = report.destinations,
            total_depth = report.total_depth,
            "Queue maintenance pass completed"
        );

        Ok(report)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::StorageError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock maintenance behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Evict this many destinations on every pass
        Evict(usize),
        /// Fail every call with NotStarted
        NotStarted,
        /// Fail every call with a storage failure
        Fail(String),
    }

    /// Mock QueueMaintenance that counts passes
    pub struct MockQueueMaintenance {
        behavior: Mutex<MockBehavior>,
        evict_calls: AtomicUsize,
    }

    impl MockQueueMaintenance {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Mutex::new(behavior),
                evict_calls: AtomicUsize::new(0),
            }
        }

        pub fn evict_calls(&self) -> usize {
            self.evict_calls.load(Ordering::SeqCst)
        }

        fn outcome<T>(&self, ok: T) -> Result<T> {
            match self.behavior.lock().unwrap().clone() {
                MockBehavior::Evict(_) => Ok(ok),
                MockBehavior::NotStarted => Err(StorageError::NotStarted),
                MockBehavior::Fail(msg) => Err(StorageError::StorageFailure(msg)),
            }
        }
    }

    #[async_trait]
    impl QueueMaintenance for MockQueueMaintenance {
        async fn stats(&self) -> Result<Vec<QueueStats>> {
            self.outcome(vec![QueueStats {
                destination: "mock".to_string(),
                depth: 3,
                idle_ms: 0,
            }])
        }

        async fn depth(&self, _destination: &str) -> Result<usize> {
            self.outcome(3)
        }

        async fn evict_idle(&self, _idle_for: Duration) -> Result<usize> {
            self.evict_calls.fetch_add(1, Ordering::SeqCst);
            let evicted = match *self.behavior.lock().unwrap() {
                MockBehavior::Evict(n) => n,
                _ => 0,
            };
            self.outcome(evicted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::{MockBehavior, MockQueueMaintenance};
    use super::*;

    #[tokio::test]
    async fn test_run_maintenance_reports_pass() {
        let maintenance = MockQueueMaintenance::new(MockBehavior::Evict(2));
        let report = maintenance
            .run_maintenance(&EvictionConfig::default())
            .await
            .unwrap();

        assert_eq!(
            report,
            MaintenanceReport {
                evicted: 2,
                destinations: 1,
                total_depth: 3,
            }
        );
        assert_eq!(maintenance.evict_calls(), 1);
    }

    #[tokio::test]
    async fn test_run_maintenance_propagates_errors() {
        let maintenance = MockQueueMaintenance::new(MockBehavior::Fail("disk".into()));
        let err = maintenance
            .run_maintenance(&EvictionConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disk"));
    }

    #[test]
    fn test_default_eviction_config() {
        let config = EvictionConfig::default();
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.idle_for, Duration::from_secs(300));
    }
}
