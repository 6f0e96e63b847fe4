// Eviction Scheduler
// Periodically drops empty, long-idle destination entries

use crate::application::shutdown::ShutdownToken;
use crate::error::{Result, StorageError};
use crate::port::{EvictionConfig, MaintenanceReport, QueueMaintenance};
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Eviction scheduler
///
/// Runs `QueueMaintenance::run_maintenance` in the background until shutdown
pub struct EvictionScheduler {
    maintenance: Arc<dyn QueueMaintenance>,
    config: EvictionConfig,
}

impl EvictionScheduler {
    pub fn new(maintenance: Arc<dyn QueueMaintenance>, config: EvictionConfig) -> Self {
        Self {
            maintenance,
            config,
        }
    }

    /// Run eviction loop (background task)
    ///
    /// Should be spawned in tokio::spawn. Returns once `shutdown` fires.
    pub async fn run(self, mut shutdown: ShutdownToken) {
        info!(
            interval_secs = self.config.interval.as_secs_f64(),
            idle_secs = self.config.idle_for.as_secs_f64(),
            "Eviction scheduler started"
        );

        let mut tick = interval(self.config.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so a fresh storage
        // is not swept at startup.
        tick.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.wait() => break,
            }

            match self.maintenance.run_maintenance(&self.config).await {
                Ok(report) if report.evicted > 0 => {
                    info!(
                        evicted = report.evicted,
                        destinations = report.destinations,
                        total_depth = report.total_depth,
                        "Evicted idle destinations"
                    );
                }
                Ok(_) => {}
                Err(StorageError::NotStarted) => {
                    debug!("Storage not started, skipping eviction pass");
                }
                Err(e) => {
                    error!(error = ?e, "Scheduled eviction failed");
                }
            }
        }

        info!("Eviction scheduler stopped");
    }

    /// Run one pass immediately (for manual trigger)
    pub async fn run_now(&self) -> Result<MaintenanceReport> {
        let report = self.maintenance.run_maintenance(&self.config).await?;

        info!(
            evicted = report.evicted,
            destinations = report.destinations,
            "Manual eviction completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::shutdown::shutdown_channel;
    use crate::port::maintenance::mocks::{MockBehavior, MockQueueMaintenance};
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn fast_config() -> EvictionConfig {
        EvictionConfig {
            interval: Duration::from_millis(10),
            idle_for: Duration::from_millis(0),
        }
    }

    #[tokio::test]
    async fn test_run_now_returns_report() {
        let maintenance = Arc::new(MockQueueMaintenance::new(MockBehavior::Evict(4)));
        let scheduler = EvictionScheduler::new(maintenance.clone(), fast_config());

        let report = assert_ok!(scheduler.run_now().await);
        assert_eq!(report.evicted, 4);
        assert_eq!(maintenance.evict_calls(), 1);
    }

    #[tokio::test]
    async fn test_run_now_propagates_not_started() {
        let maintenance = Arc::new(MockQueueMaintenance::new(MockBehavior::NotStarted));
        let scheduler = EvictionScheduler::new(maintenance, fast_config());

        let err = assert_err!(scheduler.run_now().await);
        assert!(matches!(err, StorageError::NotStarted));
    }

    #[tokio::test]
    async fn test_run_ticks_until_shutdown() {
        let maintenance = Arc::new(MockQueueMaintenance::new(MockBehavior::Evict(1)));
        let scheduler = EvictionScheduler::new(maintenance.clone(), fast_config());
        let (tx, token) = shutdown_channel();

        let handle = tokio::spawn(scheduler.run(token));
        tokio::time::sleep(Duration::from_millis(80)).await;
        tx.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();
        assert!(maintenance.evict_calls() >= 2);
    }

    #[tokio::test]
    async fn test_run_survives_failing_passes() {
        let maintenance = Arc::new(MockQueueMaintenance::new(MockBehavior::Fail(
            "corrupt".into(),
        )));
        let scheduler = EvictionScheduler::new(maintenance.clone(), fast_config());
        let (tx, token) = shutdown_channel();

        let handle = tokio::spawn(scheduler.run(token));
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();
        assert!(maintenance.evict_calls() >= 2);
    }
}
