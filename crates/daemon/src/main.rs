//! Stowage - Main Entry Point
//! Hosts the queue storage lifecycle for an embedding broker

mod config;
mod logging;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

// Import workspace crates
use stowage_core::application::{shutdown_channel, EvictionScheduler};
use stowage_core::port::{
    IdProvider, QueueMaintenance, QueueStorage, SequenceIdProvider, SystemTimeProvider,
    UuidProvider,
};
use stowage_infra_memory::MemoryQueueStorage;

use config::{DaemonConfig, IdFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SCHEDULER_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging (guard must outlive every log call)
    let _log_guard = logging::init_logging(config.log_format, config.log_dir.as_deref())?;

    info!("Stowage v{} starting...", VERSION);

    // 3. Setup dependencies (DI wiring)
    let id_provider: Arc<dyn IdProvider> = match config.id_format {
        IdFormat::Uuid => Arc::new(UuidProvider),
        IdFormat::Sequence => Arc::new(SequenceIdProvider::default()),
    };
    let time_provider = Arc::new(SystemTimeProvider);
    let memory = Arc::new(MemoryQueueStorage::new(
        config.storage.clone(),
        id_provider,
        time_provider,
    ));
    let storage: Arc<dyn QueueStorage> = memory.clone();
    let maintenance: Arc<dyn QueueMaintenance> = memory;

    // 4. Start storage (failure is fatal to startup)
    storage
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Queue storage start failed: {}", e))?;

    // 5. Start eviction scheduler
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let scheduler = EvictionScheduler::new(maintenance, config.eviction.clone());
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

    info!(
        id_format = ?config.id_format,
        max_depth = ?config.storage.max_depth,
        "System ready"
    );
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown: background work first, then storage
    shutdown_tx.shutdown();
    if tokio::time::timeout(SCHEDULER_JOIN_TIMEOUT, scheduler_handle)
        .await
        .is_err()
    {
        error!("Eviction scheduler did not stop in time");
    }

    // Stop failure must not block process exit
    if let Err(e) = storage.stop().await {
        error!(error = ?e, "Queue storage stop failed");
    }

    info!("Shutdown complete.");

    Ok(())
}
