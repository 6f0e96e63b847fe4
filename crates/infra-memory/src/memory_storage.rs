// In-memory QueueStorage Implementation

use crate::config::MemoryStorageConfig;
use crate::destination_queue::DestinationQueue;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use stowage_core::domain::{validate_destination, Frame, MessageId};
use stowage_core::error::{Result, StorageError};
use stowage_core::port::{IdProvider, QueueMaintenance, QueueStats, QueueStorage, TimeProvider};
use tracing::{debug, info};

/// Destination name -> queue. Creation goes through the map entry API so
/// each name gets exactly one queue; contents sit behind a per-queue lock so
/// unrelated destinations never wait on each other.
type Registry = DashMap<String, Arc<Mutex<DestinationQueue>>>;

/// Reference in-memory queue storage
///
/// All frames are lost on `stop`.
pub struct MemoryQueueStorage {
    // None = not started. Data operations hold the read side for their whole
    // duration, so `stop` (write side) waits for in-flight operations.
    state: RwLock<Option<Registry>>,
    config: MemoryStorageConfig,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl MemoryQueueStorage {
    pub fn new(
        config: MemoryStorageConfig,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            state: RwLock::new(None),
            config,
            id_provider,
            time_provider,
        }
    }

    pub fn is_started(&self) -> bool {
        self.state.read().is_some()
    }

    fn with_registry<T>(&self, op: impl FnOnce(&Registry) -> Result<T>) -> Result<T> {
        let state = self.state.read();
        let registry = state.as_ref().ok_or(StorageError::NotStarted)?;
        op(registry)
    }

    /// Get the queue for `destination`, creating it on first use
    fn queue_for(&self, registry: &Registry, destination: &str) -> Arc<Mutex<DestinationQueue>> {
        if let Some(queue) = registry.get(destination) {
            return Arc::clone(queue.value());
        }

        let entry = registry.entry(destination.to_string()).or_insert_with(|| {
            debug!(destination = %destination, "Creating destination queue");
            Arc::new(Mutex::new(DestinationQueue::new(
                self.config.max_depth,
                self.time_provider.now_millis(),
            )))
        });
        Arc::clone(entry.value())
    }

    fn existing_queue(
        registry: &Registry,
        destination: &str,
    ) -> Option<Arc<Mutex<DestinationQueue>>> {
        registry
            .get(destination)
            .map(|queue| Arc::clone(queue.value()))
    }

    /// Assign identity before the frame enters a queue
    fn prepare(&self, destination: &str, frame: &mut Frame) -> MessageId {
        let id = frame.ensure_message_id(self.id_provider.as_ref());
        frame.ensure_destination(destination);
        id
    }
}

#[async_trait]
impl QueueStorage for MemoryQueueStorage {
    async fn start(&self) -> Result<()> {
        let mut state = self.state.write();
        if state.is_some() {
            return Err(StorageError::AlreadyStarted);
        }
        *state = Some(Registry::new());

        info!(max_depth = ?self.config.max_depth, "In-memory queue storage started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let registry = self.state.write().take();

        match registry {
            Some(registry) => {
                let discarded: usize = registry.iter().map(|queue| queue.lock().len()).sum();
                info!(
                    destinations = registry.len(),
                    discarded_frames = discarded,
                    "In-memory queue storage stopped"
                );
            }
            None => debug!("Stop requested but storage was not started"),
        }

        Ok(())
    }

    async fn enqueue(&self, destination: &str, mut frame: Frame) -> Result<MessageId> {
        // Lifecycle first: a stopped storage reports NotStarted for any name
        self.with_registry(|registry| {
            validate_destination(destination)?;
            let id = self.prepare(destination, &mut frame);
            let queue = self.queue_for(registry, destination);
            let now = self.time_provider.now_millis();
            queue.lock().push_back(destination, frame, now)?;
            Ok(id)
        })
    }

    async fn requeue(&self, destination: &str, mut frame: Frame) -> Result<MessageId> {
        self.with_registry(|registry| {
            let id = self.prepare(destination, &mut frame);
            let queue = self.queue_for(registry, destination);
            let now = self.time_provider.now_millis();
            queue.lock().push_front(destination, frame, now)?;
            Ok(id)
        })
    }

    async fn dequeue(&self, destination: &str) -> Result<Option<Frame>> {
        self.with_registry(|registry| {
            // Dequeue never creates a destination
            let Some(queue) = Self::existing_queue(registry, destination) else {
                return Ok(None);
            };
            let now = self.time_provider.now_millis();
            let frame = queue.lock().pop_front(now);
            Ok(frame)
        })
    }
}

#[async_trait]
impl QueueMaintenance for MemoryQueueStorage {
    async fn stats(&self) -> Result<Vec<QueueStats>> {
        self.with_registry(|registry| {
            let queues: Vec<(String, Arc<Mutex<DestinationQueue>>)> = registry
                .iter()
                .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
                .collect();

            let now = self.time_provider.now_millis();
            let mut stats: Vec<QueueStats> = queues
                .into_iter()
                .map(|(destination, queue)| {
                    let queue = queue.lock();
                    QueueStats {
                        destination,
                        depth: queue.len(),
                        idle_ms: queue.idle_ms(now),
                    }
                })
                .collect();
            stats.sort_by(|a, b| a.destination.cmp(&b.destination));
            Ok(stats)
        })
    }

    async fn depth(&self, destination: &str) -> Result<usize> {
        self.with_registry(|registry| {
            Ok(Self::existing_queue(registry, destination)
                .map(|queue| queue.lock().len())
                .unwrap_or(0))
        })
    }

    async fn evict_idle(&self, idle_for: Duration) -> Result<usize> {
        let idle_ms = i64::try_from(idle_for.as_millis()).unwrap_or(i64::MAX);

        self.with_registry(|registry| {
            let now = self.time_provider.now_millis();
            let mut evicted = 0;

            // retain holds the shard write lock, so no operation can pick up a
            // new handle to a queue while it is inspected. A strong count of 1
            // means no in-flight operation holds one either.
            registry.retain(|destination, queue| {
                let evictable = Arc::strong_count(queue) == 1
                    && queue
                        .try_lock()
                        .map_or(false, |q| q.is_empty() && q.idle_ms(now) >= idle_ms);
                if evictable {
                    debug!(destination = %destination, "Evicting idle destination");
                    evicted += 1;
                }
                !evictable
            });

            Ok(evicted)
        })
    }
}
