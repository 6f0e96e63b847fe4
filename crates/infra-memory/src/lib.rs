// Stowage Infrastructure - In-memory Adapter
// Implements: QueueStorage, QueueMaintenance

mod config;
mod destination_queue;
mod memory_storage;

pub use config::MemoryStorageConfig;
pub use memory_storage::MemoryQueueStorage;
