// Port Layer - Interfaces for storage backends and injected services

pub mod id_provider; // For deterministic testing
pub mod maintenance;
pub mod queue_storage;
pub mod time_provider;

// Re-exports
pub use id_provider::{IdProvider, SequenceIdProvider, UuidProvider};
pub use maintenance::{EvictionConfig, MaintenanceReport, QueueMaintenance, QueueStats};
pub use queue_storage::QueueStorage;
pub use time_provider::{SystemTimeProvider, TimeProvider};
