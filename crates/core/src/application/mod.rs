// Application Layer - Background services around the storage ports

pub mod maintenance;
pub mod shutdown;

// Re-exports
pub use maintenance::EvictionScheduler;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
