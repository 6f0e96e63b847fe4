// Stowage Core - Frame model & storage ports
// NO backend dependencies (hexagonal layout: adapters live in infra-* crates)

pub mod application;
pub mod constants;
pub mod domain;
pub mod error;
pub mod port;

pub use domain::{Frame, MessageId};
pub use error::{Result, StorageError};
pub use port::{QueueMaintenance, QueueStorage};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
