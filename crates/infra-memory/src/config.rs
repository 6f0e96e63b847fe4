// In-memory storage configuration

/// Configuration for `MemoryQueueStorage`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageConfig {
    /// Maximum frames per destination (None = unbounded)
    pub max_depth: Option<usize>,
}

impl MemoryStorageConfig {
    pub fn bounded(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}
