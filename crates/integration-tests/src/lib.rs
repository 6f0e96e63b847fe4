//! Shared fixtures for the storage integration tests

use std::sync::Arc;
use stowage_core::domain::Frame;
use stowage_core::port::{IdProvider, QueueStorage, SequenceIdProvider, SystemTimeProvider};
use stowage_infra_memory::{MemoryQueueStorage, MemoryStorageConfig};

/// Unstarted in-memory storage with deterministic ids (`id1`, `id2`, ...)
pub fn memory_storage() -> Arc<MemoryQueueStorage> {
    memory_storage_with(
        MemoryStorageConfig::default(),
        Arc::new(SequenceIdProvider::new("id")),
    )
}

pub fn memory_storage_with(
    config: MemoryStorageConfig,
    ids: Arc<dyn IdProvider>,
) -> Arc<MemoryQueueStorage> {
    Arc::new(MemoryQueueStorage::new(
        config,
        ids,
        Arc::new(SystemTimeProvider),
    ))
}

/// Started storage behind the port trait
pub async fn started_storage() -> Arc<dyn QueueStorage> {
    let storage: Arc<dyn QueueStorage> = memory_storage();
    storage.start().await.expect("start storage");
    storage
}

pub fn text_frame(body: &str) -> Frame {
    Frame::message(body.as_bytes().to_vec())
}

pub fn body_text(frame: &Frame) -> String {
    String::from_utf8_lossy(frame.body()).into_owned()
}

/// Dequeue until empty
pub async fn drain(storage: &dyn QueueStorage, destination: &str) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(frame) = storage
        .dequeue(destination)
        .await
        .expect("dequeue during drain")
    {
        frames.push(frame);
    }
    frames
}
