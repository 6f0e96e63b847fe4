// Queue Storage Port (Interface)

use crate::domain::{Frame, MessageId};
use crate::error::Result;
use async_trait::async_trait;

/// Storage interface for per-destination message queues.
///
/// The broker calls `start` once at launch and `stop` once at shutdown, from
/// a single coordinating task. The data operations may be called
/// concurrently from any number of tasks. Operations on one destination are
/// linearizable, and destinations are independent of each other.
///
/// Implementations may be in-memory or durable. Durable backends must
/// surface caller deadlines as `StorageError::Timeout` or
/// `StorageError::Cancelled` without leaving a partial append or losing a
/// frame.
///
/// # Example
///
/// ```text
/// storage.start().await?;
/// storage.enqueue("orders", Frame::message("a")).await?;
/// match storage.dequeue("orders").await? {
///     Some(frame) => deliver(frame),
///     None => { /* nothing to deliver right now */ }
/// }
/// storage.stop().await?;
/// ```
#[async_trait]
pub trait QueueStorage: Send + Sync {
    /// Allocate or load internal state.
    ///
    /// # Errors
    /// - `AlreadyStarted` if called twice without an intervening `stop`
    /// - any backend error if resources are unavailable (fatal to startup)
    async fn start(&self) -> Result<()>;

    /// Release internal state. A no-op if the storage is not started.
    ///
    /// Non-durable implementations discard all queued frames.
    async fn stop(&self) -> Result<()>;

    /// Append a frame to the tail of `destination`'s queue.
    ///
    /// Assigns a `message-id` if the frame has none and returns the id in
    /// effect.
    ///
    /// # Errors
    /// - `NotStarted` outside the started state
    /// - `InvalidDestination` if the name fails validation
    /// - `QueueFull` if the destination is at capacity; the frame is returned
    ///   inside the error (`StorageError::into_frame`)
    async fn enqueue(&self, destination: &str, frame: Frame) -> Result<MessageId>;

    /// Insert a frame at the head of `destination`'s queue for redelivery.
    ///
    /// The existing `message-id` is kept. One is assigned only if missing.
    ///
    /// # Errors
    /// - `NotStarted` outside the started state
    /// - `QueueFull` if the destination is at capacity; the frame is returned
    ///   inside the error so a redelivery is never lost
    async fn requeue(&self, destination: &str, frame: Frame) -> Result<MessageId>;

    /// Remove and return the head frame.
    ///
    /// Returns `Ok(None)` when nothing is available; this never blocks
    /// waiting for a future enqueue.
    ///
    /// # Errors
    /// - `NotStarted` outside the started state
    /// - backend failures (never for an empty queue)
    async fn dequeue(&self, destination: &str) -> Result<Option<Frame>>;
}
