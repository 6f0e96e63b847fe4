// A single destination's frames (internal)

use std::collections::VecDeque;
use stowage_core::domain::Frame;
use stowage_core::error::{Result, StorageError};

#[derive(Debug)]
pub(crate) struct DestinationQueue {
    frames: VecDeque<Frame>,
    max_depth: Option<usize>,
    last_activity_ms: i64,
}

impl DestinationQueue {
    pub(crate) fn new(max_depth: Option<usize>, now_ms: i64) -> Self {
        Self {
            frames: VecDeque::new(),
            max_depth,
            last_activity_ms: now_ms,
        }
    }

    /// Append to the tail (publish path)
    pub(crate) fn push_back(
        &mut self,
        destination: &str,
        frame: Frame,
        now_ms: i64,
    ) -> Result<()> {
        let frame = self.admit(destination, frame)?;
        self.frames.push_back(frame);
        self.last_activity_ms = now_ms;
        Ok(())
    }

    /// Insert at the head (redelivery path)
    pub(crate) fn push_front(
        &mut self,
        destination: &str,
        frame: Frame,
        now_ms: i64,
    ) -> Result<()> {
        let frame = self.admit(destination, frame)?;
        self.frames.push_front(frame);
        self.last_activity_ms = now_ms;
        Ok(())
    }

    pub(crate) fn pop_front(&mut self, now_ms: i64) -> Option<Frame> {
        self.last_activity_ms = now_ms;
        self.frames.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn idle_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.last_activity_ms).max(0)
    }

    /// Capacity check; a rejected frame travels back inside the error
    fn admit(&self, destination: &str, frame: Frame) -> Result<Frame> {
        match self.max_depth {
            Some(max) if self.frames.len() >= max => Err(StorageError::QueueFull {
                destination: destination.to_string(),
                capacity: max,
                frame: Box::new(frame),
            }),
            _ => Ok(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_is_fifo() {
        let mut queue = DestinationQueue::new(None, 0);
        queue.push_back("q", Frame::message("a"), 1).unwrap();
        queue.push_back("q", Frame::message("b"), 2).unwrap();

        assert_eq!(queue.pop_front(3).unwrap().body(), b"a");
        assert_eq!(queue.pop_front(4).unwrap().body(), b"b");
        assert!(queue.pop_front(5).is_none());
    }

    #[test]
    fn test_push_front_jumps_the_line() {
        let mut queue = DestinationQueue::new(None, 0);
        queue.push_back("q", Frame::message("new"), 1).unwrap();
        queue.push_front("q", Frame::message("redelivered"), 2).unwrap();

        assert_eq!(queue.pop_front(3).unwrap().body(), b"redelivered");
    }

    #[test]
    fn test_capacity_applies_to_both_ends() {
        let mut queue = DestinationQueue::new(Some(1), 0);
        queue.push_back("q", Frame::message("a"), 1).unwrap();

        let err = queue.push_back("q", Frame::message("b"), 2).unwrap_err();
        assert!(matches!(err, StorageError::QueueFull { capacity: 1, .. }));
        let err = queue.push_front("q", Frame::message("c"), 2).unwrap_err();
        assert!(matches!(err, StorageError::QueueFull { .. }));
        assert_eq!(queue.len(), 1);

        // The rejected frame comes back untouched
        assert_eq!(err.into_frame().unwrap().body(), b"c");
    }

    #[test]
    fn test_idle_tracks_last_activity() {
        let mut queue = DestinationQueue::new(None, 100);
        assert_eq!(queue.idle_ms(150), 50);

        queue.push_back("q", Frame::message("a"), 200).unwrap();
        assert_eq!(queue.idle_ms(250), 50);

        queue.pop_front(300);
        assert!(queue.is_empty());
        assert_eq!(queue.idle_ms(300), 0);
        // Clock going backwards never yields a negative idle time
        assert_eq!(queue.idle_ms(10), 0);
    }
}
