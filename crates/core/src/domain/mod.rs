// Domain Layer - Frames and destinations

pub mod destination;
pub mod frame;

// Re-exports
pub use destination::validate_destination;
pub use frame::{Frame, MessageId, DESTINATION_HEADER, MESSAGE_COMMAND, MESSAGE_ID_HEADER};
