// Storage constants (no magic values)
use std::time::Duration;

/// Maximum destination name length in bytes
pub const MAX_DESTINATION_LEN: usize = 1024;

/// Default interval between idle-destination eviction passes (60s)
pub const DEFAULT_EVICTION_INTERVAL: Duration = Duration::from_secs(60);

/// Default idle time before an empty destination may be evicted (5 minutes)
pub const DEFAULT_EVICTION_IDLE: Duration = Duration::from_secs(5 * 60);

/// Prefix used by `SequenceIdProvider` when none is given
pub const DEFAULT_SEQUENCE_PREFIX: &str = "message-";
