// Destination name validation

use crate::constants::MAX_DESTINATION_LEN;
use crate::error::{Result, StorageError};

/// Validate a destination name before it is used to create a queue.
///
/// Names end up in the `destination` header of delivered frames, so they
/// must fit on one STOMP header line.
pub fn validate_destination(destination: &str) -> Result<()> {
    if destination.is_empty() {
        return Err(StorageError::invalid_destination(
            destination,
            "destination name cannot be empty",
        ));
    }

    if destination.len() > MAX_DESTINATION_LEN {
        return Err(StorageError::invalid_destination(
            destination,
            format!(
                "destination name too long (max {} bytes, got {})",
                MAX_DESTINATION_LEN,
                destination.len()
            ),
        ));
    }

    if destination.chars().any(char::is_control) {
        return Err(StorageError::invalid_destination(
            destination,
            "destination name contains control characters",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_destination_empty() {
        let err = validate_destination("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_destination_too_long() {
        let name = "q".repeat(MAX_DESTINATION_LEN + 1);
        let err = validate_destination(&name).unwrap_err();
        assert!(err.to_string().contains("too long"));

        assert!(validate_destination(&"q".repeat(MAX_DESTINATION_LEN)).is_ok());
    }

    #[test]
    fn test_validate_destination_control_chars() {
        for name in ["orders\n", "a\rb", "nul\0"] {
            let err = validate_destination(name).unwrap_err();
            assert!(matches!(err, StorageError::InvalidDestination { .. }));
        }
    }

    #[test]
    fn test_validate_destination_accepts_stomp_names() {
        for name in [
            "orders",
            "/queue/orders",
            "/topic/prices.eu",
            "jms.queue.DLQ",
        ] {
            assert!(validate_destination(name).is_ok(), "{name} should be valid");
        }
    }
}
