//! Protocol error types

use thiserror::Error;

/// Violations of the dongle's identification and mode-transition protocol
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Mode name outside the three recognized spellings
    #[error("Unknown mode '{name}', must be one of CDC, AVRISP, or BOOTLOADER")]
    UnknownModeName { name: String },

    /// Product ID not among the three known identities
    #[error("Product ID {product_id:#06x} does not map to a known device mode")]
    UnknownProductId { product_id: u16 },

    /// The bootloader answered the exit command with the wrong byte
    /// (or with nothing at all)
    #[error("Bootloader exit not acknowledged: expected 0x0d, got {got:02x?}")]
    UnexpectedExitAck { got: Vec<u8> },

    /// The magic read came back with something other than the identity string
    #[error("Device magic mismatch: expected \"srxe\", got {got:02x?}")]
    MagicMismatch { got: Vec<u8> },
}

/// Type alias for protocol results
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mode_display() {
        let err = ProtocolError::UnknownModeName {
            name: "dfu".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("dfu"));
        assert!(msg.contains("CDC, AVRISP, or BOOTLOADER"));
    }

    #[test]
    fn test_unknown_product_id_display() {
        let err = ProtocolError::UnknownProductId { product_id: 0x2048 };
        let msg = format!("{}", err);
        assert!(msg.contains("0x2048"));
    }

    #[test]
    fn test_magic_mismatch_display() {
        let err = ProtocolError::MagicMismatch {
            got: b"abcd".to_vec(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("srxe"));
        assert!(msg.contains("61"));
    }

    #[test]
    fn test_exit_ack_display_with_empty_read() {
        let err = ProtocolError::UnexpectedExitAck { got: Vec::new() };
        let msg = format!("{}", err);
        assert!(msg.contains("0x0d"));
        assert!(msg.contains("[]"));
    }
}
