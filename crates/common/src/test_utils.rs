//! Test utilities for srxe-dongle
//!
//! Canned identities and handshake payloads shared by tests across crates.
//!
//! # Example
//!
//! ```
//! use common::test_utils::foreign_device_id;
//! use protocol::DeviceMode;
//!
//! let id = foreign_device_id();
//! assert_eq!(DeviceMode::from_product_id(id.product_id), None);
//! ```

use protocol::DongleId;

/// An identity no dongle firmware ever enumerates under.
pub fn foreign_device_id() -> DongleId {
    DongleId::new(0x1234, 0x5678)
}

/// Four bytes of the right length that fail the magic check.
pub fn wrong_magic() -> [u8; 4] {
    *b"abcd"
}
