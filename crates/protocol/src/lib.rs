//! Protocol definitions for the SRXE dongle
//!
//! This crate defines the USB-visible surface of the dongle firmware: the
//! vendor/product identities it enumerates under, the three operating modes
//! with their wire codes, and the constants of the mode-transition handshake
//! (vendor control requests, bootloader bulk endpoints, identity magic).
//!
//! # Example
//!
//! ```
//! use protocol::{DEVICE_MAGIC, DeviceMode};
//!
//! // Mode names parse case-insensitively.
//! let mode: DeviceMode = "avrisp".parse().unwrap();
//! assert_eq!(mode, DeviceMode::Avrisp);
//! assert_eq!(mode.code(), 1);
//!
//! // The product ID the dongle enumerates under identifies the mode.
//! assert_eq!(DeviceMode::from_product_id(0x204b), Some(DeviceMode::Cdc));
//!
//! assert_eq!(&DEVICE_MAGIC, b"srxe");
//! ```

pub mod error;
pub mod handshake;
pub mod types;

pub use error::{ProtocolError, Result};
pub use handshake::{
    BOOTLOADER_DATA_INTERFACE, BOOTLOADER_EP_IN, BOOTLOADER_EP_OUT, BOOTLOADER_EXIT_ACK,
    BOOTLOADER_EXIT_CMD, BOOTLOADER_INTERFACES, DEVICE_MAGIC, REENUMERATION_WAIT, REQ_GET_MAGIC,
    REQ_SET_DEVICE_MODE, REQUEST_TYPE_VENDOR_IN, REQUEST_TYPE_VENDOR_OUT,
};
pub use types::{
    DeviceMode, DongleId, LOCATE_CANDIDATES, PRODUCT_ID_AVRISP, PRODUCT_ID_BOOTLOADER,
    PRODUCT_ID_CDC, VENDOR_ID, VENDOR_ID_SHORT,
};
