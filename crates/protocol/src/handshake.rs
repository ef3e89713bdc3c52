//! Mode-transition handshake constants
//!
//! The dongle's application firmware answers two vendor-defined control
//! requests on the default endpoint. The bootloader takes no control
//! requests; it is commanded over a bulk endpoint pair and leaves the bus
//! entirely when told to exit, re-enumerating as the application firmware.

use std::time::Duration;

/// bRequest: read the 4-byte identity magic.
pub const REQ_GET_MAGIC: u8 = 0;

/// bRequest: switch the firmware operating mode (`wValue` carries the code).
pub const REQ_SET_DEVICE_MODE: u8 = 1;

/// bmRequestType of the magic read: device-to-host, vendor, device recipient.
pub const REQUEST_TYPE_VENDOR_IN: u8 = 0xc0;

/// bmRequestType of the mode switch: host-to-device, vendor, device recipient.
pub const REQUEST_TYPE_VENDOR_OUT: u8 = 0x40;

/// Expected response to [`REQ_GET_MAGIC`]; anything else is not our dongle.
pub const DEVICE_MAGIC: [u8; 4] = *b"srxe";

/// Bulk OUT endpoint the bootloader takes commands on.
pub const BOOTLOADER_EP_OUT: u8 = 0x04;

/// Bulk IN endpoint the bootloader acknowledges on.
pub const BOOTLOADER_EP_IN: u8 = 0x83;

/// Command byte that makes the bootloader hand over to the application.
pub const BOOTLOADER_EXIT_CMD: u8 = b'E';

/// Acknowledgment byte the bootloader sends before re-enumerating.
pub const BOOTLOADER_EXIT_ACK: u8 = b'\r';

/// Interfaces the kernel may have bound a driver to while the bootloader's
/// CDC function is enumerated; both must be detached before raw bulk I/O.
pub const BOOTLOADER_INTERFACES: [u8; 2] = [0, 1];

/// CDC data interface owning the bootloader's bulk endpoint pair.
pub const BOOTLOADER_DATA_INTERFACE: u8 = 1;

/// How long the dongle gets to drop off the bus and re-enumerate after
/// leaving the bootloader. Re-enumeration has no completion signal; this is
/// an empirical upper bound, not a protocol guarantee.
pub const REENUMERATION_WAIT: Duration = Duration::from_secs(3);
