//! Dongle identity and mode definitions
//!
//! The dongle enumerates under one of three vendor/product identity pairs,
//! one per firmware operating mode. This module defines those identities,
//! the mode enum with its wire codes, and the candidate order the locator
//! scans the bus in.

use crate::error::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// Atmel vendor ID the dongle enumerates under in every mode.
pub const VENDOR_ID: u16 = 0x03eb;

/// Truncated spelling of [`VENDOR_ID`].
///
/// Numerically identical to `VENDOR_ID`; kept as a separate locate candidate
/// so the bootloader probe covers both spellings explicitly.
pub const VENDOR_ID_SHORT: u16 = 0x3eb;

/// Product ID presented by the firmware-update bootloader.
pub const PRODUCT_ID_BOOTLOADER: u16 = 0x204a;

/// Product ID presented by the USB-to-serial bridge firmware.
pub const PRODUCT_ID_CDC: u16 = 0x204b;

/// Product ID presented by the AVRISP-MKII compatible programmer firmware.
pub const PRODUCT_ID_AVRISP: u16 = 0x2104;

/// USB identity pair (idVendor, idProduct) the dongle enumerates under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DongleId {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
}

impl DongleId {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }
}

impl fmt::Display for DongleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// Firmware operating mode, derived from the enumerated product ID
///
/// Exactly one mode is active at a time. The discriminants are the wire
/// codes carried in `wValue` of the mode-set control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceMode {
    /// USB-to-serial bridge (virtual COM port)
    Cdc = 0,
    /// AVRISP-MKII compatible programmer
    Avrisp = 1,
    /// Firmware-update bootloader
    Bootloader = 2,
}

impl DeviceMode {
    /// Wire code sent as `wValue` of the mode-set request.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Mode for a product ID, or `None` when the ID is not one of the
    /// dongle's three identities.
    pub const fn from_product_id(product_id: u16) -> Option<Self> {
        match product_id {
            PRODUCT_ID_CDC => Some(Self::Cdc),
            PRODUCT_ID_AVRISP => Some(Self::Avrisp),
            PRODUCT_ID_BOOTLOADER => Some(Self::Bootloader),
            _ => None,
        }
    }

    /// Canonical identity the dongle enumerates under in this mode.
    pub const fn id(self) -> DongleId {
        match self {
            Self::Cdc => DongleId::new(VENDOR_ID, PRODUCT_ID_CDC),
            Self::Avrisp => DongleId::new(VENDOR_ID, PRODUCT_ID_AVRISP),
            Self::Bootloader => DongleId::new(VENDOR_ID, PRODUCT_ID_BOOTLOADER),
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cdc => "CDC",
            Self::Avrisp => "AVRISP",
            Self::Bootloader => "BOOTLOADER",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DeviceMode {
    type Err = ProtocolError;

    /// Mode names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CDC" => Ok(Self::Cdc),
            "AVRISP" => Ok(Self::Avrisp),
            "BOOTLOADER" => Ok(Self::Bootloader),
            _ => Err(ProtocolError::UnknownModeName {
                name: s.to_string(),
            }),
        }
    }
}

/// Identities scanned by the locator, in priority order
///
/// The bootloader identity appears twice, once per vendor-ID spelling; the
/// duplication is deliberate, not a fourth device.
pub const LOCATE_CANDIDATES: [DongleId; 4] = [
    DongleId::new(VENDOR_ID_SHORT, PRODUCT_ID_BOOTLOADER),
    DongleId::new(VENDOR_ID, PRODUCT_ID_BOOTLOADER),
    DongleId::new(VENDOR_ID, PRODUCT_ID_CDC),
    DongleId::new(VENDOR_ID, PRODUCT_ID_AVRISP),
];
