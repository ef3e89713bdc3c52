//! Dongle location
//!
//! Scans the bus for devices matching the dongle's known identities. The
//! scan walks the candidate table in priority order, so when several
//! identities are present the bootloader wins over the application modes.

use crate::usb::device::UsbDongle;
use crate::usb::port::DongleBus;
use common::Result;
use protocol::LOCATE_CANDIDATES;
use rusb::{Context, UsbContext};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// rusb-backed bus access
pub struct UsbBus {
    /// libusb context
    context: Context,
    /// Timeout applied to every transfer on located devices
    transfer_timeout: Duration,
    /// How long to wait out a re-enumeration
    settle_wait: Duration,
}

impl UsbBus {
    /// Create a new bus accessor with its own libusb context.
    pub fn new(transfer_timeout: Duration, settle_wait: Duration) -> Result<Self> {
        Ok(Self {
            context: Context::new()?,
            transfer_timeout,
            settle_wait,
        })
    }
}

impl DongleBus for UsbBus {
    type Port = UsbDongle;

    fn locate(&mut self) -> Result<Option<UsbDongle>> {
        let devices = self.context.devices()?;

        for candidate in LOCATE_CANDIDATES {
            for device in devices.iter() {
                let descriptor = match device.device_descriptor() {
                    Ok(descriptor) => descriptor,
                    Err(e) => {
                        debug!(
                            "Skipping device at bus {:03} address {:03}, descriptor unreadable: {}",
                            device.bus_number(),
                            device.address(),
                            e
                        );
                        continue;
                    }
                };

                if descriptor.vendor_id() == candidate.vendor_id
                    && descriptor.product_id() == candidate.product_id
                {
                    debug!(
                        "Found dongle {} at bus {:03} device {:03}",
                        candidate,
                        device.bus_number(),
                        device.address()
                    );
                    return Ok(Some(UsbDongle::new(device, candidate, self.transfer_timeout)));
                }
            }
        }

        debug!("No dongle among attached devices");
        Ok(None)
    }

    fn settle(&mut self) {
        info!(
            "Waiting {:?} for the dongle to re-enumerate",
            self.settle_wait
        );
        thread::sleep(self.settle_wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_creation() {
        // Context creation can fail in sandboxed environments without a
        // usbfs; only assert the constructor itself is well-formed.
        match UsbBus::new(Duration::from_secs(5), Duration::from_secs(3)) {
            Ok(bus) => assert_eq!(bus.settle_wait, Duration::from_secs(3)),
            Err(e) => eprintln!("USB context unavailable: {}", e),
        }
    }
}
