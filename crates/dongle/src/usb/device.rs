//! USB dongle wrapper
//!
//! Wraps a `rusb::Device` with the identity it was matched under and the
//! bookkeeping needed to undo interface claims and kernel driver detaches
//! when the wrapper is dropped. The device handle is opened lazily, so a
//! plain mode query never needs open permissions on the device node.

use crate::usb::port::DonglePort;
use common::Result;
use protocol::DongleId;
use rusb::{Context, Device, DeviceHandle};
use std::time::Duration;
use tracing::debug;

/// One located dongle on the bus
pub struct UsbDongle {
    /// Underlying rusb device
    device: Device<Context>,
    /// Identity the locator matched this device under
    identity: DongleId,
    /// Timeout applied to every transfer
    timeout: Duration,
    /// Device handle (opened on first I/O)
    handle: Option<DeviceHandle<Context>>,
    /// Interfaces claimed by us
    claimed_interfaces: Vec<u8>,
    /// Interfaces we detached a kernel driver from
    detached_interfaces: Vec<u8>,
}

impl UsbDongle {
    /// Wrap `device`, which must already have matched `identity`.
    pub fn new(device: Device<Context>, identity: DongleId, timeout: Duration) -> Self {
        Self {
            device,
            identity,
            timeout,
            handle: None,
            claimed_interfaces: Vec::new(),
            detached_interfaces: Vec::new(),
        }
    }

    /// Get the bus number
    pub fn bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    /// Get the device address
    pub fn device_address(&self) -> u8 {
        self.device.address()
    }

    /// Open the device handle if it is not open yet.
    fn open_handle(&mut self) -> Result<&DeviceHandle<Context>> {
        if self.handle.is_none() {
            let handle = self.device.open()?;
            debug!(
                "Opened dongle {} at bus {:03} device {:03}",
                self.identity,
                self.bus_number(),
                self.device_address()
            );
            self.handle = Some(handle);
        }

        // Guaranteed Some by the branch above.
        Ok(self.handle.as_ref().ok_or(rusb::Error::NoDevice)?)
    }
}

impl DonglePort for UsbDongle {
    fn identity(&self) -> DongleId {
        self.identity
    }

    fn kernel_driver_active(&mut self, interface: u8) -> Result<bool> {
        Ok(self.open_handle()?.kernel_driver_active(interface)?)
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<()> {
        self.open_handle()?.detach_kernel_driver(interface)?;
        self.detached_interfaces.push(interface);
        debug!("Detached kernel driver from interface {}", interface);
        Ok(())
    }

    fn claim_interface(&mut self, interface: u8) -> Result<()> {
        self.open_handle()?.claim_interface(interface)?;
        self.claimed_interfaces.push(interface);
        debug!("Claimed interface {}", interface);
        Ok(())
    }

    fn write_bulk(&mut self, endpoint: u8, data: &[u8]) -> Result<usize> {
        let timeout = self.timeout;
        Ok(self.open_handle()?.write_bulk(endpoint, data, timeout)?)
    }

    fn read_bulk(&mut self, endpoint: u8, buf: &mut [u8]) -> Result<usize> {
        let timeout = self.timeout;
        Ok(self.open_handle()?.read_bulk(endpoint, buf, timeout)?)
    }

    fn read_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize> {
        let timeout = self.timeout;
        Ok(self
            .open_handle()?
            .read_control(request_type, request, value, index, buf, timeout)?)
    }

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        let timeout = self.timeout;
        Ok(self
            .open_handle()?
            .write_control(request_type, request, value, index, data, timeout)?)
    }
}

impl Drop for UsbDongle {
    /// Best-effort restoration of kernel control.
    ///
    /// After a mode transition the device has usually re-enumerated and
    /// these calls fail against the stale handle, which is fine.
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            for interface in self.claimed_interfaces.drain(..) {
                if let Err(e) = handle.release_interface(interface) {
                    debug!("Could not release interface {}: {}", interface, e);
                }
            }

            for interface in self.detached_interfaces.drain(..) {
                if let Err(e) = handle.attach_kernel_driver(interface) {
                    debug!(
                        "Could not reattach kernel driver to interface {}: {}",
                        interface, e
                    );
                }
            }
        }
    }
}
