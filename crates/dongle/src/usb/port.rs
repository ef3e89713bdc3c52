//! Device access traits
//!
//! The mode-transition protocol needs only a handful of primitive
//! operations on the device, plus one way of finding it again after it
//! re-enumerates. Keeping those behind traits lets the controller's
//! sequencing be exercised against a recording mock, with `rusb` providing
//! the production implementation.

use common::Result;
use protocol::DongleId;

/// Raw access to one located dongle
///
/// A port is good for at most one transition step: once the device
/// re-enumerates the port is stale, and a fresh one has to be located.
pub trait DonglePort {
    /// Identity the device was enumerated under.
    fn identity(&self) -> DongleId;

    /// Whether a kernel driver is currently bound to `interface`.
    fn kernel_driver_active(&mut self, interface: u8) -> Result<bool>;

    /// Unbind the kernel driver from `interface`.
    fn detach_kernel_driver(&mut self, interface: u8) -> Result<()>;

    /// Claim `interface` for raw I/O.
    fn claim_interface(&mut self, interface: u8) -> Result<()>;

    /// Write `data` to the bulk OUT endpoint `endpoint`, returning the
    /// number of bytes accepted.
    fn write_bulk(&mut self, endpoint: u8, data: &[u8]) -> Result<usize>;

    /// Read into `buf` from the bulk IN endpoint `endpoint`, returning the
    /// number of bytes received.
    fn read_bulk(&mut self, endpoint: u8, buf: &mut [u8]) -> Result<usize>;

    /// Vendor control read on the default endpoint.
    fn read_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize>;

    /// Vendor control write on the default endpoint.
    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize>;
}

/// Access to the bus the dongle lives on
pub trait DongleBus {
    /// Port type handed out by [`locate`](Self::locate).
    type Port: DonglePort;

    /// Scan attached devices for the dongle's known identities, in priority
    /// order, and return the first match.
    fn locate(&mut self) -> Result<Option<Self::Port>>;

    /// Block until the bus has had time to re-enumerate the device.
    ///
    /// Re-enumeration exposes no completion signal, so implementations
    /// wait a fixed interval rather than poll.
    fn settle(&mut self);
}
