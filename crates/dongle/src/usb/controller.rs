//! Mode controller
//!
//! Derives the dongle's operating mode from its USB identity and drives the
//! transition protocol: an optional bootloader-exit sequence over the bulk
//! pair, a wait for re-enumeration, then the vendor control handshake
//! (magic check, mode set) against the freshly located device.

use crate::usb::port::{DongleBus, DonglePort};
use common::{Error, Result};
use protocol::{
    BOOTLOADER_DATA_INTERFACE, BOOTLOADER_EP_IN, BOOTLOADER_EP_OUT, BOOTLOADER_EXIT_ACK,
    BOOTLOADER_EXIT_CMD, BOOTLOADER_INTERFACES, DEVICE_MAGIC, DeviceMode, ProtocolError,
    REQ_GET_MAGIC, REQ_SET_DEVICE_MODE, REQUEST_TYPE_VENDOR_IN, REQUEST_TYPE_VENDOR_OUT,
};
use tracing::{debug, info};

/// Operating mode of a located dongle, read off its product ID.
///
/// Needs no I/O on the device. `UnknownProductId` is unreachable for ports
/// produced by the locator, but the mapping is guarded anyway.
pub fn current_mode(port: &impl DonglePort) -> Result<DeviceMode> {
    let identity = port.identity();
    DeviceMode::from_product_id(identity.product_id).ok_or_else(|| {
        Error::Protocol(ProtocolError::UnknownProductId {
            product_id: identity.product_id,
        })
    })
}

/// Switch the dongle into `target` mode.
///
/// A no-op when the dongle already is in `target`. Otherwise the dongle is
/// walked out of the bootloader first if that is where it sits, then
/// re-located and told to switch. The port is consumed: whichever handle
/// the caller held is stale once the transition starts, and the handshake
/// always goes to a freshly located device.
pub fn set_mode<B: DongleBus>(bus: &mut B, mut port: B::Port, target: DeviceMode) -> Result<()> {
    let current = current_mode(&port)?;
    if current == target {
        debug!("Device already in {} mode", current);
        return Ok(());
    }

    info!("Switching device mode: {} -> {}", current, target);

    if current == DeviceMode::Bootloader {
        exit_bootloader(&mut port)?;
        bus.settle();
    }
    drop(port);

    let mut port = bus.locate()?.ok_or(Error::DeviceNotFound)?;
    check_magic(&mut port)?;

    port.write_control(
        REQUEST_TYPE_VENDOR_OUT,
        REQ_SET_DEVICE_MODE,
        target.code(),
        0,
        &[],
    )?;
    info!("Requested {} mode", target);

    Ok(())
}

/// Drive the bootloader's exit handshake so the application firmware can
/// take over the bus.
fn exit_bootloader(port: &mut impl DonglePort) -> Result<()> {
    debug!("Leaving bootloader mode");

    for interface in BOOTLOADER_INTERFACES {
        match port.kernel_driver_active(interface) {
            Ok(true) => {
                debug!("Kernel driver active on interface {}, detaching", interface);
                port.detach_kernel_driver(interface)?;
            }
            Ok(false) => {}
            Err(e) => {
                // Unknown driver state; proceed and let the claim below
                // fail if something really is in the way.
                debug!(
                    "Could not check kernel driver status for interface {}: {}",
                    interface, e
                );
            }
        }
    }

    port.claim_interface(BOOTLOADER_DATA_INTERFACE)?;

    port.write_bulk(BOOTLOADER_EP_OUT, &[BOOTLOADER_EXIT_CMD])?;

    let mut ack = [0u8; 1];
    let n = port.read_bulk(BOOTLOADER_EP_IN, &mut ack)?;
    if n != 1 || ack[0] != BOOTLOADER_EXIT_ACK {
        return Err(Error::Protocol(ProtocolError::UnexpectedExitAck {
            got: ack[..n].to_vec(),
        }));
    }

    debug!("Bootloader acknowledged exit");
    Ok(())
}

/// Confirm the responding device speaks our vendor protocol before any
/// mutating request goes out.
fn check_magic(port: &mut impl DonglePort) -> Result<()> {
    let mut magic = [0u8; 4];
    let n = port.read_control(REQUEST_TYPE_VENDOR_IN, REQ_GET_MAGIC, 0, 0, &mut magic)?;
    if magic[..n] != DEVICE_MAGIC {
        return Err(Error::Protocol(ProtocolError::MagicMismatch {
            got: magic[..n].to_vec(),
        }));
    }

    debug!("Device magic verified");
    Ok(())
}
