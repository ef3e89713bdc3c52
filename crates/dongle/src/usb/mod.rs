//! USB access to the dongle
//!
//! Everything that touches the bus lives here: the port/bus traits the
//! mode controller is written against, their rusb-backed implementations,
//! the locator that finds the dongle among attached devices, and the
//! controller driving the mode-transition protocol.

pub mod controller;
pub mod device;
pub mod locator;
#[cfg(test)]
pub mod mock;
pub mod port;

pub use controller::{current_mode, set_mode};
pub use locator::UsbBus;
pub use port::DongleBus;
