//! Common error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No device matching a known dongle identity is attached.
    ///
    /// The message doubles as the user-facing wording, so the mode query
    /// can print it verbatim.
    #[error("No devices found")]
    DeviceNotFound,

    /// The device deviated from the expected handshake.
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    /// Failure in the USB stack itself (enumeration, open, transfer).
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
