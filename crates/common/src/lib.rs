//! Common utilities for srxe-dongle
//!
//! This crate provides the shared infrastructure of the dongle tool: the
//! error taxonomy, tracing-based logging setup, and test helpers used
//! across crates.

pub mod error;
pub mod logging;
pub mod test_utils;

pub use error::{Error, Result};
pub use logging::setup_logging;
