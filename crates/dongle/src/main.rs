//! SRXE dongle mode switcher
//!
//! Command line tool that finds the SRXE USB dongle by its vendor/product
//! identity and switches its firmware between serial bridge, programmer,
//! and bootloader operation.

mod config;
mod usb;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use common::{Error, setup_logging};
use config::ToolConfig;
use protocol::DeviceMode;
use tracing::info;
use usb::{DongleBus, UsbBus, current_mode, set_mode};

#[derive(Parser, Debug)]
#[command(name = "dongle-mode")]
#[command(author, version, about = "SRXE Dongle Tool - Switch the dongle's firmware mode")]
#[command(long_about = "
Finds the SRXE USB dongle by its vendor/product identity and moves it
between its three firmware operating modes: a USB-to-serial bridge (CDC),
an AVRISP-MKII compatible programmer (AVRISP), and the firmware-update
bootloader (BOOTLOADER).

EXAMPLES:
    # Print the mode the dongle is currently in
    dongle-mode --get-mode

    # Switch to the programmer (mode names are case-insensitive)
    dongle-mode --set-mode avrisp

    # Put the dongle into the bootloader for a firmware update
    dongle-mode --set-mode BOOTLOADER

    # Run with custom config
    dongle-mode --get-mode --config /path/to/config.toml

CONFIGURATION:
    The tool looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/dongle-mode/config.toml
    3. /etc/dongle-mode/config.toml
    4. Built-in defaults

For more information, visit: https://github.com/srxe-tools/srxe-dongle
")]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["get_mode", "set_mode", "save_config"]),
))]
struct Args {
    /// Print the dongle's current mode
    #[arg(long)]
    get_mode: bool,

    /// Switch the dongle to MODE (CDC, AVRISP, or BOOTLOADER)
    #[arg(long, value_name = "MODE")]
    set_mode: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle --save-config flag early (before loading config)
    if args.save_config {
        let config = ToolConfig::default();
        let path = ToolConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    // Load configuration first (to get log level from config if not specified)
    let config = if let Some(ref path) = args.config {
        ToolConfig::load(Some(path.clone())).context("Failed to load configuration")?
    } else {
        ToolConfig::load_or_default()
    };

    // Use CLI log level if specified, otherwise use config value
    let log_level = args.log_level.as_deref().unwrap_or(&config.tool.log_level);
    setup_logging(log_level).context("Failed to setup logging")?;

    let mut bus = open_bus(&config)?;

    if args.get_mode {
        query_mode(&mut bus)
    } else if let Some(ref name) = args.set_mode {
        switch_mode(&mut bus, name)
    } else {
        unreachable!("clap enforces exactly one operation")
    }
}

/// Print the mode the dongle currently presents, or report its absence.
///
/// An absent dongle is an answer, not a failure: the message goes to
/// stderr and the exit status stays zero, keeping stdout parseable.
fn query_mode<B: DongleBus>(bus: &mut B) -> Result<()> {
    match bus.locate()? {
        Some(dongle) => {
            let mode = current_mode(&dongle)?;
            println!("{}", mode);
        }
        None => {
            eprintln!("{}", Error::DeviceNotFound);
        }
    }

    Ok(())
}

/// Drive the dongle into the named mode.
fn switch_mode<B: DongleBus>(bus: &mut B, name: &str) -> Result<()> {
    // Reject bad mode names before the bus is even scanned.
    let target: DeviceMode = name.parse()?;

    let Some(dongle) = bus.locate()? else {
        return Err(Error::DeviceNotFound.into());
    };

    set_mode(bus, dongle, target)?;
    info!("Device mode request complete");
    Ok(())
}

fn open_bus(config: &ToolConfig) -> Result<UsbBus> {
    UsbBus::new(
        config.usb.transfer_timeout(),
        config.usb.reenumeration_wait(),
    )
    .context("Failed to open USB context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::mock::{MockBus, Op, op_log};
    use clap::CommandFactory;
    use protocol::ProtocolError;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_operation_required() {
        assert!(Args::try_parse_from(["dongle-mode"]).is_err());
        assert!(Args::try_parse_from(["dongle-mode", "--get-mode", "--set-mode", "cdc"]).is_err());
        assert!(Args::try_parse_from(["dongle-mode", "--get-mode"]).is_ok());
        assert!(Args::try_parse_from(["dongle-mode", "--set-mode", "cdc"]).is_ok());
        assert!(Args::try_parse_from(["dongle-mode", "--save-config"]).is_ok());
    }

    #[test]
    fn test_mode_argument_is_free_form_until_parsed() {
        // Unknown names are rejected by the protocol parser, not clap, so
        // the error message can list the valid choices.
        let args = Args::try_parse_from(["dongle-mode", "--set-mode", "dfu"]).unwrap();
        assert_eq!(args.set_mode.as_deref(), Some("dfu"));
        assert!(args.set_mode.unwrap().parse::<DeviceMode>().is_err());
    }

    #[test]
    fn test_query_reports_absence_without_device_io() {
        let log = op_log();
        let mut bus = MockBus::new(log.clone());

        // Nothing attached: still a successful query, stdout untouched.
        query_mode(&mut bus).unwrap();

        assert_eq!(*log.borrow(), vec![Op::Locate]);
    }

    #[test]
    fn test_switch_aborts_when_no_device_attached() {
        let log = op_log();
        let mut bus = MockBus::new(log.clone());

        let err = switch_mode(&mut bus, "cdc").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DeviceNotFound)
        ));
        // The failed locate is the only bus activity; no port was ever
        // handed out, so no transfers happened.
        assert_eq!(*log.borrow(), vec![Op::Locate]);
    }

    #[test]
    fn test_switch_rejects_unknown_name_before_bus_scan() {
        let log = op_log();
        let mut bus = MockBus::new(log.clone());

        let err = switch_mode(&mut bus, "dfu").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProtocolError>(),
            Some(ProtocolError::UnknownModeName { .. })
        ));
        assert!(log.borrow().is_empty());
    }
}
