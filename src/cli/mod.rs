//! CLI argument parsing and validation module
//!
//! Handles the panel's command-line interface using clap, including:
//! - Configuration file path override
//! - Listen address selection
//! - Service unit override
//! - Quiet mode

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, Command};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_LISTEN_ADDR, SERVICE_UNIT};

/// Effective runtime options for the panel process
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Path of the configuration file shared with the daemon
    pub config_path: PathBuf,
    /// Address the HTTP listener binds to
    pub listen_addr: SocketAddr,
    /// Systemd unit restarted after accepted changes
    pub service_unit: String,
    /// Restrict logging to errors only
    pub quiet: bool,
}

/// Parse command line arguments and return the panel options
pub fn parse_args() -> Result<PanelOptions> {
    let matches = Command::new("wifid-panel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Web control panel for the wifi_daemon service")
        .long_about(
            "Serves a single-page control panel that edits the daemon's JSON \
             configuration file and restarts the service after each change.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file path shared with the daemon")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("listen")
                .short('l')
                .long("listen")
                .value_name("ADDR")
                .help("Address to listen on, e.g. 0.0.0.0:8080")
                .default_value(DEFAULT_LISTEN_ADDR),
        )
        .arg(
            Arg::new("service")
                .short('s')
                .long("service")
                .value_name("UNIT")
                .help("Systemd unit to restart after configuration changes")
                .default_value(SERVICE_UNIT),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Log errors only")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let listen_value = matches
        .get_one::<String>("listen")
        .expect("listen has a default");
    let listen_addr: SocketAddr = listen_value
        .parse()
        .map_err(|_| anyhow!("Invalid listen address: {}", listen_value))?;

    let config_path = PathBuf::from(
        matches
            .get_one::<String>("config")
            .expect("config has a default"),
    );

    let service_unit = matches
        .get_one::<String>("service")
        .expect("service has a default")
        .clone();

    Ok(PanelOptions {
        config_path,
        listen_addr,
        service_unit,
        quiet: matches.get_flag("quiet"),
    })
}
