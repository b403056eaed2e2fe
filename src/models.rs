//! Data models module
//!
//! Defines core data structures:
//! - WifiConfig: the full configuration record shared with the daemon
//! - PowerMode: power management strategy selector
//! - StoreError / RestartError: typed failures for persistence and
//!   service control

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Power management strategy used by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerMode {
    #[default]
    Normal,
    Eco,
    Aggressive,
}

impl PowerMode {
    /// Parse a form-submitted mode string. Anything outside the known set
    /// yields None so the caller can drop the request.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(PowerMode::Normal),
            "eco" => Some(PowerMode::Eco),
            "aggressive" => Some(PowerMode::Aggressive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerMode::Normal => "normal",
            PowerMode::Eco => "eco",
            PowerMode::Aggressive => "aggressive",
        }
    }
}

/// The complete configuration record consumed by the daemon.
///
/// The record is always fully populated: fields missing from the persisted
/// file fall back to the daemon's built-in defaults, so a partially written
/// or older file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    /// Network identifier
    pub ssid: String,
    /// Network credential, stored in cleartext for the daemon
    pub password: String,
    /// IPv4 literal assigned to the interface
    pub static_ip: String,
    /// IPv4 literal of the default gateway
    pub gateway: String,
    /// IPv4 literal of the DNS server
    pub dns: String,
    /// Connectivity check interval in seconds (5-300)
    pub check_interval: i64,
    /// Battery percentage below which the daemon stands down (0-100)
    pub min_battery: i64,
    /// Temperature ceiling in milli-degrees C (0-100000)
    pub max_temp: i64,
    /// Power management strategy
    pub power_mode: PowerMode,
    /// Weekly schedule flags, index 0 = Sunday, 1 = active
    pub active_days: [u8; 7],
    /// First active hour of the day (0-23)
    pub start_hour: i64,
    /// Last active hour of the day (0-23)
    pub end_hour: i64,
    /// Last requested disable length in minutes
    pub disable_duration: i64,
    /// Unix timestamp before which the daemon stays inactive, 0 = active
    pub disable_until: i64,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: "default_wifi".to_string(),
            password: "default_password".to_string(),
            static_ip: "192.168.1.100".to_string(),
            gateway: "192.168.1.1".to_string(),
            dns: "8.8.8.8".to_string(),
            check_interval: 30,
            min_battery: 20,
            max_temp: 80000,
            power_mode: PowerMode::Normal,
            active_days: [1; 7],
            start_hour: 0,
            end_hour: 23,
            disable_duration: 0,
            disable_until: 0,
        }
    }
}

impl WifiConfig {
    /// True while the daemon is inside a requested disable window
    pub fn is_disabled_at(&self, now: i64) -> bool {
        self.disable_until > now
    }
}

/// Failures while persisting the configuration file.
/// Reported to the user as an error banner; the in-memory record is kept.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while restarting the daemon service.
/// Non-fatal to the request: the configuration change is already saved.
#[derive(Debug, thiserror::Error)]
pub enum RestartError {
    #[error("failed to invoke service manager: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("restart of {unit} exited with code {code:?}: {stderr}")]
    NonZeroExit {
        unit: String,
        code: Option<i32>,
        stderr: String,
    },
}
