//! Structured event logging for the panel
//!
//! Emits one log line per operational event, with a JSON payload appended
//! so log scrapers on the device can pick events apart without parsing
//! free-form text.

use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{info, warn};

use crate::models::{RestartError, StoreError};

/// Event logger carried in the shared panel state
#[derive(Debug, Clone)]
pub struct PanelLogger {
    /// Service unit the panel controls, included in every event
    unit: String,
}

impl PanelLogger {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    /// Log panel startup with the effective runtime settings
    pub fn log_startup(&self, listen_addr: SocketAddr, config_path: &Path) {
        let payload = json!({
            "event": "panel_startup",
            "pid": std::process::id(),
            "listen_addr": listen_addr.to_string(),
            "config_path": config_path.display().to_string(),
            "service_unit": self.unit,
        });
        info!("Panel started | {}", payload);
    }

    /// Log an accepted and persisted configuration change
    pub fn log_action_applied(&self, action: &str) {
        let payload = json!({
            "event": "config_updated",
            "action": action,
            "service_unit": self.unit,
        });
        info!("Configuration updated | {}", payload);
    }

    /// Log a persistence failure surfaced to the user
    pub fn log_save_failure(&self, action: &str, error: &StoreError) {
        let payload = json!({
            "event": "config_save_failed",
            "action": action,
            "error": error.to_string(),
        });
        warn!("Configuration save failed | {}", payload);
    }

    /// Log a restart outcome. Failures are not surfaced in the HTTP
    /// response, so the log line is the only place they show up.
    pub fn log_restart_result(&self, result: &Result<(), RestartError>) {
        match result {
            Ok(()) => {
                let payload = json!({
                    "event": "daemon_restarted",
                    "service_unit": self.unit,
                });
                info!("Daemon restarted | {}", payload);
            }
            Err(err) => {
                let payload = json!({
                    "event": "daemon_restart_failed",
                    "service_unit": self.unit,
                    "error": err.to_string(),
                });
                warn!("Daemon restart failed | {}", payload);
            }
        }
    }

    /// Log shutdown once the listener stops accepting requests
    pub fn log_shutdown(&self, reason: &str) {
        let payload = json!({
            "event": "panel_shutdown",
            "reason": reason,
        });
        info!("Panel shutting down | {}", payload);
    }
}
