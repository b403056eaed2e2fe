//! Daemon service control module
//!
//! Wraps the host's service manager so handlers can ask for a daemon
//! restart after each accepted configuration change. The restart outcome
//! is informational: a failed restart never undoes a saved configuration.

use std::process::Command;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::models::RestartError;

/// Controller for the external daemon process.
///
/// restart returns a result so callers cannot pretend the call is
/// infallible, even where they choose to drop the outcome.
pub trait ServiceController: Send + Sync {
    fn restart(&self) -> Result<(), RestartError>;
}

/// Restarts a named systemd unit with `systemctl restart`
pub struct SystemdController {
    unit: String,
}

impl SystemdController {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl ServiceController for SystemdController {
    /// Invoke `systemctl restart <unit>` and report success iff the exit
    /// status is zero. Blocks until systemctl returns.
    fn restart(&self) -> Result<(), RestartError> {
        let output = Command::new("systemctl")
            .args(["restart", &self.unit])
            .output()?;

        if !output.status.success() {
            return Err(RestartError::NonZeroExit {
                unit: self.unit.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Test double that counts restart requests instead of touching systemd
#[derive(Default)]
pub struct RecordingController {
    restarts: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingController {
    pub fn restarts(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }

    /// Make subsequent restarts report failure
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ServiceController for RecordingController {
    fn restart(&self) -> Result<(), RestartError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RestartError::NonZeroExit {
                unit: "recording".to_string(),
                code: Some(1),
                stderr: "restart disabled".to_string(),
            });
        }
        Ok(())
    }
}
