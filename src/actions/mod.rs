//! Panel action parsing and application
//!
//! Each form submission carries an `action` field plus action-specific
//! values. Parsing and validation live here, away from the HTTP layer,
//! so the accept/ignore policy can be tested without a browser:
//! - an unknown or missing action is a silent no-op
//! - an out-of-range power mode or non-positive disable duration is
//!   dropped before any mutation
//! - numeric fields coerce leniently (leading integer prefix, else 0);
//!   range limits are enforced by the form widgets, not re-checked here

use std::collections::HashMap;

use crate::models::{PowerMode, WifiConfig};

/// A validated mutation request against the configuration record
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdatePowerMode {
        mode: PowerMode,
    },
    DisableDaemon {
        minutes: i64,
    },
    UpdateSchedule {
        start_hour: i64,
        end_hour: i64,
        days: [u8; 7],
    },
    UpdateNetwork {
        ssid: String,
        password: String,
        static_ip: String,
        gateway: String,
        dns: String,
    },
    UpdateSystem {
        check_interval: i64,
        min_battery: i64,
        max_temp: i64,
    },
}

impl Action {
    /// Build an action from submitted form fields.
    ///
    /// Returns None for anything that must be ignored: unknown actions,
    /// rejected power modes, non-positive disable durations. Missing text
    /// fields coerce to the empty string and missing numeric fields to 0.
    pub fn from_form(fields: &HashMap<String, String>) -> Option<Action> {
        match fields.get("action").map(String::as_str) {
            Some("update_power_mode") => {
                let mode = PowerMode::parse(text_field(fields, "power_mode"))?;
                Some(Action::UpdatePowerMode { mode })
            }
            Some("disable_daemon") => {
                let minutes = int_field(fields, "disable_duration");
                if minutes > 0 {
                    Some(Action::DisableDaemon { minutes })
                } else {
                    None
                }
            }
            Some("update_schedule") => {
                let mut days = [0u8; 7];
                for (i, day) in days.iter_mut().enumerate() {
                    if fields.contains_key(&format!("day_{}", i)) {
                        *day = 1;
                    }
                }
                Some(Action::UpdateSchedule {
                    start_hour: int_field(fields, "start_hour"),
                    end_hour: int_field(fields, "end_hour"),
                    days,
                })
            }
            Some("update_network") => Some(Action::UpdateNetwork {
                ssid: text_field(fields, "ssid").to_string(),
                password: text_field(fields, "password").to_string(),
                static_ip: text_field(fields, "static_ip").to_string(),
                gateway: text_field(fields, "gateway").to_string(),
                dns: text_field(fields, "dns").to_string(),
            }),
            Some("update_system") => Some(Action::UpdateSystem {
                check_interval: int_field(fields, "check_interval"),
                min_battery: int_field(fields, "min_battery"),
                max_temp: int_field(fields, "max_temp"),
            }),
            _ => None,
        }
    }

    /// Apply the mutation to the record. `now` is the request's unix
    /// timestamp, used to anchor the disable window.
    pub fn apply(&self, config: &mut WifiConfig, now: i64) {
        match self {
            Action::UpdatePowerMode { mode } => {
                config.power_mode = *mode;
            }
            Action::DisableDaemon { minutes } => {
                config.disable_until = now + minutes * 60;
                config.disable_duration = *minutes;
            }
            Action::UpdateSchedule {
                start_hour,
                end_hour,
                days,
            } => {
                config.start_hour = *start_hour;
                config.end_hour = *end_hour;
                config.active_days = *days;
            }
            Action::UpdateNetwork {
                ssid,
                password,
                static_ip,
                gateway,
                dns,
            } => {
                config.ssid = ssid.clone();
                config.password = password.clone();
                config.static_ip = static_ip.clone();
                config.gateway = gateway.clone();
                config.dns = dns.clone();
            }
            Action::UpdateSystem {
                check_interval,
                min_battery,
                max_temp,
            } => {
                config.check_interval = *check_interval;
                config.min_battery = *min_battery;
                config.max_temp = *max_temp;
            }
        }
    }

    /// Banner text shown after the mutation is persisted
    pub fn success_message(&self) -> String {
        match self {
            Action::UpdatePowerMode { .. } => "Power mode updated successfully".to_string(),
            Action::DisableDaemon { minutes } => {
                format!("Daemon disabled for {} minutes", minutes)
            }
            Action::UpdateSchedule { .. } => "Schedule updated successfully".to_string(),
            Action::UpdateNetwork { .. } => "Network settings updated successfully".to_string(),
            Action::UpdateSystem { .. } => "System settings updated successfully".to_string(),
        }
    }

    /// Short identifier for structured logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::UpdatePowerMode { .. } => "update_power_mode",
            Action::DisableDaemon { .. } => "disable_daemon",
            Action::UpdateSchedule { .. } => "update_schedule",
            Action::UpdateNetwork { .. } => "update_network",
            Action::UpdateSystem { .. } => "update_system",
        }
    }
}

fn text_field<'a>(fields: &'a HashMap<String, String>, name: &str) -> &'a str {
    fields.get(name).map(String::as_str).unwrap_or("")
}

fn int_field(fields: &HashMap<String, String>, name: &str) -> i64 {
    coerce_int(text_field(fields, name))
}

/// Lenient integer coercion: optional sign followed by the longest run of
/// leading digits, everything else coerces to 0. "12x" is 12, "x12" is 0.
pub fn coerce_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let prefix: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    prefix.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
