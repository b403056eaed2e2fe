//! wifid-panel - WiFi Daemon Control Panel Library
//!
//! This library exposes the configuration store, action pipeline, and
//! HTTP panel so they can be exercised without the binary.

pub mod actions;
pub mod cli;
pub mod constants;
pub mod logging;
pub mod models;
pub mod panel;
pub mod service;
pub mod store;
