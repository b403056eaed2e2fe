//! Integration tests for the file-backed configuration store
//!
//! Exercises the load/save contract on a real filesystem: default record
//! when no file exists, stable re-saves, lenient handling of damaged
//! files, and whole-file saves under concurrent writers.

use std::sync::Arc;
use std::thread;

use tempfile::tempdir;

use wifid_panel::models::{PowerMode, WifiConfig};
use wifid_panel::store::{ConfigStore, FileStore};

#[test]
fn test_load_without_file_returns_documented_defaults() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("wifi_daemon.json"));

    let config = store.load();
    assert_eq!(config.ssid, "default_wifi");
    assert_eq!(config.password, "default_password");
    assert_eq!(config.static_ip, "192.168.1.100");
    assert_eq!(config.gateway, "192.168.1.1");
    assert_eq!(config.dns, "8.8.8.8");
    assert_eq!(config.check_interval, 30);
    assert_eq!(config.min_battery, 20);
    assert_eq!(config.max_temp, 80000);
    assert_eq!(config.power_mode, PowerMode::Normal);
    assert_eq!(config.active_days, [1; 7]);
    assert_eq!(config.start_hour, 0);
    assert_eq!(config.end_hour, 23);
    assert_eq!(config.disable_duration, 0);
    assert_eq!(config.disable_until, 0);
}

#[test]
fn test_save_load_save_is_byte_stable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wifi_daemon.json");
    let store = FileStore::new(&path);

    let mut config = WifiConfig::default();
    config.ssid = "rooftop".to_string();
    config.power_mode = PowerMode::Aggressive;
    store.save(&config).unwrap();
    let first = std::fs::read(&path).unwrap();

    store.save(&store.load()).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_persisted_file_is_human_readable_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wifi_daemon.json");
    let store = FileStore::new(&path);

    store.save(&WifiConfig::default()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    // Pretty-printed: one key per line
    assert!(content.contains("\n  \"ssid\""));
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["power_mode"], "normal");
    assert_eq!(value["active_days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_corrupted_file_degrades_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wifi_daemon.json");
    std::fs::write(&path, "\0\0 definitely not json").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.load(), WifiConfig::default());
    // Load must not rewrite the file on its own
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "\0\0 definitely not json"
    );
}

#[test]
fn test_concurrent_saves_never_interleave() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wifi_daemon.json");
    let store = Arc::new(FileStore::new(&path));

    let mut writers = Vec::new();
    for worker in 0..4 {
        let store = store.clone();
        writers.push(thread::spawn(move || {
            let mut config = WifiConfig::default();
            config.ssid = format!("network-{}", worker);
            config.check_interval = 5 + worker;
            for _ in 0..25 {
                store.save(&config).unwrap();
            }
            config
        }));
    }

    let candidates: Vec<WifiConfig> = writers.into_iter().map(|w| w.join().unwrap()).collect();

    // The surviving file is exactly one writer's record, never a mixture
    let final_config: WifiConfig =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(candidates.contains(&final_config));
}
