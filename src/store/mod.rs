//! Configuration persistence module
//!
//! Handles JSON configuration parsing, lenient loading, and atomic updates:
//! - ConfigStore: injected storage seam so handlers never touch the
//!   filesystem directly
//! - FileStore: the production store backed by the file shared with the
//!   daemon process
//! - MemoryStore: in-process substitute for exercising handlers in tests

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::models::{StoreError, WifiConfig};

/// Storage seam for the configuration record.
///
/// load never fails: the daemon and the panel both treat a missing or
/// unreadable file as "defaults", so callers always get a full record.
/// save reports failure as a value; the caller decides how to surface it.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> WifiConfig;
    fn save(&self, config: &WifiConfig) -> Result<(), StoreError>;
}

/// Store backed by the JSON file the daemon re-reads after each restart
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    /// Load the current record. A missing file yields defaults without
    /// creating it; an unreadable or unparseable file degrades to defaults
    /// with a logged warning rather than failing the request.
    fn load(&self) -> WifiConfig {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return WifiConfig::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "config file unreadable, using defaults");
                return WifiConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "config file unparseable, using defaults");
                WifiConfig::default()
            }
        }
    }

    /// Persist the record with a whole-file replace.
    ///
    /// Writes a uniquely named temp file next to the target, fsyncs it,
    /// then renames it over the target so a concurrent reader (another
    /// panel request, or the daemon itself) never observes a partial
    /// document. Last writer wins.
    fn save(&self, config: &WifiConfig) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "config".to_string());
        let temp_path = parent.join(format!(".{}.tmp-{}", file_name, uuid::Uuid::new_v4()));

        let write_result = (|| {
            let mut temp_file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp_path)?;
            temp_file.write_all(json.as_bytes())?;
            temp_file.sync_all()?;
            drop(temp_file);
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(source) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        Ok(())
    }
}

/// In-memory store for handler tests and headless operation
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<WifiConfig>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new(initial: WifiConfig) -> Self {
        Self {
            record: Mutex::new(initial),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves report a persistence failure
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> WifiConfig {
        self.record.lock().expect("store mutex poisoned").clone()
    }

    fn save(&self, config: &WifiConfig) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "saves disabled"),
            });
        }
        *self.record.lock().expect("store mutex poisoned") = config.clone();
        Ok(())
    }
}
