//! # Slot Connection
//!
//! Manages the base data directory and the persistent key-value slots
//! inside it. Every slot is a single JSON file holding one serialized
//! snapshot of an in-memory value (`children.json`, `auth.json`, ...).
//!
//! Slot reads fail soft: a missing or malformed payload yields the
//! caller-supplied default instead of an error. Slot writes are full
//! atomic overwrites; a failed write leaves the previous payload on disk
//! and is reported through the log only.

use anyhow::Result;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// SlotConnection manages file paths for the per-installation data
/// directory and reads/writes whole-value slot snapshots.
#[derive(Clone)]
pub struct SlotConnection {
    base_directory: PathBuf,
}

impl SlotConnection {
    /// Create a new slot connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new slot connection in the default data directory
    /// (`~/Documents/Ministry Tracker`, falling back to the home directory)
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory"))?;

        Self::new(parent.join("Ministry Tracker"))
    }

    /// Get the base data directory
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the path of a named slot file
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", slot))
    }

    /// Load the value stored in a slot, falling back to `default` when the
    /// slot is absent or its payload cannot be parsed. Never fails.
    pub fn load_slot<T: DeserializeOwned>(&self, slot: &str, default: T) -> T {
        let path = self.slot_path(slot);

        if !path.exists() {
            debug!("Slot '{}' not present, using default", slot);
            return default;
        }

        let payload = match fs::read_to_string(&path) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to read slot '{}': {}. Using default.", slot, e);
                return default;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed payload in slot '{}': {}. Using default.", slot, e);
                default
            }
        }
    }

    /// Serialize `value` and overwrite the slot with it. A failed write is
    /// logged and leaves the previously persisted payload untouched; the
    /// in-memory value the caller holds may then be ahead of the disk copy.
    pub fn save_slot<T: Serialize>(&self, slot: &str, value: &T) {
        if let Err(e) = self.write_slot(slot, value) {
            error!("Failed to persist slot '{}': {}", slot, e);
        }
    }

    fn write_slot<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
            info!("Created data directory: {:?}", self.base_directory);
        }

        let payload = serde_json::to_string_pretty(value)?;
        let path = self.slot_path(slot);

        // Atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, payload)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved slot '{}' to {:?}", slot, path);
        Ok(())
    }

    /// Remove a slot file entirely. Used by draft-style buffers whose
    /// discarded state is "absent", not "empty". No-op when already absent.
    pub fn clear_slot(&self, slot: &str) {
        let path = self.slot_path(slot);
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&path) {
            error!("Failed to clear slot '{}': {}", slot, e);
        } else {
            debug!("Cleared slot '{}'", slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (SlotConnection, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = SlotConnection::new(temp_dir.path()).unwrap();
        (connection, temp_dir)
    }

    #[test]
    fn test_load_missing_slot_returns_default() {
        let (connection, _temp_dir) = setup();

        let value: Vec<String> = connection.load_slot("nothing_here", vec!["seed".to_string()]);
        assert_eq!(value, vec!["seed".to_string()]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (connection, _temp_dir) = setup();

        connection.save_slot("numbers", &vec![1, 2, 3]);
        let value: Vec<i32> = connection.load_slot("numbers", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_corrupted_slot_returns_default() {
        let (connection, _temp_dir) = setup();

        std::fs::write(connection.slot_path("broken"), "{not valid json!").unwrap();

        let value: Vec<i32> = connection.load_slot("broken", vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn test_save_overwrites_whole_slot() {
        let (connection, _temp_dir) = setup();

        connection.save_slot("flag", &true);
        connection.save_slot("flag", &false);

        let value: bool = connection.load_slot("flag", true);
        assert!(!value);
    }

    #[test]
    fn test_clear_slot_is_idempotent() {
        let (connection, _temp_dir) = setup();

        connection.save_slot("scratch", &"something".to_string());
        connection.clear_slot("scratch");
        connection.clear_slot("scratch");

        let value: String = connection.load_slot("scratch", "default".to_string());
        assert_eq!(value, "default");
    }

    #[test]
    fn test_persistence_across_connections() {
        let (connection, temp_dir) = setup();
        connection.save_slot("kept", &42u32);

        let reopened = SlotConnection::new(temp_dir.path()).unwrap();
        let value: u32 = reopened.load_slot("kept", 0);
        assert_eq!(value, 42);
    }
}
