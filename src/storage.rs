use crate::currency::migrate_legacy_currency;
use crate::models::{Preference, TrackedProduct};
use color_eyre::{eyre::WrapErr, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key for the tracked item list.
pub const ITEMS_KEY: &str = "pricelens_items_v1";

/// Storage key for the preference record.
pub const PREFS_KEY: &str = "pricelens_prefs_v1";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PRICELENS_DATA_DIR";

/// Handle to the application's persistence medium.
///
/// Two JSON records under fixed keys, one file per key, in a single data
/// directory. The handle is created once at startup and threaded through
/// the controller; all durable state of the application lives behind it.
///
/// Reads are fail-silent: a missing or unreadable record yields the empty
/// state so a corrupt file never blocks startup. Writes propagate errors.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open storage rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)
                .wrap_err_with(|| format!("Failed to create data directory {:?}", root))?;
        }
        Ok(Self { root })
    }

    /// Open storage at the default location.
    ///
    /// `PRICELENS_DATA_DIR` wins if set; otherwise the platform data dir
    /// (falling back to the current directory when none is known).
    pub fn open_default() -> Result<Self> {
        let root = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pricelens"),
        };
        Self::new(root)
    }

    /// The data directory backing this handle.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Load the tracked item list.
    ///
    /// Missing or corrupt data yields an empty list; corruption is logged
    /// and never surfaced to the user.
    pub fn load_items(&self) -> Vec<TrackedProduct> {
        let path = self.key_path(ITEMS_KEY);
        if !path.exists() {
            return Vec::new();
        }
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(?path, %err, "failed to read item list, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&json) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(?path, %err, "item list is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full item list under its fixed key.
    pub fn save_items(&self, items: &[TrackedProduct]) -> Result<()> {
        let path = self.key_path(ITEMS_KEY);
        let json =
            serde_json::to_string_pretty(items).wrap_err("Failed to serialize item list")?;
        fs::write(&path, json)
            .wrap_err_with(|| format!("Failed to write item list to {:?}", path))?;
        Ok(())
    }

    /// Load the preference record, applying the legacy-symbol migration.
    ///
    /// Missing or corrupt data yields the default (USD).
    pub fn load_preference(&self) -> Preference {
        let path = self.key_path(PREFS_KEY);
        if !path.exists() {
            return Preference::default();
        }
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(?path, %err, "failed to read preference, using default");
                return Preference::default();
            }
        };
        match serde_json::from_str::<Preference>(&json) {
            Ok(pref) => Preference {
                currency: migrate_legacy_currency(&pref.currency),
            },
            Err(err) => {
                tracing::warn!(?path, %err, "preference record is corrupt, using default");
                Preference::default()
            }
        }
    }

    /// Serialize the preference record under its fixed key.
    pub fn save_preference(&self, preference: &Preference) -> Result<()> {
        let path = self.key_path(PREFS_KEY);
        let json =
            serde_json::to_string_pretty(preference).wrap_err("Failed to serialize preference")?;
        fs::write(&path, json)
            .wrap_err_with(|| format!("Failed to write preference to {:?}", path))?;
        Ok(())
    }
}
