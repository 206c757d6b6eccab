use std::path::PathBuf;

use crate::model::JsonFileStore;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ADMIN_SECRET: &str = "12345";

/// Runtime settings for a catalogue session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `items.json` and `users.json`.
    pub data_dir: PathBuf,
    /// Shared secret for the admin menu, compared in plaintext.
    pub admin_secret: String,
    /// Create missing collection files before loading.
    pub init: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            init: false,
        }
    }
}

impl Config {
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_dir)
    }
}
