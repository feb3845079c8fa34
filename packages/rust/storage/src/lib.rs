//! JSON file store for scraped records.
//!
//! One JSON file per entity, rooted at the configured data directory:
//!
//! ```text
//! <root>/
//! ├── pokemon_list.json
//! ├── pokemon/{index}-{name}.json
//! ├── ability_list.json
//! ├── ability/{index}-{name}.json
//! ├── move_list.json
//! ├── move/{index}-{name}.json
//! └── images/
//!     ├── official/{index}-{name}.png
//!     └── home/…
//! ```
//!
//! Writes are durable and idempotent: re-running a scrape produces
//! byte-identical files for identical input documents.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use wikidex_shared::{Result, WikidexError};

/// File store rooted at the output data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `root`. Directories are created lazily on write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path for one species record.
    pub fn species_path(index: &str, name: &str) -> PathBuf {
        PathBuf::from("pokemon").join(format!("{index}-{name}.json"))
    }

    /// Relative path for one ability record.
    pub fn ability_path(index: &str, name: &str) -> PathBuf {
        PathBuf::from("ability").join(format!("{index}-{name}.json"))
    }

    /// Relative path for the species list.
    pub fn species_list_path() -> PathBuf {
        PathBuf::from("pokemon_list.json")
    }

    /// Relative path for the ability list.
    pub fn ability_list_path() -> PathBuf {
        PathBuf::from("ability_list.json")
    }

    /// Relative path for the move list.
    pub fn move_list_path() -> PathBuf {
        PathBuf::from("move_list.json")
    }

    /// Relative path for one move record.
    pub fn move_path(index: &str, name: &str) -> PathBuf {
        PathBuf::from("move").join(format!("{index}-{name}.json"))
    }

    /// Relative path for an official-artwork image file.
    pub fn official_image_path(file_name: &str) -> PathBuf {
        PathBuf::from("images").join("official").join(file_name)
    }

    /// Relative path for a Pokémon HOME image file.
    pub fn home_image_path(file_name: &str) -> PathBuf {
        PathBuf::from("images").join("home").join(file_name)
    }

    /// Whether a file already exists (batch runs skip present entities).
    pub fn exists(&self, rel: &Path) -> bool {
        self.root.join(rel).exists()
    }

    /// Serialize `value` as pretty-printed JSON to `rel`, creating parent
    /// directories as needed. Returns the absolute path written.
    pub fn write_json<T: Serialize>(&self, rel: &Path, value: &T) -> Result<PathBuf> {
        let path = self.root.join(rel);
        ensure_parent(&path)?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| WikidexError::Storage(format!("serializing {}: {e}", path.display())))?;

        std::fs::write(&path, json).map_err(|e| WikidexError::io(&path, e))?;
        debug!(path = %path.display(), "wrote JSON file");
        Ok(path)
    }

    /// Write raw bytes (image assets) to `rel`, creating parent directories.
    pub fn write_bytes(&self, rel: &Path, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(rel);
        ensure_parent(&path)?;

        std::fs::write(&path, bytes).map_err(|e| WikidexError::io(&path, e))?;
        debug!(path = %path.display(), len = bytes.len(), "wrote binary file");
        Ok(path)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WikidexError::io(parent, e))?;
    }
    Ok(())
}
