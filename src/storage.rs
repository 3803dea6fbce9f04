use crate::database::Database;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Path value that selects the in-memory engine instead of a file.
pub const MEMORY_PATH: &str = ":memory:";

/// Abstraction over how the `Database` is persisted between sessions.
pub trait StorageEngine: Send + Sync {
    /// Load a database from the underlying storage. Missing storage yields
    /// an empty database.
    fn load(&self) -> Result<Database>;

    /// Persist the given database to the underlying storage.
    fn save(&self, db: &Database) -> Result<()>;
}

/// JSON file based storage engine.
pub struct JsonStorageEngine {
    path: PathBuf,
}

impl JsonStorageEngine {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonStorageEngine { path: path.into() }
    }
}

impl StorageEngine for JsonStorageEngine {
    fn load(&self) -> Result<Database> {
        if !self.path.exists() {
            debug!("no store at {}, starting empty", self.path.display());
            return Ok(Database::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        serde_json::from_str(&data).map_err(|e| {
            Error::Storage(format!(
                "Failed to decode database file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, db: &Database) -> Result<()> {
        let data = serde_json::to_string_pretty(db)?;
        fs::write(&self.path, data).map_err(|e| Error::io(&self.path, e))?;
        debug!("saved store to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory; nothing survives the process.
#[derive(Default)]
pub struct MemoryStorageEngine {
    snapshot: Mutex<Option<String>>,
}

impl MemoryStorageEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageEngine for MemoryStorageEngine {
    fn load(&self) -> Result<Database> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        match guard.as_deref() {
            Some(data) => Ok(serde_json::from_str(data)?),
            None => Ok(Database::new()),
        }
    }

    fn save(&self, db: &Database) -> Result<()> {
        let data = serde_json::to_string(db)?;
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        *guard = Some(data);
        Ok(())
    }
}

/// Picks the engine for a configured database path.
pub fn open(path: &Path) -> Box<dyn StorageEngine> {
    if path.as_os_str() == MEMORY_PATH {
        Box::new(MemoryStorageEngine::new())
    } else {
        Box::new(JsonStorageEngine::new(path))
    }
}
