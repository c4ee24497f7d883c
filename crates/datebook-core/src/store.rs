use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::event::Event;

/// Abstract key-value transport behind the event store. Which medium backs
/// it (a file, a browser store bridge, a database row) is the host's concern.
pub trait StorageBackend {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One `<key>.json` file per key under a data directory.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        Ok(Some(raw))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.key_path(key);
        debug!(file = %path.display(), bytes = value.len(), "writing key atomically");

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;
        Ok(())
    }
}

/// In-process backend for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let map = self.map.lock().map_err(|_| anyhow!("memory backend poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut map = self.map.lock().map_err(|_| anyhow!("memory backend poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persists the whole event collection as one JSON array blob under a fixed
/// key. Every save is a full overwrite; concurrent writers are not
/// coordinated, last write wins.
pub struct EventStore {
    backend: Option<Box<dyn StorageBackend + Send>>,
    key: String,
}

impl EventStore {
    /// File-backed store rooted at `data_dir`.
    #[tracing::instrument(skip(data_dir, cfg))]
    pub fn open(data_dir: &Path, cfg: &Config) -> anyhow::Result<Self> {
        let backend = FileBackend::new(data_dir)
            .with_context(|| format!("failed to open event store at {}", data_dir.display()))?;
        info!(data_dir = %data_dir.display(), key = %cfg.storage_key, "opened event store");
        Ok(Self {
            backend: Some(Box::new(backend)),
            key: cfg.storage_key.clone(),
        })
    }

    pub fn in_memory(cfg: &Config) -> Self {
        Self {
            backend: Some(Box::new(MemoryBackend::default())),
            key: cfg.storage_key.clone(),
        }
    }

    /// Store with no backing medium: `load` yields an empty collection and
    /// `save` is a no-op. Models headless execution contexts.
    pub fn detached() -> Self {
        Self {
            backend: None,
            key: String::new(),
        }
    }

    /// Loads the event collection. A missing key or malformed blob is logged
    /// and treated as "no data"; this never fails.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Vec<Event> {
        let Some(backend) = &self.backend else {
            return vec![];
        };

        let raw = match backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored events");
                return vec![];
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed reading events; treating as empty");
                return vec![];
            }
        };

        match serde_json::from_str::<Vec<Event>>(&raw) {
            Ok(events) => {
                debug!(count = events.len(), "loaded events");
                events
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "malformed event blob; treating as empty");
                vec![]
            }
        }
    }

    /// Serializes and writes the whole collection, overwriting prior content.
    #[tracing::instrument(skip(self, events))]
    pub fn save(&self, events: &[Event]) -> anyhow::Result<()> {
        let Some(backend) = &self.backend else {
            debug!("detached store; dropping save");
            return Ok(());
        };

        let blob = serde_json::to_string(events).context("failed to serialize events")?;
        backend
            .set(&self.key, &blob)
            .with_context(|| format!("failed to save events under {}", self.key))?;
        debug!(count = events.len(), "saved events");
        Ok(())
    }

    /// Replaces the event with a matching id, or appends when none matches,
    /// then persists. Returns the updated collection.
    #[tracing::instrument(skip(self, events, event), fields(id = %event.id))]
    pub fn upsert(&self, mut events: Vec<Event>, event: Event) -> anyhow::Result<Vec<Event>> {
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
        self.save(&events)?;
        Ok(events)
    }

    /// Removes the event with the given id (if present) and persists.
    #[tracing::instrument(skip(self, events))]
    pub fn remove(&self, mut events: Vec<Event>, id: &str) -> anyhow::Result<Vec<Event>> {
        events.retain(|e| e.id != id);
        self.save(&events)?;
        Ok(events)
    }
}
