//! Translation cache: id derivation and storage backends.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::TranslateError;
use crate::translate_config::{TranslateConfig, CUSTOM_MODULE_MARKER};

/// Cache type prefix shared by every translation entry
pub const TYPE_IDENTIFIER: &str = "translate";

/// Derive the cache id for a configuration.
///
/// Format: `translate_{locale}_{area}_{scope}_{theme}_{module}_wwdt`, unset
/// slots rendering as empty strings.
pub fn cache_id(config: &TranslateConfig) -> String {
    [
        TYPE_IDENTIFIER,
        config.locale_str(),
        config.area_str(),
        config.scope_str(),
        config.theme_str(),
        config.module_str(),
        CUSTOM_MODULE_MARKER,
    ]
    .join("_")
}

/// Opaque byte storage keyed by cache id
pub trait CacheFrontend: Send + Sync {
    /// Stored payload, or None when the id is unknown
    fn load(&self, id: &str) -> Result<Option<Vec<u8>>, TranslateError>;

    fn save(
        &self,
        data: &[u8],
        id: &str,
        tags: &[&str],
        lifetime: Option<Duration>,
    ) -> Result<(), TranslateError>;

    /// Returns whether an entry existed
    fn remove(&self, id: &str) -> Result<bool, TranslateError>;

    /// Drop every entry
    fn clean(&self) -> Result<(), TranslateError>;
}

/// A stored cache record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub data: Vec<u8>,
    pub tags: Vec<String>,
    pub lifetime: Option<Duration>,
}

/// Process-local cache backend
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Full record for an id, including tags and lifetime
    pub fn entry(&self, id: &str) -> Option<CacheEntry> {
        self.entries().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of `load` calls served so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of `save` calls served so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl CacheFrontend for MemoryCache {
    fn load(&self, id: &str) -> Result<Option<Vec<u8>>, TranslateError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries().get(id).map(|e| e.data.clone()))
    }

    fn save(
        &self,
        data: &[u8],
        id: &str,
        tags: &[&str],
        lifetime: Option<Duration>,
    ) -> Result<(), TranslateError> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.entries().insert(
            id.to_string(),
            CacheEntry {
                data: data.to_vec(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                lifetime,
            },
        );
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool, TranslateError> {
        Ok(self.entries().remove(id).is_some())
    }

    fn clean(&self) -> Result<(), TranslateError> {
        self.entries().clear();
        Ok(())
    }
}

/// One file per entry in a cache directory.
///
/// Tags and lifetimes are not persisted; entries live until removed or
/// cleaned.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a cache id
    pub fn entry_path(&self, id: &str) -> PathBuf {
        self.dir.join(escape_id(id))
    }

    fn cache_error(id: &str, source: std::io::Error) -> TranslateError {
        TranslateError::Cache {
            key: id.to_string(),
            source,
        }
    }
}

impl CacheFrontend for FileCache {
    fn load(&self, id: &str) -> Result<Option<Vec<u8>>, TranslateError> {
        match fs::read(self.entry_path(id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::cache_error(id, e)),
        }
    }

    fn save(
        &self,
        data: &[u8],
        id: &str,
        _tags: &[&str],
        _lifetime: Option<Duration>,
    ) -> Result<(), TranslateError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::cache_error(id, e))?;

        // Uniquely named temp file in the cache dir, renamed over the entry
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| Self::cache_error(id, e))?;
        tmp.write_all(data).map_err(|e| Self::cache_error(id, e))?;
        tmp.persist(self.entry_path(id))
            .map(|_| ())
            .map_err(|e| Self::cache_error(id, e.error))
    }

    fn remove(&self, id: &str) -> Result<bool, TranslateError> {
        match fs::remove_file(self.entry_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::cache_error(id, e)),
        }
    }

    fn clean(&self) -> Result<(), TranslateError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Self::cache_error(TYPE_IDENTIFIER, e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| Self::cache_error(TYPE_IDENTIFIER, e))?;
            if entry.path().is_file() {
                fs::remove_file(entry.path()).map_err(|e| Self::cache_error(TYPE_IDENTIFIER, e))?;
            }
        }

        Ok(())
    }
}

/// Percent-escape everything outside `[A-Za-z0-9_-]` so ids map to distinct file names
fn escape_id(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}
