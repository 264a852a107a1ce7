//! Key-value persistence backends for the question store.
//!
//! The store only needs two operations: read the value under a key and replace
//! it wholesale. `FileStore` keeps one JSON document per key on disk and
//! replaces it atomically, `MemoryStore` keeps everything in a map.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::{RecallError, Result};

#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
  /// Value stored under `key`, or `None` if nothing was ever written
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Replace the value under `key`. Must be durable when this returns.
  fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
  fn get(&self, key: &str) -> Result<Option<String>> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    (**self).set(key, value)
  }
}

fn validate_key(key: &str) -> Result<()> {
  let valid =
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

  if valid {
    Ok(())
  } else {
    Err(RecallError::invalid_key(key))
  }
}

/// One `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn path_for(&self, key: &str) -> Result<PathBuf> {
    validate_key(key)?;
    Ok(self.root.join(format!("{key}.json")))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let path = self.path_for(key)?;

    match fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let path = self.path_for(key)?;
    fs::create_dir_all(&self.root)?;

    // Write beside the target so the rename stays on one filesystem
    let mut tmp = NamedTempFile::new_in(&self.root)?;
    tmp.write_all(value.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| RecallError::Io(e.error))?;

    // The rename is only durable once the directory entry is flushed
    #[cfg(unix)]
    fs::File::open(&self.root)?.sync_all()?;

    tracing::debug!("wrote {} bytes to {}", value.len(), path.display());
    Ok(())
  }
}

/// In-process map, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    validate_key(key)?;
    let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
    Ok(entries.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    validate_key(key)?;
    let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}
