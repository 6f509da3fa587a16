//! Local key-value persistence.
//!
//! The store only ever needs `get`, `set` and `remove` on a handful of named
//! entries. `DirStore` keeps one JSON file per key; `MemoryStore` backs tests
//! and throwaway sessions.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

/// Serialized task list.
pub const SAVED_TASKS: &str = "SavedTasks";
/// Serialized child birthdate.
pub const SAVED_BIRTHDAY: &str = "SavedBirthday";
/// Last selected display language.
pub const SAVED_LANGUAGE: &str = "SavedLanguage";

/// Minimal byte-oriented key-value store.
///
/// `get` never fails: an unreadable entry is reported as absent.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Directory-backed store, one `<key>.json` file per entry.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(DirStore { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        let mut buf = Vec::new();
        match File::open(&path).and_then(|mut f| f.read_to_end(&mut buf)) {
            Ok(_) => Some(buf),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read saved entry, treating as absent");
                None
            }
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        // Atomic-ish write via temp + rename.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(bytes)?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).set(key, bytes)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}
