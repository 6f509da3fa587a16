//! Runtime configuration: where data lives and which language to show.

use std::io;
use std::path::{Path, PathBuf};

use crate::fields::Language;
use crate::kv::{DirStore, KeyValueStore};
use crate::store::saved_language;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TP_DATA_DIR";
/// Directory name used under `$HOME`.
pub const DEFAULT_DIR_NAME: &str = ".transition_planner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub language: Language,
}

/// Pick the data directory: explicit flag, then `$TP_DATA_DIR`, then
/// `$HOME/.transition_planner`, then `./.transition_planner`.
pub fn resolve_data_dir(flag: Option<&Path>, env_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    let home = home.filter(|h| !h.trim().is_empty()).unwrap_or(".");
    PathBuf::from(home).join(DEFAULT_DIR_NAME)
}

/// Pick the language: explicit flag, then whatever was saved, then English.
pub fn resolve_language<S: KeyValueStore>(flag: Option<Language>, kv: &S) -> Language {
    flag.or_else(|| saved_language(kv)).unwrap_or_default()
}

impl Config {
    /// Resolve configuration from flags and the process environment, opening
    /// (and creating) the data directory.
    pub fn from_env(data_dir: Option<&Path>, language: Option<Language>) -> io::Result<(Config, DirStore)> {
        let env_dir = std::env::var(DATA_DIR_ENV).ok();
        let home = std::env::var("HOME").ok();
        let data_dir = resolve_data_dir(data_dir, env_dir.as_deref(), home.as_deref());
        let kv = DirStore::open(&data_dir)?;
        let language = resolve_language(language, &kv);
        Ok((Config { data_dir, language }, kv))
    }
}
