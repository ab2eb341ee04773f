//! Durable local preferences
//!
//! Holds the small amount of state App Toolkit keeps on the device:
//! - Favorited package identifiers
//! - Whether ad placeholders are shown
//! - Theme choice
//! - Onboarding completion
//!
//! The whole document is rewritten on every change. Writes go to a sibling
//! temporary file which is synced and renamed over the original, so a crash
//! leaves either the old or the new document on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use apptoolkit_core::preferences::PreferenceStore;
//!
//! let store = PreferenceStore::open("/tmp/app-toolkit/preferences.json")?;
//! let (added, prefs) = store.update(|p| p.favorites.insert("com.example.app".into()))?;
//! assert!(added && prefs.favorites.contains("com.example.app"));
//! ```

use crate::error::{Error, ErrorCode, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, RwLock};
use tracing::debug;

/// UI theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the system setting
    #[default]
    System,
    /// Always light
    Light,
    /// Always dark
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        };
        f.write_str(name)
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "system" | "auto" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::new(
                ErrorCode::InvalidInput,
                format!("Unknown theme `{other}`"),
            )
            .with_suggestion("Use one of: system, light, dark")),
        }
    }
}

/// Persisted preference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Favorited package identifiers
    pub favorites: BTreeSet<String>,
    /// Show ad placeholders in app lists
    pub ads_enabled: bool,
    /// Theme choice
    pub theme: Theme,
    /// Onboarding has been completed
    pub onboarding_complete: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            favorites: BTreeSet::new(),
            ads_enabled: true,
            theme: Theme::default(),
            onboarding_complete: false,
        }
    }
}

/// File-backed preference store
///
/// Reads are served from memory. Writes are serialized and hit the disk
/// before the in-memory copy changes.
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    state: RwLock<Preferences>,
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    /// Open the store at `path`, using defaults when the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = load_document(&path)?;

        Ok(Self {
            path: Some(path),
            state: RwLock::new(prefs),
            write_lock: Mutex::new(()),
        })
    }

    /// Store that never touches the filesystem
    #[must_use]
    pub fn in_memory() -> Self {
        Self::in_memory_with(Preferences::default())
    }

    /// In-memory store seeded with `prefs`
    #[must_use]
    pub fn in_memory_with(prefs: Preferences) -> Self {
        Self {
            path: None,
            state: RwLock::new(prefs),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current preferences
    #[must_use]
    pub fn snapshot(&self) -> Preferences {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `f` to a copy of the preferences, persist it, then publish it
    ///
    /// Returns the closure's result and the document as written. When
    /// persisting fails the in-memory state is left unchanged.
    pub fn update<R>(&self, f: impl FnOnce(&mut Preferences) -> R) -> Result<(R, Preferences)> {
        let _write = self
            .write_lock
            .lock()
            .map_err(|_| Error::new(ErrorCode::Internal, "Failed to acquire preferences write lock"))?;

        let mut next = self.snapshot();
        let output = f(&mut next);

        if let Some(ref path) = self.path {
            write_document(path, &next)?;
            debug!(path = %path.display(), favorites = next.favorites.len(), "Preferences persisted");
        }

        let mut guard = self
            .state
            .write()
            .map_err(|_| Error::new(ErrorCode::Internal, "Failed to acquire preferences lock"))?;
        *guard = next.clone();

        Ok((output, next))
    }
}

fn load_document(path: &Path) -> Result<Preferences> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No preferences file, using defaults");
            return Ok(Preferences::default());
        }
        Err(e) => return Err(Error::from(e).with_context(format!("Reading {}", path.display()))),
    };

    serde_json::from_str(&content).map_err(|e| Error::storage_corrupted(path).with_source(e))
}

fn write_document(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(Error::from)
            .context(format!("Creating {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(prefs)
        .map_err(|e| Error::storage_write("Failed to encode preferences").with_source(e))?;

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::storage_write(format!("Failed to write {}", path.display())).with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("preferences.json")).unwrap();

        let prefs = store.snapshot();
        assert!(prefs.favorites.is_empty());
        assert!(prefs.ads_enabled);
        assert_eq!(prefs.theme, Theme::System);
        assert!(!prefs.onboarding_complete);
    }

    #[test]
    fn test_update_is_written_before_publish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let store = PreferenceStore::open(&path).unwrap();

        let (inserted, prefs) = store
            .update(|p| p.favorites.insert("com.example.notes".to_string()))
            .unwrap();

        assert!(inserted);
        assert!(prefs.favorites.contains("com.example.notes"));

        let on_disk: Preferences =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, store.snapshot());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("state");
        let store = PreferenceStore::open(parent.join("preferences.json")).unwrap();

        // A plain file where the data directory should be.
        fs::write(&parent, "").unwrap();

        let err = store.update(|p| p.ads_enabled = false).unwrap_err();
        assert!(err.context.is_some());
        assert!(store.snapshot().ads_enabled);
    }

    #[test]
    fn test_reopen_restores_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        {
            let store = PreferenceStore::open(&path).unwrap();
            store
                .update(|p| {
                    p.theme = Theme::Dark;
                    p.ads_enabled = false;
                })
                .unwrap();
        }

        let reopened = PreferenceStore::open(&path).unwrap().snapshot();
        assert_eq!(reopened.theme, Theme::Dark);
        assert!(!reopened.ads_enabled);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"favorites": ["com.example.a"]}"#).unwrap();

        let prefs = PreferenceStore::open(&path).unwrap().snapshot();
        assert!(prefs.favorites.contains("com.example.a"));
        assert!(prefs.ads_enabled);
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let err = PreferenceStore::open(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_in_memory_store_has_no_path() {
        let store = PreferenceStore::in_memory();
        store.update(|p| p.onboarding_complete = true).unwrap();
        assert!(store.path().is_none());
        assert!(store.snapshot().onboarding_complete);
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("auto".parse::<Theme>().unwrap(), Theme::System);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    proptest! {
        #[test]
        fn prop_favorites_survive_reopen(packages in proptest::collection::btree_set("[a-z]{1,8}\\.[a-z]{1,8}", 0..12)) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("preferences.json");
            let store = PreferenceStore::open(&path).unwrap();
            store.update(|p| p.favorites = packages.clone()).unwrap();

            let reopened = PreferenceStore::open(&path).unwrap().snapshot();
            prop_assert_eq!(reopened.favorites, packages);
        }
    }
}
