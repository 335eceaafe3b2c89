use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// A small string key-value store for visitor preferences.
pub trait PreferenceStore {
    type Error: std::error::Error;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn store(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    type Error = S::Error;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).store(key, value)
    }
}

#[derive(Error, Debug)]
pub enum DiskStorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preferences kept as a flat JSON object in a single file.
pub struct DiskStorage {
    path: PathBuf,
}

impl DiskStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> Result<BTreeMap<String, String>, DiskStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for DiskStorage {
    type Error = DiskStorageError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.read()?.remove(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut preferences = self.read()?;
        preferences.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(&preferences)?)?;

        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new(storage: Arc<RwLock<HashMap<String, String>>>) -> Self {
        Self { storage }
    }
}

#[derive(Error, Debug)]
pub enum InMemoryStorageError {
    #[error("poisoned")]
    Poisoned,
}

impl PreferenceStore for InMemoryStorage {
    type Error = InMemoryStorageError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self
            .storage
            .read()
            .map_err(|_| InMemoryStorageError::Poisoned)?
            .get(key)
            .cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage
            .write()
            .map_err(|_| InMemoryStorageError::Poisoned)?
            .insert(key.to_string(), value.to_string());

        Ok(())
    }
}
