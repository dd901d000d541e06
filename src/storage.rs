//! Key-value storage the game persists into.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// A synchronous string key-value store which may fail on any operation.
pub trait Storage {
    /// Read the value under `key`, `Ok(None)` when it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        (**self).remove(key)
    }
}

/// In-process storage, optionally limited to a total number of bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes which would take it past `quota` bytes of values.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + value.len();
            if needed > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage that fails every operation, as when the host has storage turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl Storage for DisabledStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Err(Error::Disabled)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::Disabled)
    }

    fn remove(&mut self, _key: &str) -> Result<(), Error> {
        Err(Error::Disabled)
    }
}

/// Storage keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| Error::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, Error> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(Error::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        fs::write(self.path(key)?, value).map_err(|source| Error::Io {
            key: key.to_owned(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storing `{key}` needs {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("storage is disabled")]
    Disabled,
    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
    #[error("i/o failure on `{key}`")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}
