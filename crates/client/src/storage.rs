//! Durable key/value storage for the cart and session.
//!
//! One JSON file per key under the configured directory. Each key is written
//! independently and synchronously, immediately after the in-memory mutation
//! it mirrors, so a failed write of one key never corrupts another. Writes go
//! through a temporary file and a rename so a crash mid-write leaves the
//! previous value intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys, mirroring the durable slices of the data layer.
pub mod keys {
    /// Key for the cart's line items.
    pub const CART_ITEMS: &str = "cartItems";

    /// Key for the cart's shipping address.
    pub const SHIPPING_ADDRESS: &str = "shippingAddress";

    /// Key for the cart's selected payment method.
    pub const PAYMENT_METHOD: &str = "paymentMethod";

    /// Key for the authenticated session snapshot.
    pub const USER_INFO: &str = "userInfo";
}

/// Errors that can occur reading or writing durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed key/value store of JSON-serialized values.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if necessary) the store at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails; the
    /// previously stored value survives a failed write.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        let tmp = self.path_for(&format!("{key}.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed. A
    /// corrupt file is surfaced, not silently treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
