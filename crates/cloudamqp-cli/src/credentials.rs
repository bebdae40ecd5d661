// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! API key lookup and persistence.
//!
//! The key comes from `CLOUDAMQP_APIKEY` when set, otherwise from
//! `~/.cloudamqprc`, which holds nothing but the key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

/// Environment variable that overrides the key file.
pub const API_KEY_ENV: &str = "CLOUDAMQP_APIKEY";

/// Key file name inside the home directory.
pub const KEY_FILE_NAME: &str = ".cloudamqprc";

/// A file holding a single API key.
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    path: PathBuf,
}

impl ApiKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.cloudamqprc`.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(Self::new(home.join(KEY_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key. A missing or blank file yields `None`.
    pub fn load(&self) -> Result<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        let key = contents.trim();
        Ok((!key.is_empty()).then(|| key.to_string()))
    }

    /// Write the key followed by a newline, readable by the owner only.
    pub fn save(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = open_private(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{}", key.trim())
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Saved API key");
        Ok(())
    }
}

/// Pick the API key: a non-blank `env_value` wins over the store.
pub fn resolve_api_key(env_value: Option<String>, store: &ApiKeyStore) -> Result<String> {
    if let Some(key) = env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        debug!("Using API key from {}", API_KEY_ENV);
        return Ok(key);
    }

    match store.load()? {
        Some(key) => {
            debug!(path = %store.path().display(), "Using API key from file");
            Ok(key)
        }
        None => bail!(
            "no API key found: set {} or save a key to {}",
            API_KEY_ENV,
            store.path().display()
        ),
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ApiKeyStore {
        ApiKeyStore::new(dir.path().join(KEY_FILE_NAME))
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("secret-key").unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "secret-key\n");
        assert_eq!(store.load().unwrap().as_deref(), Some("secret-key"));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ApiKeyStore::new(dir.path().join("nested/deeper/key"));

        store.save("first").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "old\n").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.save("new").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_blank_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "  \n").unwrap();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_env_value_wins() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("from-file").unwrap();

        let key = resolve_api_key(Some(" from-env ".to_string()), &store).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("from-file").unwrap();

        let key = resolve_api_key(Some(String::new()), &store).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_no_key_anywhere() {
        let dir = TempDir::new().unwrap();
        let err = resolve_api_key(None, &store_in(&dir)).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }
}
