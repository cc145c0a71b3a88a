//! Browser LocalStorage backend

use anyhow::{Result, anyhow};

use super::Storage;

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// The window's LocalStorage, if the browser allows it
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| anyhow!("LocalStorage get '{key}' failed: {e:?}"))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| anyhow!("LocalStorage set '{key}' failed: {e:?}"))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| anyhow!("LocalStorage remove '{key}' failed: {e:?}"))
    }
}
