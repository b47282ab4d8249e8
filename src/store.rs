// src/store.rs
//
// Durable console state: a JSON file under the platform data directory with
// plain get/set/remove semantics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{ConsoleError, ConsoleResult};

/// Key holding the serialized hangman game while one is in progress.
pub const KEY_HANGMAN_STATE: &str = "hangman_state";
/// Boolean flag requesting the console to open immediately on next launch.
pub const KEY_CONSOLE_REOPEN: &str = "console_reopen";

const STORE_FILE: &str = "console-store.json";

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl JsonStore {
    /// Open (or create) the store file under `dir`.
    pub async fn open(dir: &Path) -> ConsoleResult<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(STORE_FILE);

        let values = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&content)
                .map_err(|e| ConsoleError::Store(format!("corrupt store file {}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };

        Ok(JsonStore {
            path,
            values: Mutex::new(values),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let values = self.values.lock().await;
        values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> ConsoleResult<()> {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), serde_json::to_value(value)?);
        self.flush(&values).await
    }

    pub async fn remove(&self, key: &str) -> ConsoleResult<()> {
        let mut values = self.values.lock().await;
        if values.remove(key).is_some() {
            self.flush(&values).await?;
        }
        Ok(())
    }

    async fn flush(&self, values: &BTreeMap<String, Value>) -> ConsoleResult<()> {
        let content = serde_json::to_string_pretty(values)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// Default store location: `<platform data dir>/konami-console`.
pub fn default_data_dir() -> ConsoleResult<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join("konami-console"))
        .ok_or_else(|| ConsoleError::Store("no platform data directory available".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::open(dir.path()).await.expect("open store");

        store.set(KEY_CONSOLE_REOPEN, &true).await.expect("set");
        assert_eq!(store.get::<bool>(KEY_CONSOLE_REOPEN).await, Some(true));

        store.remove(KEY_CONSOLE_REOPEN).await.expect("remove");
        assert_eq!(store.get::<bool>(KEY_CONSOLE_REOPEN).await, None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = JsonStore::open(dir.path()).await.expect("open store");
            store.set("answer", &42u32).await.expect("set");
        }
        let store = JsonStore::open(dir.path()).await.expect("reopen store");
        assert_eq!(store.get::<u32>("answer").await, Some(42));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::open(dir.path()).await.expect("open store");
        assert_eq!(store.get::<String>("nope").await, None);
    }
}
