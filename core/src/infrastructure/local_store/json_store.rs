use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};
use tracing::{error, warn};

use crate::domain::common::entities::app_errors::CoreError;

/// Key-value state persisted as one JSON object on disk.
///
/// Writes go through a temp file and a rename so a crash never leaves a
/// half-written state file behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory so the first write cannot fail on it.
    pub async fn prepare(&self) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!(path = %parent.display(), "failed to create state directory: {}", e);
                CoreError::StorageError(e.to_string())
            })?;
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Map<String, Value>, CoreError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                error!(path = %self.path.display(), "failed to read state file: {}", e);
                return Err(CoreError::StorageError(e.to_string()));
            }
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        serde_json::from_slice(&raw).map_err(|e| {
            error!(path = %self.path.display(), "state file is not a JSON object: {}", e);
            CoreError::StorageError(e.to_string())
        })
    }

    async fn write_all(&self, state: &Map<String, Value>) -> Result<(), CoreError> {
        let body = serde_json::to_vec_pretty(state).map_err(|e| {
            error!("failed to serialize state: {}", e);
            CoreError::StorageError(e.to_string())
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, body).await.map_err(|e| {
            error!(path = %tmp_path.display(), "failed to write state file: {}", e);
            CoreError::StorageError(e.to_string())
        })?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            error!(path = %self.path.display(), "failed to replace state file: {}", e);
            CoreError::StorageError(e.to_string())
        })
    }

    /// Reads one key. A value that no longer matches `T` reads as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        let mut state = self.read_all().await?;

        match state.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match serde_json::from_value(value) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(key, "ignoring malformed state value: {}", e);
                    Ok(None)
                }
            },
        }
    }

    /// Writes several keys in one read-modify-write cycle. `None` removes the key.
    pub async fn set_many<T: Serialize>(
        &self,
        entries: Vec<(&str, Option<T>)>,
    ) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.read_all().await?;

        for (key, value) in entries {
            match value {
                Some(value) => {
                    let value = serde_json::to_value(value)
                        .map_err(|e| CoreError::StorageError(e.to_string()))?;
                    state.insert(key.to_string(), value);
                }
                None => {
                    state.remove(key);
                }
            }
        }

        self.write_all(&state).await
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), CoreError> {
        self.set_many(vec![(key, Some(value))]).await
    }
}

#[cfg(test)]
pub(crate) fn temp_state_path() -> PathBuf {
    std::env::temp_dir().join(format!("foodguard-{}.json", uuid::Uuid::new_v4()))
}
