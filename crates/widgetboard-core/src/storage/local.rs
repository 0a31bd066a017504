//! Browser `localStorage` backend for WebAssembly.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::codec::Document;

/// Key prefix separating documents from other `localStorage` entries.
const KEY_PREFIX: &str = "widgetboard:";

/// Stores documents as JSON strings in the browser's `localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }

    fn key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }
}

impl Storage for LocalStorage {
    fn save(&self, id: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>> {
        let key = Self::key(id);
        let json = document.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            Self::backend()?
                .set_item(&key, &json)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Document>> {
        let key = Self::key(id);
        let id = id.to_string();
        Box::pin(async move {
            let json = Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?
                .ok_or(StorageError::NotFound(id))?;
            Document::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = Self::key(id);
        Box::pin(async move {
            Self::backend()?
                .remove_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let backend = Self::backend()?;
            let len = backend
                .length()
                .map_err(|e| StorageError::Io(format!("{:?}", e)))?;
            let mut ids = Vec::new();
            for i in 0..len {
                if let Ok(Some(key)) = backend.key(i) {
                    if let Some(id) = key.strip_prefix(KEY_PREFIX) {
                        ids.push(id.to_string());
                    }
                }
            }
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = Self::key(id);
        Box::pin(async move {
            let item = Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("{:?}", e)))?;
            Ok(item.is_some())
        })
    }
}
