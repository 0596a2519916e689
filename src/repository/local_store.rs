use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::config::STORAGE_KEY;
use crate::domain::product::Product;

use super::StorageBackend;

/// File-backed durable side-channel: the whole collection lives in one
/// JSON blob under a fixed key, written atomically via a temp-file rename.
pub struct LocalStore {
    path: PathBuf,
    changes: broadcast::Sender<Vec<Product>>,
}

/// Blobs written by older builds are a bare JSON array; a versioned
/// envelope is accepted on read but never written.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Legacy(Vec<Product>),
    Versioned {
        #[allow(dead_code)]
        version: Option<String>,
        products: Vec<Product>,
    },
}

impl LocalStore {
    pub fn new(data_dir: &Path) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            path: data_dir.join(format!("{STORAGE_KEY}.json")),
            changes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(&self, raw: &str) -> Option<Vec<Product>> {
        match serde_json::from_str::<StoredBlob>(raw) {
            Ok(StoredBlob::Legacy(products)) => Some(products),
            Ok(StoredBlob::Versioned { products, .. }) => Some(products),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "stored products are unreadable, treating as no data");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStore {
    async fn read(&self) -> Result<Option<Vec<Product>>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read product blob at {}", self.path.display())
                });
            }
        };
        Ok(self.decode(&raw))
    }

    async fn write(&self, products: &[Product]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let blob = serde_json::to_string(products).context("failed to serialize products")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob).await.with_context(|| {
            format!("failed to write product blob at {}", tmp.display())
        })?;
        fs::rename(&tmp, &self.path).await?;

        debug!(count = products.len(), path = %self.path.display(), "persisted product collection");
        let _ = self.changes.send(products.to_vec());
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Vec<Product>> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductDraft;
    use tempfile::TempDir;

    fn product(name: &str) -> Product {
        Product::from_draft(&ProductDraft {
            name: Some(name.to_string()),
            price: Some("9.99".to_string()),
            category: Some("Books".to_string()),
            stock: Some("4".to_string()),
            ..ProductDraft::default()
        })
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_no_data() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        let products = vec![product("One"), product("Two")];

        store.write(&products).await.unwrap();
        let loaded = store.read().await.unwrap().unwrap();
        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_no_data() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        fs::write(store.path(), "{not json at all").await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_versioned_envelope_is_accepted() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        let products = vec![product("Enveloped")];
        let envelope = serde_json::json!({
            "version": "1.0",
            "products": products,
        });
        fs::write(store.path(), envelope.to_string()).await.unwrap();

        let loaded = store.read().await.unwrap().unwrap();
        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn test_writes_are_published_to_subscribers() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        let mut changes = store.subscribe();

        let products = vec![product("Broadcast")];
        store.write(&products).await.unwrap();

        let observed = changes.recv().await.unwrap();
        assert_eq!(observed, products);
    }
}
