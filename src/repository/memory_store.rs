use anyhow::Result;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::domain::product::Product;

use super::StorageBackend;

/// In-memory stand-in for the durable side-channel. Used by tests and by
/// compositions that opt out of persistence; honors the same
/// change-notification contract as the file-backed store.
pub struct MemoryStore {
    data: RwLock<Option<Vec<Product>>>,
    changes: broadcast::Sender<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            data: RwLock::new(None),
            changes,
        }
    }

    /// Pre-populate the store, as if a previous session had persisted data.
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        *store.data.write() = Some(products);
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryStore {
    async fn read(&self) -> Result<Option<Vec<Product>>> {
        Ok(self.data.read().clone())
    }

    async fn write(&self, products: &[Product]) -> Result<()> {
        *self.data.write() = Some(products.to_vec());
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

    #[tokio::test]
    async fn test_starts_empty_and_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.read().await.unwrap(), None);

        let products = vec![Product::from_draft(&ProductDraft {
            name: Some("Widget".to_string()),
            price: Some("1.50".to_string()),
            category: Some("Other".to_string()),
            stock: Some("2".to_string()),
            ..ProductDraft::default()
        })];
        store.write(&products).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(products));
    }

    #[tokio::test]
    async fn test_empty_write_is_data_not_absence() {
        let store = MemoryStore::new();
        store.write(&[]).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(Vec::new()));
    }
}
