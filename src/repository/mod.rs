pub mod local_store;
pub mod memory_store;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::product::Product;

pub use local_store::LocalStore;
pub use memory_store::MemoryStore;

/// The durable side-channel contract: the entire collection is read and
/// written as one unit. `read` distinguishes "no data yet" (`Ok(None)`,
/// including corrupt blobs) from hard I/O failures; `subscribe` delivers
/// best-effort notifications of successful writes, the analogue of a
/// cross-tab storage event.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    async fn read(&self) -> Result<Option<Vec<Product>>>;
    async fn write(&self, products: &[Product]) -> Result<()>;
    fn subscribe(&self) -> broadcast::Receiver<Vec<Product>>;
}

#[derive(Clone)]
pub struct Repository {
    pub products: Arc<dyn StorageBackend>,
}

impl Repository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { products: backend }
    }

    /// File-backed repository rooted at `data_dir`.
    pub fn local(data_dir: &Path) -> Self {
        Self::new(Arc::new(LocalStore::new(data_dir)))
    }

    /// In-memory repository for tests and persistence-free compositions.
    pub fn new_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
