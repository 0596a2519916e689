//! The product store: canonical in-memory state behind a pure reducer,
//! plus orchestrated async operations that validate, commit, and persist.

pub mod reducer;

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{LOAD_DELAY, MUTATE_DELAY};
use crate::domain::product::{Product, ProductDraft};
use crate::domain::sample_data::sample_products;
use crate::domain::validation::validate_draft;
use crate::repository::Repository;

pub use reducer::{reduce, Action, ProductState};

/// Simulated I/O latency applied to orchestrated operations.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub load: Duration,
    pub mutate: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            load: LOAD_DELAY,
            mutate: MUTATE_DELAY,
        }
    }
}

impl Latency {
    /// Zero delays, for tests.
    pub fn none() -> Self {
        Self {
            load: Duration::ZERO,
            mutate: Duration::ZERO,
        }
    }
}

/// Failures surfaced to the direct caller of a mutating operation. The
/// same failure is also recorded in the store's error state so a global
/// banner and a local form can both react. Persistence and other internal
/// failures never reach callers: reads degrade to the seed dataset and
/// writes are best-effort, logged only.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("Product not found")]
    NotFound { id: Uuid },
}

/// Owns the canonical product collection. Cheap to clone; clones share
/// state. Constructed explicitly by the composition root and passed down,
/// never a module-level singleton.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<ProductState>,
    repository: Repository,
    latency: Latency,
}

impl ProductStore {
    pub fn new(repository: Repository, latency: Latency) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(ProductState::default()),
                repository,
                latency,
            }),
        }
    }

    // -- snapshot accessors -------------------------------------------------

    pub fn snapshot(&self) -> ProductState {
        self.inner.state.read().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner.state.read().products.clone()
    }

    pub fn count(&self) -> usize {
        self.inner.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn get(&self, id: Uuid) -> Option<Product> {
        self.inner
            .state
            .read()
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    pub fn has(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    // -- orchestrated operations --------------------------------------------

    /// Read the persisted collection, falling back to the seed dataset when
    /// nothing usable is stored. Never fails: a hard read error still loads
    /// the seed data and surfaces a store-level message.
    pub async fn load(&self) {
        self.dispatch(Action::SetLoading(true));

        let (products, failure) = match self.inner.repository.products.read().await {
            Ok(Some(products)) => {
                debug!(count = products.len(), "loaded persisted products");
                (products, None)
            }
            Ok(None) => {
                debug!("no persisted products, using sample data");
                (sample_products(), None)
            }
            Err(err) => {
                warn!(error = %err, "failed to read persisted products, using sample data");
                (
                    sample_products(),
                    Some(format!("Failed to load products: {err}")),
                )
            }
        };

        sleep(self.inner.latency.load).await;
        self.dispatch(Action::SetProducts(products));
        if let Some(message) = failure {
            self.dispatch(Action::SetError(message));
        }
        self.dispatch(Action::SetLoading(false));
    }

    /// Re-run `load`, discarding unpersisted in-memory differences.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Validate and commit a new product. On validation failure the
    /// collection is untouched, the first violation becomes the store
    /// error, and the caller gets the failure back.
    pub async fn add(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        self.dispatch(Action::SetLoading(true));

        let report = validate_draft(draft);
        if let Some((field, message)) = report.first_error() {
            return Err(self.fail_mutation("add", field.to_string(), message));
        }

        let product = Product::from_draft(draft);
        sleep(self.inner.latency.mutate).await;
        self.dispatch(Action::AddProduct(product.clone()));
        self.persist().await;
        self.dispatch(Action::SetLoading(false));

        debug!(id = %product.id, name = %product.name, "added product");
        Ok(product)
    }

    /// Merge a partial update into an existing product. Fails without
    /// touching state when the id is unknown or the merged result is
    /// invalid.
    pub async fn update(&self, id: Uuid, updates: &ProductDraft) -> Result<Product, StoreError> {
        self.dispatch(Action::SetLoading(true));

        let Some(existing) = self.get(id) else {
            return Err(self.fail_not_found("update", id));
        };

        let merged = updates.overlaid_on(&existing.as_draft());
        let report = validate_draft(&merged);
        if let Some((field, message)) = report.first_error() {
            return Err(self.fail_mutation("update", field.to_string(), message));
        }

        let updated = existing.apply(updates);
        sleep(self.inner.latency.mutate).await;
        self.dispatch(Action::UpdateProduct(updated.clone()));
        self.persist().await;
        self.dispatch(Action::SetLoading(false));

        debug!(id = %updated.id, "updated product");
        Ok(updated)
    }

    /// Remove a product by id. Fails when the id is unknown.
    pub async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.dispatch(Action::SetLoading(true));

        if !self.has(id) {
            return Err(self.fail_not_found("delete", id));
        }

        sleep(self.inner.latency.mutate).await;
        self.dispatch(Action::DeleteProduct(id));
        self.persist().await;
        self.dispatch(Action::SetLoading(false));

        debug!(%id, "deleted product");
        Ok(())
    }

    /// Remove several products under a single latency window. Unknown ids
    /// are skipped rather than failing the batch.
    pub async fn remove_many(&self, ids: &[Uuid]) {
        self.dispatch(Action::SetLoading(true));
        sleep(self.inner.latency.mutate).await;
        for id in ids {
            self.dispatch(Action::DeleteProduct(*id));
        }
        self.persist().await;
        self.dispatch(Action::SetLoading(false));
    }

    /// Empty the collection and persist the empty state.
    pub async fn clear(&self) {
        self.dispatch(Action::SetLoading(true));
        sleep(self.inner.latency.mutate).await;
        self.dispatch(Action::SetProducts(Vec::new()));
        self.persist().await;
        self.dispatch(Action::SetLoading(false));
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    // -- cross-instance synchronization -------------------------------------

    /// Replace the in-memory collection with one observed from the durable
    /// side-channel (another writer won). Last writer wins; no write-back.
    pub fn absorb_external(&self, products: Vec<Product>) {
        debug!(count = products.len(), "absorbing externally written collection");
        self.dispatch(Action::SetProducts(products));
    }

    /// Notifications of successful writes to the shared side-channel. A
    /// composition root can feed these into [`ProductStore::absorb_external`]
    /// to mirror another instance's changes.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Vec<Product>> {
        self.inner.repository.products.subscribe()
    }

    // -- internals ----------------------------------------------------------

    fn dispatch(&self, action: Action) {
        let mut state = self.inner.state.write();
        *state = reduce(&state, action);
    }

    /// Best-effort write of the current collection. A failed write never
    /// fails the operation that triggered it; the session continues with
    /// in-memory state only.
    async fn persist(&self) {
        let products = self.products();
        if let Err(err) = self.inner.repository.products.write(&products).await {
            warn!(error = %err, "failed to persist products; continuing with in-memory state only");
        }
    }

    fn fail_mutation(&self, operation: &str, field: String, message: &str) -> StoreError {
        self.dispatch(Action::SetError(format!(
            "Failed to {operation} product: {message}"
        )));
        StoreError::Validation {
            field,
            message: message.to_string(),
        }
    }

    fn fail_not_found(&self, operation: &str, id: Uuid) -> StoreError {
        self.dispatch(Action::SetError(format!(
            "Failed to {operation} product: Product not found"
        )));
        StoreError::NotFound { id }
    }
}
