use anyhow::Result;
use std::path::Path;
use tracing::info;

use shopkeep::query::product_stats;
use shopkeep::repository::Repository;
use shopkeep::store::{Latency, ProductStore};

/// Demo composition root: open the file-backed store, load the catalog,
/// and log a stats summary. The store is constructed here and passed
/// down; nothing holds it as module-level state.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let repository = Repository::local(Path::new("data"));
    let store = ProductStore::new(repository, Latency::default());

    store.load().await;
    if let Some(error) = store.error() {
        info!(%error, "catalog loaded with a degraded read");
    }

    let products = store.products();
    let stats = product_stats(&products);
    info!(
        total = stats.total,
        in_stock = stats.in_stock,
        low_stock = stats.low_stock,
        out_of_stock = stats.out_of_stock,
        total_value = stats.total_value,
        "catalog loaded"
    );
    for (category, count) in &stats.categories {
        info!(category = %category, count, "category");
    }

    Ok(())
}
