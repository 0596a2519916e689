use std::time::Duration;

// Validation limits
pub const PRODUCT_NAME_MIN_LEN: usize = 3;
pub const PRODUCT_NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 200;
pub const PRICE_MAX: f64 = 999_999.99;
pub const PRICE_DECIMAL_PLACES: usize = 2;
pub const STOCK_MAX: u32 = 999_999;

/// Stock levels at or below this (but above zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// How long a search input must stay idle before the query re-runs.
pub const SEARCH_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

// Durable storage layout: one key holding the whole collection as a JSON blob.
pub const STORAGE_KEY: &str = "ecommerce_products";
/// Declared but not written into the blob; readers must tolerate version-less data.
pub const STORAGE_VERSION: &str = "1.0";

pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/300x200/e9ecef/6c757d?text=Product+Image";

// Simulated I/O latency for orchestrated store operations
pub const LOAD_DELAY: Duration = Duration::from_millis(800);
pub const MUTATE_DELAY: Duration = Duration::from_millis(500);
