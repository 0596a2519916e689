pub mod product;
pub mod sample_data;
pub mod validation;

pub use product::{Category, Product, ProductDraft, StockStatus};
pub use validation::{validate_draft, Field, ValidationReport};
