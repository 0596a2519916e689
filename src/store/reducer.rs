use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::product::Product;

/// Snapshot state owned by the store. Cloned out to callers; only the
/// reducer produces new versions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// The store's complete mutation vocabulary.
#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetError(String),
    ClearError,
    SetProducts(Vec<Product>),
    AddProduct(Product),
    UpdateProduct(Product),
    DeleteProduct(Uuid),
}

/// Pure transition function. Every mutating action clears any standing
/// error and refreshes `last_updated`; entering the loading state clears
/// the error while leaving it does not.
pub fn reduce(state: &ProductState, action: Action) -> ProductState {
    match action {
        Action::SetLoading(loading) => ProductState {
            loading,
            error: if loading { None } else { state.error.clone() },
            ..state.clone()
        },
        Action::SetError(message) => ProductState {
            loading: false,
            error: Some(message),
            ..state.clone()
        },
        Action::ClearError => ProductState {
            error: None,
            ..state.clone()
        },
        Action::SetProducts(products) => ProductState {
            products,
            loading: false,
            error: None,
            last_updated: Some(Utc::now()),
        },
        Action::AddProduct(product) => {
            let mut products = state.products.clone();
            products.push(product);
            ProductState {
                products,
                loading: state.loading,
                error: None,
                last_updated: Some(Utc::now()),
            }
        }
        Action::UpdateProduct(product) => {
            let products = state
                .products
                .iter()
                .map(|existing| {
                    if existing.id == product.id {
                        product.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            ProductState {
                products,
                loading: state.loading,
                error: None,
                last_updated: Some(Utc::now()),
            }
        }
        Action::DeleteProduct(id) => {
            let products = state
                .products
                .iter()
                .filter(|existing| existing.id != id)
                .cloned()
                .collect();
            ProductState {
                products,
                loading: state.loading,
                error: None,
                last_updated: Some(Utc::now()),
            }
        }
    }
}
