use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::{LOW_STOCK_THRESHOLD, PLACEHOLDER_IMAGE};

/// A catalog entry. Field names in the serialized form match the legacy
/// storage blob (`imageUrl`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub stock: u32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The closed set of category labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Home,
        Category::Sports,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Derived classification of a stock level. Not stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(stock: u32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Raw form input, before the parse-and-validate boundary. Every field is
/// an optional untyped string exactly as a form widget would hand it over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
    pub image_url: Option<String>,
}

impl Product {
    /// Build a fully-populated product from raw form input. Never fails:
    /// unparseable numbers become zero and an unknown category falls back
    /// to `Other`. Strict rejection is the validator's job, run beforehand.
    pub fn from_draft(draft: &ProductDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: trimmed(draft.name.as_deref()),
            description: trimmed(draft.description.as_deref()),
            price: parse_price(draft.price.as_deref()).unwrap_or(0.0),
            category: parse_category(draft.category.as_deref()).unwrap_or(Category::Other),
            stock: parse_stock(draft.stock.as_deref()).unwrap_or(0),
            image_url: match non_blank(draft.image_url.as_deref()) {
                Some(url) => url,
                None => PLACEHOLDER_IMAGE.to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this product. Fields the draft leaves
    /// blank or unparseable keep their current value; `id` and `created_at`
    /// never change; `updated_at` is always refreshed.
    pub fn apply(&self, updates: &ProductDraft) -> Self {
        let mut next = self.clone();
        if let Some(name) = non_blank(updates.name.as_deref()) {
            next.name = name;
        }
        if let Some(description) = non_blank(updates.description.as_deref()) {
            next.description = description;
        }
        if let Some(price) = parse_price(updates.price.as_deref()) {
            next.price = price;
        }
        if let Some(category) = parse_category(updates.category.as_deref()) {
            next.category = category;
        }
        if let Some(stock) = parse_stock(updates.stock.as_deref()) {
            next.stock = stock;
        }
        if let Some(image_url) = non_blank(updates.image_url.as_deref()) {
            next.image_url = image_url;
        }
        next.updated_at = Utc::now();
        next
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.stock)
    }

    /// The draft a form would show when editing this product. Used to
    /// validate the merged view of an update before committing it.
    pub fn as_draft(&self) -> ProductDraft {
        ProductDraft {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            price: Some(self.price.to_string()),
            category: Some(self.category.to_string()),
            stock: Some(self.stock.to_string()),
            image_url: Some(self.image_url.clone()),
        }
    }
}

impl ProductDraft {
    /// Overlay the fields this draft provides onto `base`, yielding the
    /// merged view an update would produce.
    pub fn overlaid_on(&self, base: &ProductDraft) -> ProductDraft {
        ProductDraft {
            name: self.name.clone().or_else(|| base.name.clone()),
            description: self.description.clone().or_else(|| base.description.clone()),
            price: self.price.clone().or_else(|| base.price.clone()),
            category: self.category.clone().or_else(|| base.category.clone()),
            stock: self.stock.clone().or_else(|| base.stock.clone()),
            image_url: self.image_url.clone().or_else(|| base.image_url.clone()),
        }
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_price(value: Option<&str>) -> Option<f64> {
    let parsed: f64 = value?.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

pub(crate) fn parse_stock(value: Option<&str>) -> Option<u32> {
    let trimmed = value?.trim();
    if let Ok(stock) = trimmed.parse::<u32>() {
        return Some(stock);
    }
    // Fractional input truncates toward zero, negative input clamps to zero.
    let parsed: f64 = trimmed.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(parsed.max(0.0).trunc() as u32)
}

fn parse_category(value: Option<&str>) -> Option<Category> {
    value?.trim().parse().ok()
}
