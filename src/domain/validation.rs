use std::collections::BTreeMap;
use std::fmt;

use crate::config::{
    DESCRIPTION_MAX_LEN, PRICE_DECIMAL_PLACES, PRICE_MAX, PRODUCT_NAME_MAX_LEN,
    PRODUCT_NAME_MIN_LEN, STOCK_MAX,
};
use crate::domain::product::{Category, ProductDraft};

/// Fields a draft can fail validation on, in the order violations are
/// reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Price,
    Category,
    Stock,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::Description => "description",
        };
        f.write_str(name)
    }
}

/// Outcome of validating a draft: one message per violated field. All
/// fields are checked independently; nothing short-circuits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The violation surfaced as the store-level error message.
    pub fn first_error(&self) -> Option<(Field, &str)> {
        self.errors
            .iter()
            .next()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Check a raw draft against every field constraint. Pure; callable both
/// for pre-submit form feedback and as the store's guard before a commit.
pub fn validate_draft(draft: &ProductDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(message) = validate_name(draft.name.as_deref()) {
        report.errors.insert(Field::Name, message);
    }
    if let Some(message) = validate_price(draft.price.as_deref()) {
        report.errors.insert(Field::Price, message);
    }
    if let Some(message) = validate_category(draft.category.as_deref()) {
        report.errors.insert(Field::Category, message);
    }
    if let Some(message) = validate_stock(draft.stock.as_deref()) {
        report.errors.insert(Field::Stock, message);
    }
    if let Some(message) = validate_description(draft.description.as_deref()) {
        report.errors.insert(Field::Description, message);
    }

    report
}

pub fn validate_name(name: Option<&str>) -> Option<String> {
    let trimmed = name.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Some("Product name is required".to_string());
    }
    let length = trimmed.chars().count();
    if length < PRODUCT_NAME_MIN_LEN {
        return Some(format!(
            "Product name must be at least {PRODUCT_NAME_MIN_LEN} characters"
        ));
    }
    if length > PRODUCT_NAME_MAX_LEN {
        return Some(format!(
            "Product name must not exceed {PRODUCT_NAME_MAX_LEN} characters"
        ));
    }
    None
}

pub fn validate_price(price: Option<&str>) -> Option<String> {
    let raw = price.unwrap_or_default().trim();
    let parsed: f64 = match raw.parse() {
        Ok(value) => value,
        Err(_) => return Some("Price must be a positive number".to_string()),
    };
    if !parsed.is_finite() || parsed <= 0.0 {
        return Some("Price must be a positive number".to_string());
    }
    if parsed > PRICE_MAX {
        return Some("Price cannot exceed $999,999.99".to_string());
    }
    let decimal_places = raw.split('.').nth(1).map_or(0, str::len);
    if decimal_places > PRICE_DECIMAL_PLACES {
        return Some(format!(
            "Price can have maximum {PRICE_DECIMAL_PLACES} decimal places"
        ));
    }
    None
}

pub fn validate_category(category: Option<&str>) -> Option<String> {
    let trimmed = category.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Some("Category is required".to_string());
    }
    if trimmed.parse::<Category>().is_err() {
        return Some(format!("Unknown category: {trimmed}"));
    }
    None
}

pub fn validate_stock(stock: Option<&str>) -> Option<String> {
    let raw = stock.unwrap_or_default().trim();
    let parsed = raw
        .parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|v| v.trunc() as i64));
    let Some(parsed) = parsed else {
        return Some("Stock must be a non-negative number".to_string());
    };
    if parsed < 0 {
        return Some("Stock must be a non-negative number".to_string());
    }
    if parsed > i64::from(STOCK_MAX) {
        return Some("Stock cannot exceed 999,999".to_string());
    }
    None
}

pub fn validate_description(description: Option<&str>) -> Option<String> {
    let description = description.unwrap_or_default();
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Some(format!(
            "Description must not exceed {DESCRIPTION_MAX_LEN} characters"
        ));
    }
    None
}
