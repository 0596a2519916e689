//! Pure filter, search, sort and aggregate functions over product
//! collections. Nothing here mutates its input or touches the store.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::product::{Category, Product, StockStatus};

/// Case-insensitive substring match against name, description and
/// category label. A blank term keeps every product.
pub fn search(products: &[Product], term: &str) -> Vec<Product> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
                || product.category.label().to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Exact category match; `None` means no filtering.
pub fn filter_by_category(products: &[Product], category: Option<Category>) -> Vec<Product> {
    match category {
        None => products.to_vec(),
        Some(category) => products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect(),
    }
}

/// Inclusive price bounds; a `None` or NaN bound is unbounded on that side.
pub fn filter_by_price_range(
    products: &[Product],
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<Product> {
    let min = min.filter(|bound| !bound.is_nan());
    let max = max.filter(|bound| !bound.is_nan());

    products
        .iter()
        .filter(|product| {
            min.is_none_or(|min| product.price >= min)
                && max.is_none_or(|max| product.price <= max)
        })
        .cloned()
        .collect()
}

/// Keep products whose derived stock status matches; `None` means all.
pub fn filter_by_stock_status(products: &[Product], status: Option<StockStatus>) -> Vec<Product> {
    match status {
        None => products.to_vec(),
        Some(status) => products
            .iter()
            .filter(|product| product.stock_status() == status)
            .cloned()
            .collect(),
    }
}

/// Sort orders available to the list view. Name comparisons are
/// case-insensitive; the category sort breaks ties by name ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
    Category,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::StockAsc => "stock_asc",
            SortKey::StockDesc => "stock_desc",
            SortKey::Category => "category",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name_asc" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "stock_asc" => Ok(SortKey::StockAsc),
            "stock_desc" => Ok(SortKey::StockDesc),
            "category" => Ok(SortKey::Category),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Stable sort of a snapshot by the given key.
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::NameAsc => sorted.sort_by_key(|p| p.name.to_lowercase()),
        SortKey::NameDesc => {
            sorted.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::StockAsc => sorted.sort_by_key(|p| p.stock),
        SortKey::StockDesc => sorted.sort_by(|a, b| b.stock.cmp(&a.stock)),
        SortKey::Category => sorted.sort_by(|a, b| {
            a.category
                .label()
                .cmp(b.category.label())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
    }
    sorted
}

/// Aggregate counts and inventory value for a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductStats {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of price * stock across the collection, rounded to cents.
    pub total_value: f64,
    pub categories: BTreeMap<Category, usize>,
}

pub fn product_stats(products: &[Product]) -> ProductStats {
    let mut stats = ProductStats {
        total: products.len(),
        ..ProductStats::default()
    };

    for product in products {
        match product.stock_status() {
            StockStatus::InStock => stats.in_stock += 1,
            StockStatus::LowStock => stats.low_stock += 1,
            StockStatus::OutOfStock => stats.out_of_stock += 1,
        }
        stats.total_value += product.price * f64::from(product.stock);
        *stats.categories.entry(product.category).or_insert(0) += 1;
    }

    stats.total_value = (stats.total_value * 100.0).round() / 100.0;
    stats
}

/// Ephemeral filter criteria owned by a query invocation, not the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<Category>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub stock_status: Option<StockStatus>,
    pub sort_by: SortKey,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        *self != FilterCriteria::default()
    }

    /// How many filter groups are narrowing the result (sort excluded).
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.search.trim().is_empty() {
            count += 1;
        }
        if self.category.is_some() {
            count += 1;
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            count += 1;
        }
        if self.stock_status.is_some() {
            count += 1;
        }
        count
    }
}

/// Apply every criterion in the mandated order:
/// search -> category -> price range -> stock status -> sort.
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let filtered = search(products, &criteria.search);
    let filtered = filter_by_category(&filtered, criteria.category);
    let filtered = filter_by_price_range(&filtered, criteria.min_price, criteria.max_price);
    let filtered = filter_by_stock_status(&filtered, criteria.stock_status);
    sort_products(&filtered, criteria.sort_by)
}

pub fn low_stock_products(products: &[Product]) -> Vec<Product> {
    filter_by_stock_status(products, Some(StockStatus::LowStock))
}

pub fn out_of_stock_products(products: &[Product]) -> Vec<Product> {
    filter_by_stock_status(products, Some(StockStatus::OutOfStock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductDraft;

    fn product(name: &str, category: &str, price: &str, stock: &str) -> Product {
        Product::from_draft(&ProductDraft {
            name: Some(name.to_string()),
            description: Some(format!("{name} description")),
            price: Some(price.to_string()),
            category: Some(category.to_string()),
            stock: Some(stock.to_string()),
            image_url: None,
        })
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("iPhone 14", "Electronics", "999", "10"),
            product("JS Book", "Books", "29.99", "5"),
            product("Cotton Shirt", "Clothing", "49.99", "0"),
        ]
    }

    #[test]
    fn test_search_blank_term_returns_everything() {
        let products = fixture();
        assert_eq!(search(&products, ""), products);
        assert_eq!(search(&products, "   "), products);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = fixture();
        let matches = search(&products, "IPHONE");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "iPhone 14");
    }

    #[test]
    fn test_search_covers_description_and_category() {
        let products = fixture();
        assert_eq!(search(&products, "shirt description").len(), 1);
        assert_eq!(search(&products, "books").len(), 1);
    }

    #[test]
    fn test_filter_by_category() {
        let products = fixture();
        let books = filter_by_category(&products, Some(Category::Books));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "JS Book");
        assert_eq!(filter_by_category(&products, None).len(), 3);
    }

    #[test]
    fn test_filter_by_price_range_inclusive_bounds() {
        let products = fixture();
        let mid = filter_by_price_range(&products, Some(29.99), Some(49.99));
        assert_eq!(mid.len(), 2);
        assert_eq!(filter_by_price_range(&products, None, None).len(), 3);
        // NaN bounds are unbounded, not empty.
        assert_eq!(
            filter_by_price_range(&products, Some(f64::NAN), Some(f64::NAN)).len(),
            3
        );
    }

    #[test]
    fn test_filter_by_stock_status() {
        let products = fixture();
        let out = filter_by_stock_status(&products, Some(StockStatus::OutOfStock));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Cotton Shirt");
        assert_eq!(low_stock_products(&products).len(), 1);
        assert_eq!(out_of_stock_products(&products).len(), 1);
    }

    #[test]
    fn test_sort_by_price() {
        let products = fixture();
        let sorted = sort_products(&products, SortKey::PriceAsc);
        let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![29.99, 49.99, 999.0]);

        let reversed = sort_products(&products, SortKey::PriceDesc);
        assert_eq!(reversed[0].price, 999.0);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let products = fixture();
        let once = sort_products(&products, SortKey::PriceAsc);
        let twice = sort_products(&once, SortKey::PriceAsc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let products = vec![
            product("banana stand", "Other", "1", "1"),
            product("Apple Crate", "Other", "1", "1"),
        ];
        let sorted = sort_products(&products, SortKey::NameAsc);
        assert_eq!(sorted[0].name, "Apple Crate");
    }

    #[test]
    fn test_category_sort_breaks_ties_by_name() {
        let products = vec![
            product("Zebra Lamp", "Home", "10", "1"),
            product("Anvil", "Home", "10", "1"),
            product("Amp", "Electronics", "10", "1"),
        ];
        let sorted = sort_products(&products, SortKey::Category);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amp", "Anvil", "Zebra Lamp"]);
    }

    #[test]
    fn test_stats_empty_collection_is_all_zero() {
        let stats = product_stats(&[]);
        assert_eq!(stats, ProductStats::default());
    }

    #[test]
    fn test_stats_counts_and_total_value() {
        let products = vec![
            product("A", "Electronics", "100", "10"),
            product("B", "Books", "50", "3"),
            product("C", "Home", "75", "0"),
        ];
        let stats = product_stats(&products);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.in_stock, 1);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.total_value, 1150.0);
        assert_eq!(stats.categories.get(&Category::Electronics), Some(&1));
        assert_eq!(stats.categories.len(), 3);
    }

    #[test]
    fn test_stats_total_value_rounds_to_cents() {
        let products = vec![
            product("A", "Other", "0.10", "3"),
            product("B", "Other", "0.20", "3"),
        ];
        let stats = product_stats(&products);
        assert_eq!(stats.total_value, 0.9);
    }

    #[test]
    fn test_apply_filters_composition_order() {
        let products = fixture();

        let books_only = apply_filters(
            &products,
            &FilterCriteria {
                category: Some(Category::Books),
                ..FilterCriteria::default()
            },
        );
        assert_eq!(books_only.len(), 1);
        assert_eq!(books_only[0].name, "JS Book");

        let phone_only = apply_filters(
            &products,
            &FilterCriteria {
                search: "iPhone".to_string(),
                ..FilterCriteria::default()
            },
        );
        assert_eq!(phone_only.len(), 1);
        assert_eq!(phone_only[0].name, "iPhone 14");

        let by_price = apply_filters(
            &products,
            &FilterCriteria {
                sort_by: SortKey::PriceAsc,
                ..FilterCriteria::default()
            },
        );
        let prices: Vec<f64> = by_price.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![29.99, 49.99, 999.0]);
    }

    #[test]
    fn test_filter_criteria_activity() {
        let defaults = FilterCriteria::default();
        assert!(!defaults.is_active());
        assert_eq!(defaults.active_filter_count(), 0);

        let busy = FilterCriteria {
            search: "phone".to_string(),
            category: Some(Category::Electronics),
            min_price: Some(10.0),
            stock_status: Some(StockStatus::InStock),
            ..FilterCriteria::default()
        };
        assert!(busy.is_active());
        assert_eq!(busy.active_filter_count(), 4);

        // A non-default sort alone counts as active but not as a filter.
        let sorted_only = FilterCriteria {
            sort_by: SortKey::PriceDesc,
            ..FilterCriteria::default()
        };
        assert!(sorted_only.is_active());
        assert_eq!(sorted_only.active_filter_count(), 0);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price_asc".parse::<SortKey>(), Ok(SortKey::PriceAsc));
        assert_eq!(SortKey::Category.as_str(), "category");
        assert!("newest".parse::<SortKey>().is_err());
    }
}
