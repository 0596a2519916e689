use crate::domain::product::{Product, ProductDraft};

/// Demonstration catalog used as the fallback whenever no persisted data
/// exists. Built through the factory so ids and timestamps are fresh.
pub fn sample_products() -> Vec<Product> {
    SEED
        .iter()
        .map(|(name, description, price, category, stock)| {
            Product::from_draft(&ProductDraft {
                name: Some((*name).to_string()),
                description: Some((*description).to_string()),
                price: Some((*price).to_string()),
                category: Some((*category).to_string()),
                stock: Some((*stock).to_string()),
                image_url: None,
            })
        })
        .collect()
}

const SEED: &[(&str, &str, &str, &str, &str)] = &[
    (
        "iPhone 14 Pro",
        "Latest Apple smartphone with advanced camera system and A16 Bionic chip.",
        "999.99",
        "Electronics",
        "15",
    ),
    (
        "Samsung Galaxy S23",
        "Premium Android smartphone with exceptional camera and display quality.",
        "899.99",
        "Electronics",
        "8",
    ),
    (
        "MacBook Air M2",
        "Ultra-thin laptop with M2 chip, perfect for productivity and creativity.",
        "1199.99",
        "Electronics",
        "12",
    ),
    (
        "Nike Air Max 270",
        "Comfortable running shoes with Air Max technology for maximum comfort.",
        "149.99",
        "Sports",
        "25",
    ),
    (
        "Levi's 501 Jeans",
        "Classic straight-fit jeans made from premium denim.",
        "79.99",
        "Clothing",
        "30",
    ),
    (
        "The Great Gatsby",
        "Classic American novel by F. Scott Fitzgerald.",
        "12.99",
        "Books",
        "50",
    ),
    (
        "KitchenAid Stand Mixer",
        "Professional-grade stand mixer perfect for baking enthusiasts.",
        "379.99",
        "Home",
        "7",
    ),
    (
        "Instant Pot Duo",
        "7-in-1 electric pressure cooker for quick and easy meals.",
        "89.99",
        "Home",
        "18",
    ),
    (
        "Adidas Ultraboost 22",
        "High-performance running shoes with Boost midsole technology.",
        "189.99",
        "Sports",
        "20",
    ),
    (
        "Harry Potter Complete Set",
        "Complete collection of Harry Potter books by J.K. Rowling.",
        "59.99",
        "Books",
        "3",
    ),
    (
        "Zara Wool Coat",
        "Elegant wool coat perfect for winter fashion.",
        "129.99",
        "Clothing",
        "14",
    ),
    (
        "Sony WH-1000XM4",
        "Premium noise-canceling wireless headphones with exceptional sound quality.",
        "349.99",
        "Electronics",
        "0",
    ),
    (
        "Yoga Mat Pro",
        "Premium non-slip yoga mat for all types of yoga practice.",
        "39.99",
        "Sports",
        "35",
    ),
    (
        "Coffee Table Book: Photography",
        "Beautiful coffee table book featuring stunning photography from around the world.",
        "29.99",
        "Books",
        "12",
    ),
    (
        "Smart Home Thermostat",
        "Wi-Fi enabled smart thermostat for energy-efficient home heating and cooling.",
        "199.99",
        "Home",
        "9",
    ),
];
