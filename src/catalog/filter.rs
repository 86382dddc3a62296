use std::collections::HashSet;

use crate::entities::Product;

/// Stable filter over the catalog.
///
/// `query` is matched case-insensitively as a substring of the title and is not
/// trimmed. `category: None` means "all categories"; otherwise the category
/// must match exactly.
pub fn filter_products(products: &[Product], query: &str, category: Option<&str>) -> Vec<Product> {
    let needle = query.to_lowercase();

    products
        .iter()
        .filter(|product| matches_query(product, &needle) && matches_category(product, category))
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for product in products {
        if seen.insert(product.category.as_str()) {
            ordered.push(product.category.clone());
        }
    }

    ordered
}

fn matches_query(product: &Product, needle: &str) -> bool {
    needle.is_empty() || product.title.to_lowercase().contains(needle)
}

fn matches_category(product: &Product, category: Option<&str>) -> bool {
    match category {
        Some(category) => product.category == category,
        None => true,
    }
}
