pub mod filter;

use serde::Serialize;

use crate::entities::Product;

pub use filter::{categories, filter_products};

/// Filtered slice of the catalog plus the counts shown next to it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogView {
    pub items: Vec<Product>,
    pub shown: usize,
    pub total: usize,
}

impl CatalogView {
    pub fn new(products: &[Product], query: &str, category: Option<&str>) -> CatalogView {
        let items = filter_products(products, query, category);

        CatalogView {
            shown: items.len(),
            total: products.len(),
            items,
        }
    }
}

/// Normalizes the "All" selector: absent and empty both mean no category filter.
pub fn category_selector(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}
