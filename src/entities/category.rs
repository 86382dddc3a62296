use serde::Serialize;

/// Categories offered by the product form.
pub const CATEGORY_OPTIONS: [&str; 4] = [
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: String,
}

impl CategoryOption {
    fn new(value: &'static str) -> CategoryOption {
        CategoryOption {
            value,
            label: display_label(value),
        }
    }
}

pub fn category_options() -> Vec<CategoryOption> {
    CATEGORY_OPTIONS.into_iter().map(CategoryOption::new).collect()
}

/// Upper-cases the first character, leaves the rest untouched.
pub fn display_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
