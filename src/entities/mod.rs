pub mod category;
pub mod product;

pub use category::{category_options, CategoryOption, CATEGORY_OPTIONS};
pub use product::{Product, Rating};
