use validator::{Validate, ValidationError};

use crate::entities::{Product, Rating};

use super::FormErrors;

/// Editable copy of a product. `id` and `rating` ride along untouched.
#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ProductDraft {
    pub id: i64,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

impl ProductDraft {
    /// Scalar field rules. The image rule needs the form state and lives there.
    pub fn field_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if let Err(report) = self.validate() {
            for (field, failures) in report.field_errors() {
                if let Some(message) = failures.first().and_then(|failure| failure.message.as_ref()) {
                    errors.insert(field.to_string(), message.to_string());
                }
            }
        }

        errors
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> ProductDraft {
        ProductDraft {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            image: product.image,
            rating: product.rating,
        }
    }
}

impl From<ProductDraft> for Product {
    fn from(draft: ProductDraft) -> Product {
        Product {
            id: draft.id,
            title: draft.title,
            price: draft.price,
            description: draft.description,
            category: draft.category,
            image: draft.image,
            rating: draft.rating,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
