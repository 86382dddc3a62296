use crate::entities::Product;

use super::image::UploadedFile;

/// What the submission sink receives.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// URL-based image: the whole record, `id` and `rating` included.
    Record(Product),
    /// Uploaded image: the file plus the scalar fields, no image URL.
    Multipart(MultipartPayload),
}

impl Payload {
    /// The record as submitted. A multipart upload has no image URL yet.
    pub fn as_record(&self) -> Product {
        match self {
            Payload::Record(product) => product.clone(),
            Payload::Multipart(multipart) => Product {
                title: multipart.title.clone(),
                price: multipart.price.parse().unwrap_or_default(),
                description: multipart.description.clone(),
                category: multipart.category.clone(),
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultipartPayload {
    pub file: UploadedFile,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl MultipartPayload {
    /// Text parts in submission order.
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("price", self.price.as_str()),
            ("category", self.category.as_str()),
        ]
    }
}

/// Shortest decimal rendering: `10`, `12.5`.
pub fn format_price(price: f64) -> String {
    price.to_string()
}
