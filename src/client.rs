//! HTTP client for the remote product API. Plays both the product source and
//! the submission sink for the form.

use reqwest::{multipart, Client, RequestBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::entities::Product;
use crate::form::{MultipartPayload, Payload};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to product API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Product API responded with status {0}")]
    Status(u16),
    #[error("Product not found")]
    NotFound,
    #[error("Failed to decode product API response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct ProductApi {
    http: Client,
    base_url: String,
}

impl ProductApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<ProductApi, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(ProductApi {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_products(&self) -> Result<Vec<Product>, ClientError> {
        let body = self.send(self.http.get(&self.base_url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn fetch_product(&self, id: i64) -> Result<Product, ClientError> {
        let body = self.send(self.http.get(self.item_url(id))).await?;
        decode_product(&body)
    }

    pub async fn create_product(&self, payload: Payload) -> Result<Product, ClientError> {
        let submitted = payload.as_record();
        let request = with_payload(self.http.post(&self.base_url), payload)?;
        let body = self.send(request).await?;
        Ok(written_product(submitted, &body))
    }

    pub async fn update_product(&self, id: i64, payload: Payload) -> Result<Product, ClientError> {
        let mut submitted = payload.as_record();
        submitted.id = id;
        let request = with_payload(self.http.put(self.item_url(id)), payload)?;
        let body = self.send(request).await?;
        Ok(written_product(submitted, &body))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        self.send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = %status, "Product API responded");

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// The demo API answers unknown ids with `200` and an empty body.
fn decode_product(body: &str) -> Result<Product, ClientError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Err(ClientError::NotFound);
    }
    Ok(serde_json::from_str(body)?)
}

/// Any 2xx write succeeded. Whatever fields the remote echoes back are laid
/// over the submitted record; a partial or unreadable echo keeps the rest.
fn written_product(submitted: Product, body: &str) -> Product {
    let echoed = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(fields)) => fields,
        _ => return submitted,
    };

    let mut merged = match serde_json::to_value(&submitted) {
        Ok(serde_json::Value::Object(fields)) => fields,
        _ => return submitted,
    };
    merged.extend(echoed);

    match serde_json::from_value(serde_json::Value::Object(merged)) {
        Ok(product) => product,
        Err(err) => {
            debug!(error = %err, "Keeping submitted product over unreadable echo");
            submitted
        }
    }
}

fn with_payload(request: RequestBuilder, payload: Payload) -> Result<RequestBuilder, ClientError> {
    match payload {
        Payload::Record(product) => Ok(request.json(&product)),
        Payload::Multipart(multipart) => Ok(request.multipart(multipart_form(multipart)?)),
    }
}

fn multipart_form(payload: MultipartPayload) -> Result<multipart::Form, ClientError> {
    let mime = payload.file.mime();
    let mut form = multipart::Form::new();

    for (name, value) in payload.text_fields() {
        form = form.text(name, value.to_string());
    }

    let image = multipart::Part::bytes(payload.file.bytes)
        .file_name(payload.file.file_name)
        .mime_str(&mime)?;

    Ok(form.part("image", image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_null_body_means_not_found() {
        assert!(matches!(decode_product(""), Err(ClientError::NotFound)));
        assert!(matches!(decode_product("  null "), Err(ClientError::NotFound)));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(decode_product("{\"id\": "), Err(ClientError::Decode(_))));
    }

    fn submitted() -> Product {
        Product {
            title: "Desk Lamp".into(),
            price: 10.0,
            description: "Warm light".into(),
            category: "electronics".into(),
            ..Default::default()
        }
    }

    #[test]
    fn id_only_echo_keeps_submitted_fields() {
        let product = written_product(submitted(), r#"{"id": 21}"#);
        assert_eq!(product.id, 21);
        assert_eq!(product.title, "Desk Lamp");
        assert_eq!(product.price, 10.0);
    }

    #[test]
    fn full_echo_wins_over_submitted_fields() {
        let body = r#"{"id": 21, "title": "Desk Lamp", "price": 10, "category": "electronics",
            "image": "https://example.com/uploads/lamp.png"}"#;

        let product = written_product(submitted(), body);
        assert_eq!(product.image, "https://example.com/uploads/lamp.png");
        assert_eq!(product.description, "Warm light");
    }

    #[test]
    fn empty_or_odd_echo_returns_the_submission() {
        for body in ["", "null", "true", r#"{"price": "cheap"}"#] {
            assert_eq!(written_product(submitted(), body), submitted());
        }
    }

    #[test]
    fn item_urls_append_the_id() {
        let api = ProductApi::new("http://localhost:9000/products", Duration::from_secs(1)).unwrap();
        assert_eq!(api.item_url(4), "http://localhost:9000/products/4");
    }
}
