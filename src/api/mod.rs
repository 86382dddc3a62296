pub mod category;
pub mod form;
pub mod product;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware, response::Response, Extension, Json,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use category::category_router;
use product::product_router;

use crate::client::{ClientError, ProductApi};
use crate::config::Config;
use crate::middleware::logging::{logging_middleware, to_response, ApiError};

/// Room for the text fields that travel next to an uploaded file.
const FORM_FIELDS_ALLOWANCE: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub api: ProductApi,
}

impl AppState {
    pub fn new(config: Config) -> Result<AppState, ClientError> {
        let api = ProductApi::new(config.product_api_url.clone(), config.request_timeout)?;
        Ok(AppState { config, api })
    }
}

pub fn create_api_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.file_size_limit + FORM_FIELDS_ALLOWANCE;

    Router::new()
        .nest("/api", product_router().merge(category_router()))
        .layer(Extension(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Maps a product API failure onto our own response.
pub(crate) fn upstream_failure(err: ClientError) -> Response {
    match err {
        ClientError::NotFound => to_response(
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Product not found"
                })),
            ),
            Err(ApiError::General(err.to_string())),
        ),
        other => to_response(
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Product API is unavailable"
                })),
            ),
            Err(ApiError::Upstream(other.to_string())),
        ),
    }
}
