use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::{upstream_failure, AppState};
use crate::catalog::categories;
use crate::entities::category_options;
use crate::middleware::logging::to_response;

pub fn category_router() -> Router {
    Router::new()
        .route("/category", get(get_categories))
        .route("/category/options", get(get_category_options))
}

/// Categories present in the catalog, first-seen order.
async fn get_categories(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.api.fetch_products().await {
        Ok(products) => to_response((StatusCode::OK, Json(categories(&products))), Ok(())),
        Err(err) => upstream_failure(err),
    }
}

/// Choices offered by the product form.
async fn get_category_options() -> Response {
    to_response((StatusCode::OK, Json(category_options())), Ok(()))
}
