use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::{
    form::{read_form_actions, submission_failure, submit, validation_failure},
    upstream_failure, AppState,
};
use crate::catalog::{category_selector, CatalogView};
use crate::client::ClientError;
use crate::form::FormState;
use crate::middleware::logging::to_response;

//ROUTERS
pub fn product_router() -> Router {
    Router::new()
        .route("/product", get(get_products).post(create_product))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

//ROUTES
async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let products = match state.api.fetch_products().await {
        Ok(products) => products,
        Err(err) => return upstream_failure(err),
    };

    let query = params.query.unwrap_or_default();
    let category = category_selector(params.category.as_deref());
    let view = CatalogView::new(&products, &query, category);

    to_response((StatusCode::OK, Json(view)), Ok(()))
}

async fn get_product(
    Path(id): Path<i64>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match state.api.fetch_product(id).await {
        Ok(product) => to_response((StatusCode::OK, Json(product)), Ok(())),
        Err(err) => upstream_failure(err),
    }
}

async fn create_product(Extension(state): Extension<Arc<AppState>>, multipart: Multipart) -> Response {
    let actions = match read_form_actions(multipart, state.config.file_size_limit).await {
        Ok(actions) => actions,
        Err(response) => return response,
    };

    let (form, payload) = match submit(FormState::new(), actions) {
        Ok(prepared) => prepared,
        Err(errors) => return validation_failure(errors),
    };

    match state.api.create_product(payload).await {
        Ok(created) => {
            info!(id = created.id, "Product created");
            to_response((StatusCode::CREATED, Json(created)), Ok(()))
        }
        Err(err) => submission_failure(form, err.to_string()),
    }
}

async fn update_product(
    Path(id): Path<i64>,
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let actions = match read_form_actions(multipart, state.config.file_size_limit).await {
        Ok(actions) => actions,
        Err(response) => return response,
    };

    let seed = match state.api.fetch_product(id).await {
        Ok(product) => product,
        Err(err) => return upstream_failure(err),
    };

    let (form, payload) = match submit(FormState::edit(seed), actions) {
        Ok(prepared) => prepared,
        Err(errors) => return validation_failure(errors),
    };

    match state.api.update_product(id, payload).await {
        Ok(updated) => {
            info!(id, "Product updated");
            to_response((StatusCode::OK, Json(updated)), Ok(()))
        }
        Err(ClientError::NotFound) => upstream_failure(ClientError::NotFound),
        Err(err) => submission_failure(form, err.to_string()),
    }
}

async fn delete_product(
    Path(id): Path<i64>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match state.api.delete_product(id).await {
        Ok(()) => {
            info!(id, "Product deleted");
            to_response(
                (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Product deleted successfully."
                    })),
                ),
                Ok(()),
            )
        }
        Err(err) => upstream_failure(err),
    }
}

//Structs
#[derive(Deserialize)]
struct GetProductsQuery {
    query: Option<String>,
    category: Option<String>,
}
