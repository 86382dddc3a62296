#![allow(dead_code)]

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use storefront_catalog::{
    create_api_router,
    entities::{Product, Rating},
    AppState, Config,
};

pub const FILE_SIZE_LIMIT: usize = 1024;

/// What the fake product API saw on a write request.
#[derive(Clone, Debug, Default)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub multipart: bool,
    pub fields: BTreeMap<String, String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_len: usize,
    pub json: Option<serde_json::Value>,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    pub products: Arc<Mutex<Vec<Product>>>,
    pub received: Arc<Mutex<Vec<Received>>>,
    pub fail_writes: bool,
    /// Answer writes with `{"id": ..}` only, like some real product APIs.
    pub id_only_writes: bool,
}

impl FakeStore {
    pub fn seeded() -> FakeStore {
        FakeStore {
            products: Arc::new(Mutex::new(seed_products())),
            ..Default::default()
        }
    }

    pub fn failing() -> FakeStore {
        FakeStore {
            fail_writes: true,
            ..FakeStore::seeded()
        }
    }

    pub fn id_only() -> FakeStore {
        FakeStore {
            id_only_writes: true,
            ..FakeStore::seeded()
        }
    }

    pub fn last_received(&self) -> Received {
        self.received
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("No write request reached the product API")
    }

    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

pub struct TestApp {
    pub base_url: String,
    pub store: FakeStore,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(FakeStore::seeded()).await
}

pub async fn spawn_app_with(store: FakeStore) -> TestApp {
    let remote_url = serve(fake_product_api(store.clone())).await;

    let config = Config {
        product_api_url: format!("{remote_url}/products"),
        bind_address: "127.0.0.1:0".to_string(),
        file_size_limit: FILE_SIZE_LIMIT,
        request_timeout: Duration::from_secs(5),
    };
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    let base_url = serve(create_api_router(state)).await;

    TestApp { base_url, store }
}

pub fn seed_products() -> Vec<Product> {
    vec![
        product(1, "Red Shirt", 22.3, "men's clothing", Rating { rate: 4.1, count: 259 }),
        product(2, "Blue Ring", 99.0, "jewelery", Rating { rate: 3.9, count: 70 }),
        product(3, "Gold Ring", 168.0, "jewelery", Rating { rate: 4.6, count: 400 }),
        product(4, "SSD Drive", 109.0, "electronics", Rating { rate: 4.8, count: 319 }),
    ]
}

fn product(id: i64, title: &str, price: f64, category: &str, rating: Rating) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{title} from the test catalog"),
        category: category.to_string(),
        image: format!("https://fakestore.test/img/{id}.jpg"),
        rating,
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn fake_product_api(store: FakeStore) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(store)
}

async fn list_products(State(store): State<FakeStore>) -> Response {
    let products = store.products.lock().unwrap().clone();
    Json(products).into_response()
}

async fn get_product(Path(id): Path<i64>, State(store): State<FakeStore>) -> Response {
    let found = store
        .products
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.id == id)
        .cloned();

    match found {
        Some(product) => Json(product).into_response(),
        // mirrors the demo API: unknown ids are a 200 with an empty body
        None => (StatusCode::OK, "").into_response(),
    }
}

async fn create_product(State(store): State<FakeStore>, req: Request) -> Response {
    let received = read_write_request("POST", "/products".to_string(), req).await;
    store.received.lock().unwrap().push(received.clone());

    if store.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if store.id_only_writes {
        return Json(serde_json::json!({ "id": 21 })).into_response();
    }

    Json(echo_product(21, &received)).into_response()
}

async fn update_product(
    Path(id): Path<i64>,
    State(store): State<FakeStore>,
    req: Request,
) -> Response {
    let received = read_write_request("PUT", format!("/products/{id}"), req).await;
    store.received.lock().unwrap().push(received.clone());

    if store.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if store.id_only_writes {
        return Json(serde_json::json!({ "id": id })).into_response();
    }

    Json(echo_product(id, &received)).into_response()
}

async fn delete_product(Path(id): Path<i64>, State(store): State<FakeStore>) -> Response {
    store.received.lock().unwrap().push(Received {
        method: "DELETE".to_string(),
        path: format!("/products/{id}"),
        ..Default::default()
    });

    let mut products = store.products.lock().unwrap();
    match products.iter().position(|p| p.id == id) {
        Some(index) => Json(products.remove(index)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn read_write_request(method: &str, path: String, req: Request) -> Received {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let mut received = Received {
        method: method.to_string(),
        path,
        multipart: is_multipart,
        ..Default::default()
    };

    if is_multipart {
        let mut multipart = Multipart::from_request(req, &()).await.unwrap();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_owned);
            let file_type = field.content_type().map(str::to_owned);

            if file_name.is_some() {
                let data = field.bytes().await.unwrap();
                received.file_name = file_name;
                received.file_type = file_type;
                received.file_len = data.len();
                received.fields.insert(name, "<file>".to_string());
            } else {
                let value = field.text().await.unwrap();
                received.fields.insert(name, value);
            }
        }
    } else {
        let Json(value) = Json::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap();
        received.json = Some(value);
    }

    received
}

fn echo_product(id: i64, received: &Received) -> serde_json::Value {
    match &received.json {
        Some(json) => {
            let mut json = json.clone();
            json["id"] = serde_json::json!(id);
            json
        }
        None => serde_json::json!({
            "id": id,
            "title": received.fields.get("title"),
            "price": received.fields.get("price").and_then(|p| p.parse::<f64>().ok()),
            "description": received.fields.get("description"),
            "category": received.fields.get("category"),
            "image": format!(
                "https://fakestore.test/uploads/{}",
                received.file_name.clone().unwrap_or_default()
            ),
        }),
    }
}
