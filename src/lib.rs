//! Catalog browsing and editing service in front of a remote product API.
//!
//! The catalog filter and the product form are pure; `api` and `client` carry
//! requests between them and the remote API.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod entities;
pub mod form;
pub mod middleware;

pub use api::{create_api_router, AppState};
pub use config::Config;
