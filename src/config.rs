use dotenvy::dotenv;
use std::{str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_PRODUCT_API_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_FILE_SIZE_LIMIT: usize = 5 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Collection endpoint of the remote product API, without trailing slash.
    pub product_api_url: String,
    pub bind_address: String,
    /// Largest accepted image upload, in bytes.
    pub file_size_limit: usize,
    pub request_timeout: Duration,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let product_api_url = lookup("PRODUCT_API_URL")
            .unwrap_or_else(|| DEFAULT_PRODUCT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if product_api_url.is_empty() {
            return Err(ConfigError::Empty("PRODUCT_API_URL"));
        }

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        if bind_address.is_empty() {
            return Err(ConfigError::Empty("BIND_ADDRESS"));
        }

        let file_size_limit = parse_var(&lookup, "FILE_SIZE_LIMIT", DEFAULT_FILE_SIZE_LIMIT)?;
        let timeout_secs = parse_var(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Config {
            product_api_url,
            bind_address,
            file_size_limit,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::InvalidValue { name, value })
        }
        None => Ok(default),
    }
}
