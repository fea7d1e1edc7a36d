// src/config.rs

use std::{env, net::SocketAddr, str::FromStr};

use axum::http::HeaderValue;
use dotenvy::dotenv;

use crate::{
    error::ConfigError,
    pagination::{PageWindow, PaginationDefaults},
    utils::markdown::MarkdownOptions,
};

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub log_dir: String,
    pub allowed_origins: Vec<String>,
    pub markdown: MarkdownOptions,
    pub pagination: PaginationDefaults,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map(|_| origin.to_string())
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "ALLOWED_ORIGINS",
                        value: origin.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = MarkdownOptions::default();
        let max_input_bytes = parse_or(&lookup, "MARKDOWN_MAX_BYTES", defaults.max_input_bytes)?;
        if max_input_bytes == 0 {
            return Err(ConfigError::NotPositive("MARKDOWN_MAX_BYTES"));
        }
        let hard_wrap = parse_or(&lookup, "MARKDOWN_HARD_WRAP", defaults.hard_wrap)?;

        let items = parse_or(&lookup, "PAGINATION_ITEMS", PaginationDefaults::default().items)?;
        if items == 0 {
            return Err(ConfigError::NotPositive("PAGINATION_ITEMS"));
        }
        let size = match lookup("PAGINATION_SIZE") {
            Some(raw) => raw.parse::<PageWindow>()?,
            None => PageWindow::default(),
        };

        Ok(Self {
            rust_log,
            bind_addr,
            log_dir,
            allowed_origins,
            markdown: MarkdownOptions {
                max_input_bytes,
                hard_wrap,
            },
            pagination: PaginationDefaults::new(items, size)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
            }),
        None => Ok(default),
    }
}
