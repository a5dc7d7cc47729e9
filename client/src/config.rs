// client/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// REST backend, e.g. `https://backend.example.app` (no trailing slash).
  pub backend_base_url: String,
  pub identity_base_url: String,
  pub identity_api_key: String,
  /// Hosted payment page; the user id and query are appended per checkout.
  pub payment_page_url: String,
  /// Shared secret for the payment gateway's signed callbacks.
  pub payment_callback_secret: String,
  pub callback_host: String,
  pub callback_port: u16,
  pub http_timeout: Duration,
  pub notifications_enabled: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any key lookup. `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let backend_base_url = trim_base(get_env("BACKEND_BASE_URL")?);
    let identity_base_url = trim_base(
      get_env("IDENTITY_BASE_URL").unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string()),
    );
    let identity_api_key = get_env("IDENTITY_API_KEY").unwrap_or_default();
    let payment_page_url = trim_base(get_env("PAYMENT_PAGE_URL")?);
    let payment_callback_secret = get_env("PAYMENT_CALLBACK_SECRET")?;

    let callback_host = get_env("CALLBACK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let callback_port = get_env("CALLBACK_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid CALLBACK_PORT: {}", e)))?;
    let http_timeout_secs = get_env("HTTP_TIMEOUT_SECS")
      .unwrap_or_else(|_| "15".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?;
    let notifications_enabled = get_env("NOTIFICATIONS_ENABLED")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid NOTIFICATIONS_ENABLED value: {}", e)))?;

    tracing::info!(%backend_base_url, %callback_host, callback_port, "Application configuration loaded successfully.");

    Ok(Self {
      backend_base_url,
      identity_base_url,
      identity_api_key,
      payment_page_url,
      payment_callback_secret,
      callback_host,
      callback_port,
      http_timeout: Duration::from_secs(http_timeout_secs),
      notifications_enabled,
    })
  }

  pub fn callback_bind_address(&self) -> String {
    format!("{}:{}", self.callback_host, self.callback_port)
  }
}

fn trim_base(url: String) -> String {
  url.trim_end_matches('/').to_string()
}
