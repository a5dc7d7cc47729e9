// client/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use agromart_flow::FlowError;
use serde_json::json;
use thiserror::Error;

/// A user-facing alert: title plus message, as shown by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
  pub title: String,
  pub message: String,
}

impl Alert {
  pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      message: message.into(),
    }
  }
}

/// Shown for every sign-in failure, whatever the cause.
pub const SIGN_IN_FAILED: &str = "Username and Password Mismatched try again";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("This item is already in the cart")]
  AlreadyInCart,

  #[error("HTTP {status}: {message}")]
  Http { status: u16, message: String },

  #[error("Network Error: {0}")]
  Network(String),

  #[error("Payment Processing Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AppError {
  /// The alert the front end shows for this error.
  pub fn alert(&self) -> Alert {
    match self {
      AppError::Validation(m) => Alert::new("Invalid input", m.clone()),
      AppError::Auth(_) => Alert::new("Error", SIGN_IN_FAILED),
      AppError::NotFound(m) => Alert::new("Not found", m.clone()),
      AppError::AlreadyInCart => Alert::new("Cart", "This item is already in the cart"),
      AppError::Http { message, .. } | AppError::Network(message) => Alert::new("Error", message.clone()),
      AppError::Payment(m) => Alert::new("Payment failed", m.clone()),
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        Alert::new("Error", "Something went wrong. Please try again.")
      }
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, AppError::NotFound(_) | AppError::Http { status: 404, .. })
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
    match err.status() {
      Some(status) => AppError::Http {
        status: status.as_u16(),
        message: err.to_string(),
      },
      None => AppError::Network(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::AlreadyInCart => HttpResponse::Conflict().json(json!({"error": self.to_string()})),
      AppError::Payment(m) => HttpResponse::PaymentRequired().json(json!({"error": m})),
      AppError::Http { .. } | AppError::Network(_) => {
        HttpResponse::BadGateway().json(json!({"error": "Upstream service error", "detail": self.to_string()}))
      }
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Workflow { source } => {
        tracing::error!(flow_error_source = ?source, "Workflow error details");
        HttpResponse::InternalServerError()
          .json(json!({"error": "Workflow processing error", "detail": source.to_string()}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
