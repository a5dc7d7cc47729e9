// client/src/web/mod.rs

//! The small HTTP surface this client exposes: the payment gateway's signed
//! callback and a health check.

pub mod handlers;
pub mod routes;

use crate::checkout::{CallbackVerifier, PaymentLedger};
use crate::errors::AppError;
use agromart_flow::FlowRegistry;
use std::sync::Arc;

pub use routes::configure_app_routes;

/// Shared with every request through `web::Data`.
#[derive(Clone)]
pub struct CallbackState {
  pub flows: Arc<FlowRegistry<AppError>>,
  pub verifier: CallbackVerifier,
  pub ledger: PaymentLedger,
}
