// client/src/workflows/mod.rs

//! Multi-step client operations expressed as `agromart_flow` workflows.
//! Each module registers one workflow and exposes a `run` entry point that
//! builds the context, runs it through the registry and reports to the UI.

use crate::errors::AppError;
use agromart_flow::FlowRegistry;

pub mod add_to_cart;
pub mod contexts;
pub mod payment_callback;
pub mod signin;
pub mod signup;
pub mod take_order;

/// Registers every client workflow. Called once when the app state is built.
pub fn register_all(registry: &FlowRegistry<AppError>) {
  tracing::info!("Registering client workflows...");
  signup::register(registry);
  signin::register(registry);
  add_to_cart::register(registry);
  take_order::register(registry);
  payment_callback::register(registry);
  tracing::info!("All client workflows registered.");
}
