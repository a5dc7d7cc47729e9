// client/src/lib.rs

//! Marketplace client for buyers, sellers and delivery riders.
//!
//! View models talk to the REST backend through [`services::MarketplaceApi`],
//! report navigation and alerts through [`ui::UiSink`], and run their
//! multi-step operations as `agromart_flow` workflows.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod models;
pub mod orders;
pub mod profile;
pub mod services;
pub mod session;
pub mod state;
pub mod ui;
pub mod validation;
pub mod web;
pub mod workflows;

pub use errors::{AppError, Result};
pub use state::AppState;
