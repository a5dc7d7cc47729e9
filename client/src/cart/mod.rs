// client/src/cart/mod.rs

//! The buyer's cart screen.

pub mod view_model;

pub use view_model::{CartSummary, CartViewModel, MAX_QUANTITY, MIN_QUANTITY};
