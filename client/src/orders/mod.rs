// client/src/orders/mod.rs

//! Buyer-side order screens: the order list, tracking and complaints.

pub mod buyer_orders;
pub mod complaint;
pub mod tracking;

pub use buyer_orders::BuyerOrdersViewModel;
pub use complaint::ComplaintForm;
pub use tracking::{tracking_steps, TrackingStep, TrackingViewModel};
