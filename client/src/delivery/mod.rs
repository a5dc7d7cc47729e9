// client/src/delivery/mod.rs

//! Delivery rider screens.

pub mod dashboard;
pub mod deliveries;
pub mod rider_orders;

pub use dashboard::{RiderDashboard, RiderTab};
pub use deliveries::DeliveriesViewModel;
pub use rider_orders::RiderOrdersViewModel;
