// client/src/delivery/rider_orders.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::Order;
use crate::state::AppState;
use crate::workflows::take_order;
use tracing::{info, instrument, warn};

pub const NO_ORDERS: &str = "No orders found.";

/// Orders a rider can still pick up.
pub struct RiderOrdersViewModel {
  state: AppState,
  orders: Vec<Order>,
  error: Option<String>,
}

impl RiderOrdersViewModel {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      orders: Vec::new(),
      error: None,
    }
  }

  pub fn orders(&self) -> &[Order] {
    &self.orders
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Loads orders not yet taken by any rider. A 404 reads as an empty list.
  #[instrument(name = "rider_orders::load", skip(self))]
  pub async fn load(&mut self) -> &[Order] {
    match self.state.api.list_orders().await {
      Ok(orders) => {
        self.orders = orders.into_iter().filter(|o| !o.deliver_took).collect();
        self.error = None;
        info!(count = self.orders.len(), "Available orders loaded.");
      }
      Err(e) if e.is_not_found() => {
        self.orders.clear();
        self.error = Some(NO_ORDERS.to_string());
      }
      Err(e) => {
        warn!(error = %e, "Available orders fetch failed.");
        self.orders.clear();
        self.error = Some(e.to_string());
      }
    }
    &self.orders
  }

  /// "Take it": runs the take-order workflow, then drops the order from the list.
  #[instrument(name = "rider_orders::take", skip(self), err(Display))]
  pub async fn take(&mut self, order_id: &str) -> AppResult<bool> {
    if !self.orders.iter().any(|o| o.order_id == order_id) {
      return Err(AppError::NotFound(format!("Order {} is not available.", order_id)));
    }
    let rider_id = self.state.require_user()?;

    match take_order::run(&self.state, order_id, &rider_id).await {
      Ok(notified) => {
        self.orders.retain(|o| o.order_id != order_id);
        Ok(notified)
      }
      Err(e) => {
        self.state.ui.alert("Error", &e.to_string());
        Err(e)
      }
    }
  }
}
