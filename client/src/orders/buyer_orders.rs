// client/src/orders/buyer_orders.rs

use crate::errors::Result as AppResult;
use crate::models::Order;
use crate::state::AppState;
use crate::ui::Screen;
use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

/// The buyer's "My Orders" tab: orders already sent to delivery, newest first.
pub struct BuyerOrdersViewModel {
  state: AppState,
  orders: Vec<Order>,
  error: Option<String>,
}

impl BuyerOrdersViewModel {
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

  #[instrument(name = "orders::load", skip(self), err(Display))]
  pub async fn load(&mut self) -> AppResult<&[Order]> {
    let buyer_id = self.state.require_user()?;
    let fetched = match self.state.api.buyer_orders(&buyer_id).await {
      Ok(orders) => orders,
      Err(e) => {
        warn!(error = %e, "Buyer orders fetch failed.");
        self.orders.clear();
        self.error = Some(e.to_string());
        self.state.ui.show(e.alert());
        return Err(e);
      }
    };

    let mut orders: Vec<Order> = fetched.into_iter().filter(|o| o.sent_to_delivery).collect();
    let images = join_all(orders.iter().map(|o| self.item_image(&o.item_id))).await;
    for (order, image) in orders.iter_mut().zip(images) {
      order.item_image = image;
    }
    orders.sort_by(|a, b| b.order_id.cmp(&a.order_id));

    info!(count = orders.len(), "Buyer orders loaded.");
    self.orders = orders;
    self.error = None;
    Ok(&self.orders)
  }

  async fn item_image(&self, item_id: &str) -> Option<String> {
    match self.state.api.get_item(item_id).await {
      Ok(item) => item.image_url,
      Err(e) => {
        debug!(%item_id, error = %e, "No image for ordered item.");
        None
      }
    }
  }

  pub fn open_tracking(&self, order_id: &str) {
    self.state.ui.navigate(Screen::Tracking {
      order_id: order_id.to_string(),
    });
  }

  /// Opens the complaint form for the order at `index`. Returns false for a bad index.
  pub fn open_complaint(&self, index: usize) -> bool {
    match self.orders.get(index) {
      Some(order) => {
        self.state.ui.navigate(Screen::Complaint {
          order_id: order.order_id.clone(),
          seller_id: order.seller_id.clone(),
        });
        true
      }
      None => false,
    }
  }
}
