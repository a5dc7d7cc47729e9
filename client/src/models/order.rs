// client/src/models/order.rs

use super::de;
use serde::{Deserialize, Serialize};

/// Stage of an order, derived from the backend's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
  Placed,
  SentToDelivery,
  TakenByRider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  #[serde(deserialize_with = "de::id_string")]
  pub order_id: String,
  #[serde(default, deserialize_with = "de::opt_id_string")]
  pub buyer_id: Option<String>,
  #[serde(default, deserialize_with = "de::opt_id_string")]
  pub seller_id: Option<String>,
  #[serde(deserialize_with = "de::id_string")]
  pub item_id: String,
  #[serde(default = "one", deserialize_with = "de::quantity")]
  pub quantity: u32,
  #[serde(default)]
  pub order_date: Option<String>,
  #[serde(default, deserialize_with = "de::flag")]
  pub sent_to_delivery: bool,
  #[serde(default, deserialize_with = "de::flag")]
  pub deliver_took: bool,
  #[serde(default)]
  pub buyer_address: Option<String>,
  #[serde(default)]
  pub seller_address: Option<String>,
  /// Filled in client-side from the item record; never sent by the backend.
  #[serde(default, skip_serializing)]
  pub item_image: Option<String>,
}

fn one() -> u32 {
  1
}

impl Order {
  pub fn status(&self) -> OrderStatus {
    if self.deliver_took {
      OrderStatus::TakenByRider
    } else if self.sent_to_delivery {
      OrderStatus::SentToDelivery
    } else {
      OrderStatus::Placed
    }
  }
}

/// Body of `PUT /orders/{id}` when a rider takes the order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTaken {
  pub deliver_took: bool,
}
