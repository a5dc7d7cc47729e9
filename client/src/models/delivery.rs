// client/src/models/delivery.rs

use super::de;
use serde::{Deserialize, Serialize};

/// Status the backend sets once the order is handed to delivery.
pub const STATUS_PROCESSED: &str = "Delivery Processed";
/// Terminal rider status; also marks the delivery as received by the buyer.
pub const STATUS_DELIVERED: &str = "Delivered";
/// Choices offered to a rider, in display order.
pub const RIDER_STATUSES: [&str; 3] = ["Delivery Processing", "Delivery Shipped", STATUS_DELIVERED];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
  #[serde(deserialize_with = "de::id_string")]
  pub delivery_id: String,
  #[serde(deserialize_with = "de::id_string")]
  pub order_id: String,
  #[serde(default, deserialize_with = "de::opt_id_string")]
  pub delivery_rider_id: Option<String>,
  #[serde(default)]
  pub delivery_status: Option<String>,
  /// When the rider was assigned.
  #[serde(default)]
  pub delivered_to_sc: Option<String>,
  /// When the rider delivered.
  #[serde(default)]
  pub delivered_to_dc: Option<String>,
  #[serde(default, deserialize_with = "de::flag")]
  pub is_delivered_to_buyer: bool,
  #[serde(default)]
  pub confirmation_date: Option<String>,
}

/// Body of `POST /deliveries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDelivery {
  pub order_id: String,
  pub delivery_rider_id: String,
  pub is_delivered_to_buyer: bool,
}

/// Body of `PUT /delivery-status/{delivery_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryStatusUpdate {
  pub delivery_status: String,
  pub is_delivered_to_buyer: bool,
}

impl DeliveryStatusUpdate {
  pub fn new(status: &str) -> Self {
    Self {
      delivery_status: status.to_string(),
      is_delivered_to_buyer: status == STATUS_DELIVERED,
    }
  }
}

/// Body of `PATCH /delivery/{delivery_id}` when the buyer confirms receipt.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryConfirmation {
  pub is_delivered_to_buyer: bool,
  pub confirmation_date: String,
}
