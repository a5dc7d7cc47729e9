// client/src/models/cart_line.rs

use super::de;
use super::price::Price;
use serde::{Deserialize, Serialize};

/// One row of the signed-in buyer's remote cart, as returned by
/// `GET /cartWithSellerName/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  #[serde(deserialize_with = "de::id_string")]
  pub item_id: String,
  #[serde(default)]
  pub seller_name: String,
  #[serde(default)]
  pub item_name: String,
  #[serde(rename = "price")]
  pub unit_price: Price,
  #[serde(deserialize_with = "de::quantity")]
  pub quantity: u32,
}

impl CartLine {
  pub fn line_total(&self) -> Price {
    self.unit_price * self.quantity
  }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartLine {
  pub buyer_id: String,
  pub item_id: String,
  pub quantity: u32,
  pub price: Price,
}

/// Body of `PUT /cart/{uid}/{item_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct QuantityUpdate {
  pub quantity: u32,
}
