// client/src/models/item.rs

use super::de;
use super::price::Price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  #[serde(deserialize_with = "de::id_string")]
  pub item_id: String,
  #[serde(default)]
  pub item_name: String,
  #[serde(default)]
  pub category: Option<String>,
  pub unit_price: Price,
  #[serde(default)]
  pub unit_type: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "de::number")]
  pub average_rating_value: f64,
  #[serde(default, deserialize_with = "de::opt_id_string")]
  pub seller_id: Option<String>,
}
