// client/src/models/review.rs

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  #[serde(deserialize_with = "de::id_string")]
  pub item_id: String,
  #[serde(default, deserialize_with = "de::opt_id_string")]
  pub buyer_id: Option<String>,
  pub rating: u8,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
}

impl Review {
  pub fn author(&self) -> String {
    let first = self.first_name.as_deref().unwrap_or("").trim();
    let last = self.last_name.as_deref().unwrap_or("").trim();
    match (first.is_empty(), last.is_empty()) {
      (true, true) => "Anonymous".to_string(),
      (false, true) => first.to_string(),
      (true, false) => last.to_string(),
      (false, false) => format!("{} {}", first, last),
    }
  }
}

/// Body of `POST /reviews`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
  pub item_id: String,
  pub description: String,
  pub rating: u8,
  pub buyer_id: String,
}
