// client/src/models/user.rs

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
  Buyer,
  Seller,
  DeliveryRider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  #[serde(deserialize_with = "de::id_string")]
  pub user_id: String,
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name: String,
  #[serde(default)]
  pub mobile_number: String,
  #[serde(default)]
  pub email: String,
  /// Empty string on creation, the address row id once one is saved.
  #[serde(default, deserialize_with = "de::opt_id_string", serialize_with = "empty_if_none")]
  pub address_id: Option<String>,
  pub user_type: UserType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
}

fn empty_if_none<S: serde::Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(value.as_deref().unwrap_or(""))
}

impl UserProfile {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name).trim().to_string()
  }
}

/// Body of `POST /sellers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerRecord {
  pub user_id: String,
  #[serde(rename = "NIC")]
  pub nic: String,
  pub store_name: String,
}

pub const NOT_SET: &str = "Not set yet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  #[serde(default)]
  pub pb_number: Option<String>,
  #[serde(default)]
  pub street_name: Option<String>,
  #[serde(default)]
  pub city: Option<String>,
  #[serde(default)]
  pub district: Option<String>,
}

impl Address {
  /// All fields shown as "Not set yet".
  pub fn unset() -> Self {
    Self {
      pb_number: None,
      street_name: None,
      city: None,
      district: None,
    }
  }

  /// `(label, value)` rows for display; empty fields read "Not set yet".
  pub fn display_rows(&self) -> [(&'static str, &str); 4] {
    [
      ("PB Number", show(&self.pb_number)),
      ("Street", show(&self.street_name)),
      ("City", show(&self.city)),
      ("District", show(&self.district)),
    ]
  }
}

fn show(value: &Option<String>) -> &str {
  match value.as_deref() {
    Some(s) if !s.trim().is_empty() => s,
    _ => NOT_SET,
  }
}

/// Envelope of `GET /get_user_address/{uid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressEnvelope {
  pub user_address: Address,
}

/// Body of `PUT /users/{uid}`: the profile with the address alongside.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
  #[serde(flatten)]
  pub profile: UserProfile,
  pub addressup: Address,
}
