// client/src/models/complaint.rs

use serde::Serialize;

/// Body of `POST /api/complaints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complaint {
  pub buyer_id: String,
  pub description: String,
  pub seller_id: Option<String>,
  pub order_id: String,
  pub complaint_seller: bool,
  pub complaint_status_seller: String,
}

impl Complaint {
  pub const INITIAL_STATUS: &'static str = "reviewing";
}
