// client/src/orders/complaint.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::Complaint;
use crate::state::AppState;
use crate::ui::Screen;
use tracing::{info, instrument, warn};

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const LOGIN_REQUIRED: &str = "You need to be logged in to submit a complaint.";
pub const SUBMITTED: &str = "Complaint submitted successfully!";
pub const SUBMIT_FAILED: &str = "Failed to submit the complaint. Please try again.";

/// Complaint about one order, optionally escalated to the seller.
pub struct ComplaintForm {
  state: AppState,
  pub order_id: String,
  pub seller_id: Option<String>,
  pub description: String,
  pub complain_seller: bool,
  error: Option<String>,
}

impl ComplaintForm {
  pub fn new(state: AppState, order_id: impl Into<String>, seller_id: Option<String>) -> Self {
    Self {
      state,
      order_id: order_id.into(),
      seller_id,
      description: String::new(),
      complain_seller: false,
      error: None,
    }
  }

  /// Inline message under the form.
  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  #[instrument(name = "complaint::submit", skip(self), fields(order_id = %self.order_id), err(Display))]
  pub async fn submit(&mut self) -> AppResult<()> {
    if self.description.trim().is_empty() {
      self.error = Some(DESCRIPTION_REQUIRED.to_string());
      return Err(AppError::Validation(DESCRIPTION_REQUIRED.to_string()));
    }
    let Some(buyer_id) = self.state.session.user_id() else {
      self.error = Some(LOGIN_REQUIRED.to_string());
      return Err(AppError::Validation(LOGIN_REQUIRED.to_string()));
    };

    let complaint = Complaint {
      buyer_id,
      description: self.description.trim().to_string(),
      seller_id: self.seller_id.clone(),
      order_id: self.order_id.clone(),
      complaint_seller: self.complain_seller,
      complaint_status_seller: Complaint::INITIAL_STATUS.to_string(),
    };
    if let Err(e) = self.state.api.submit_complaint(&complaint).await {
      warn!(error = %e, "Complaint submission failed.");
      self.error = Some(SUBMIT_FAILED.to_string());
      return Err(e);
    }

    info!("Complaint submitted.");
    self.error = None;
    self.state.ui.alert("Complaint", SUBMITTED);
    self.state.ui.navigate(Screen::Orders);
    Ok(())
  }
}
