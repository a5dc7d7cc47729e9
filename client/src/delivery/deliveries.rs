// client/src/delivery/deliveries.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::delivery::RIDER_STATUSES;
use crate::models::{Delivery, DeliveryStatusUpdate};
use crate::state::AppState;
use tracing::{info, instrument, warn};

pub const STATUS_UPDATE_FAILED: &str = "Failed to update delivery status";

/// The rider's own deliveries, with a status picker per row.
pub struct DeliveriesViewModel {
  state: AppState,
  deliveries: Vec<Delivery>,
  error: Option<String>,
}

impl DeliveriesViewModel {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      deliveries: Vec::new(),
      error: None,
    }
  }

  pub fn deliveries(&self) -> &[Delivery] {
    &self.deliveries
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Values offered by the status picker.
  pub fn status_options(&self) -> &'static [&'static str] {
    &RIDER_STATUSES
  }

  #[instrument(name = "deliveries::load", skip(self), err(Display))]
  pub async fn load(&mut self) -> AppResult<&[Delivery]> {
    let rider_id = self.state.require_user()?;
    match self.state.api.rider_deliveries(&rider_id).await {
      Ok(deliveries) => {
        info!(count = deliveries.len(), "Rider deliveries loaded.");
        self.deliveries = deliveries;
        self.error = None;
        Ok(&self.deliveries)
      }
      Err(e) => {
        warn!(error = %e, "Rider deliveries fetch failed.");
        self.error = Some(e.to_string());
        Err(e)
      }
    }
  }

  /// Persists `status` for one delivery and mirrors it locally.
  #[instrument(name = "deliveries::change_status", skip(self), err(Display))]
  pub async fn change_status(&mut self, delivery_id: &str, status: &str) -> AppResult<()> {
    if !RIDER_STATUSES.contains(&status) {
      return Err(AppError::Validation(format!("Unknown delivery status '{}'.", status)));
    }

    let update = DeliveryStatusUpdate::new(status);
    if let Err(e) = self.state.api.update_delivery_status(delivery_id, &update).await {
      warn!(error = %e, "Delivery status update failed.");
      self.state.ui.alert("Error", STATUS_UPDATE_FAILED);
      return Err(e);
    }

    if let Some(delivery) = self.deliveries.iter_mut().find(|d| d.delivery_id == delivery_id) {
      delivery.delivery_status = Some(status.to_string());
    }
    self.state.ui.alert("Success", &format!("Status updated to {}", status));
    Ok(())
  }
}
