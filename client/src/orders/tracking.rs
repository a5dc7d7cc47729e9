// client/src/orders/tracking.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::delivery::STATUS_PROCESSED;
use crate::models::{Delivery, DeliveryConfirmation, UserProfile};
use crate::state::AppState;
use chrono::Local;
use tracing::{info, instrument, warn};

pub const CONFIRMATION_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const CONFIRMED: &str = "Delivery confirmed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingStep {
  pub title: &'static str,
  pub description: String,
  pub complete: bool,
}

/// The three progress rows, read straight off the delivery record.
pub fn tracking_steps(delivery: &Delivery, rider: Option<&UserProfile>) -> [TrackingStep; 3] {
  let assigned = match (&delivery.delivered_to_sc, rider) {
    (Some(on), Some(rider)) => format!(
      "Assigned to: {} {}\nContact: {}\nOn: {}",
      rider.first_name, rider.last_name, rider.mobile_number, on
    ),
    (Some(on), None) => format!("Assigned to a delivery rider.\nOn: {}", on),
    (None, _) => "Not yet assigned to a delivery rider.".to_string(),
  };
  let delivered = if delivery.is_delivered_to_buyer {
    let on = delivery
      .delivered_to_dc
      .as_deref()
      .or(delivery.confirmation_date.as_deref())
      .unwrap_or_default();
    format!("Delivered on: {}", on)
  } else {
    "Not yet delivered to buyer.".to_string()
  };

  [
    TrackingStep {
      title: "Order Processed",
      description: "The order has been processed.".to_string(),
      complete: delivery.delivery_status.as_deref() == Some(STATUS_PROCESSED),
    },
    TrackingStep {
      title: "Assigned to Delivery Rider",
      description: assigned,
      complete: delivery.delivered_to_sc.is_some(),
    },
    TrackingStep {
      title: "Delivered to Buyer",
      description: delivered,
      complete: delivery.is_delivered_to_buyer,
    },
  ]
}

pub struct TrackingViewModel {
  state: AppState,
  order_id: String,
  delivery: Option<Delivery>,
  rider: Option<UserProfile>,
}

impl TrackingViewModel {
  pub fn new(state: AppState, order_id: impl Into<String>) -> Self {
    Self {
      state,
      order_id: order_id.into(),
      delivery: None,
      rider: None,
    }
  }

  pub fn delivery(&self) -> Option<&Delivery> {
    self.delivery.as_ref()
  }

  pub fn rider(&self) -> Option<&UserProfile> {
    self.rider.as_ref()
  }

  /// Fetches the delivery for this order and, once assigned, the rider's profile.
  #[instrument(name = "tracking::load", skip(self), fields(order_id = %self.order_id), err(Display))]
  pub async fn load(&mut self) -> AppResult<()> {
    let delivery = self
      .state
      .api
      .delivery_for_order(&self.order_id)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("No delivery for order {}.", self.order_id)))?;

    self.rider = match &delivery.delivery_rider_id {
      Some(rider_id) => match self.state.api.get_user(rider_id).await {
        Ok(profile) => Some(profile),
        Err(e) => {
          warn!(%rider_id, error = %e, "Rider profile unavailable.");
          None
        }
      },
      None => None,
    };
    self.delivery = Some(delivery);
    Ok(())
  }

  /// Empty until loaded.
  pub fn steps(&self) -> Vec<TrackingStep> {
    self
      .delivery
      .as_ref()
      .map(|d| tracking_steps(d, self.rider.as_ref()).to_vec())
      .unwrap_or_default()
  }

  pub fn can_confirm(&self) -> bool {
    self.delivery.as_ref().is_some_and(|d| !d.is_delivered_to_buyer)
  }

  /// Buyer confirms receipt. Disabled once confirmed.
  #[instrument(name = "tracking::confirm_delivery", skip(self), fields(order_id = %self.order_id), err(Display))]
  pub async fn confirm_delivery(&mut self) -> AppResult<()> {
    let delivery_id = match &self.delivery {
      Some(d) if !d.is_delivered_to_buyer => d.delivery_id.clone(),
      Some(_) => return Err(AppError::Validation("Delivery is already confirmed.".to_string())),
      None => return Err(AppError::NotFound(format!("No delivery for order {}.", self.order_id))),
    };

    let confirmation = DeliveryConfirmation {
      is_delivered_to_buyer: true,
      confirmation_date: Local::now().format(CONFIRMATION_FORMAT).to_string(),
    };
    if let Err(e) = self.state.api.confirm_delivery(&delivery_id, &confirmation).await {
      self
        .state
        .ui
        .alert("Error", &format!("Error confirming delivery: {}", e));
      return Err(e);
    }

    if let Some(delivery) = self.delivery.as_mut() {
      delivery.is_delivered_to_buyer = true;
      delivery.confirmation_date = Some(confirmation.confirmation_date);
    }
    info!(%delivery_id, "Delivery confirmed by buyer.");
    self.state.ui.alert("Success", CONFIRMED);
    Ok(())
  }
}
