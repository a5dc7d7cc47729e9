// client/src/ui.rs

//! What view models tell the front end: where to go and what to show.

use crate::errors::Alert;
use crate::models::Price;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  SignIn,
  SignUpBuyer,
  SignUpSeller,
  /// Tab host after sign-in; opens on the catalog.
  HomeTabs,
  Home,
  ItemView { item_id: String },
  Cart,
  Checkout { total: Price },
  Orders,
  Tracking { order_id: String },
  Complaint { order_id: String, seller_id: Option<String> },
  RiderDashboard,
  RiderOrders,
  Deliveries,
  Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
  Navigate(Screen),
  Alert(Alert),
}

pub trait UiSink: Send + Sync {
  fn emit(&self, event: UiEvent);

  fn navigate(&self, screen: Screen) {
    self.emit(UiEvent::Navigate(screen));
  }

  fn alert(&self, title: &str, message: &str) {
    self.emit(UiEvent::Alert(Alert::new(title, message)));
  }

  fn show(&self, alert: Alert) {
    self.emit(UiEvent::Alert(alert));
  }
}

/// Forwards events to the task that drives the real front end.
#[derive(Debug, Clone)]
pub struct ChannelUi {
  tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelUi {
  pub fn new() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx }, rx)
  }
}

impl UiSink for ChannelUi {
  fn emit(&self, event: UiEvent) {
    if self.tx.send(event).is_err() {
      debug!("UI event dropped: front end is gone.");
    }
  }
}

/// Keeps every event in order. Used by headless drivers and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
  events: Arc<Mutex<Vec<UiEvent>>>,
}

impl RecordingUi {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<UiEvent> {
    self.events.lock().clone()
  }

  pub fn alerts(&self) -> Vec<Alert> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        UiEvent::Alert(a) => Some(a.clone()),
        UiEvent::Navigate(_) => None,
      })
      .collect()
  }

  pub fn navigations(&self) -> Vec<Screen> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        UiEvent::Navigate(s) => Some(s.clone()),
        UiEvent::Alert(_) => None,
      })
      .collect()
  }

  pub fn clear(&self) {
    self.events.lock().clear();
  }
}

impl UiSink for RecordingUi {
  fn emit(&self, event: UiEvent) {
    self.events.lock().push(event);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn channel_ui_forwards_in_order() {
    let (ui, mut rx) = ChannelUi::new();
    ui.alert("Error", "boom");
    ui.navigate(Screen::Home);

    assert_eq!(rx.recv().await, Some(UiEvent::Alert(Alert::new("Error", "boom"))));
    assert_eq!(rx.recv().await, Some(UiEvent::Navigate(Screen::Home)));
  }

  #[test]
  fn channel_ui_tolerates_closed_receiver() {
    let (ui, rx) = ChannelUi::new();
    drop(rx);
    ui.navigate(Screen::Cart);
  }
}
