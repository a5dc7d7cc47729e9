// client/src/services/notifications.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
  pub title: String,
  pub body: String,
  pub shown_at: DateTime<Utc>,
}

/// Push token registration plus immediate local notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn register_device(&self, token: String);
  /// Shows a notification now. Returns `false` when it was skipped.
  async fn notify_now(&self, title: &str, body: &str) -> bool;
}

/// Records notifications in memory and logs them.
///
/// Without a registered device token nothing is shown, matching a device
/// that never granted notification permission.
#[derive(Default)]
pub struct InProcessNotifier {
  enabled: bool,
  device_token: Mutex<Option<String>>,
  shown: Mutex<Vec<LocalNotification>>,
}

impl InProcessNotifier {
  pub fn new(enabled: bool) -> Self {
    Self {
      enabled,
      ..Self::default()
    }
  }

  pub fn shown(&self) -> Vec<LocalNotification> {
    self.shown.lock().clone()
  }
}

#[async_trait]
impl Notifier for InProcessNotifier {
  async fn register_device(&self, token: String) {
    info!(token_len = token.len(), "Device registered for notifications.");
    *self.device_token.lock() = Some(token);
  }

  async fn notify_now(&self, title: &str, body: &str) -> bool {
    if !self.enabled || self.device_token.lock().is_none() {
      debug!(%title, "Notification skipped: notifications disabled or no device token.");
      return false;
    }
    info!(%title, %body, "Local notification shown.");
    self.shown.lock().push(LocalNotification {
      title: title.to_string(),
      body: body.to_string(),
      shown_at: Utc::now(),
    });
    true
  }
}
