// client/src/checkout/ledger.rs

use crate::models::Price;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Paid,
  Failed,
}

/// Body the payment gateway posts to the callback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCallback {
  pub reference: Uuid,
  pub user_id: String,
  pub amount: Price,
  pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
  pub callback: PaymentCallback,
  pub received_at: DateTime<Utc>,
}

/// Verified payment results by checkout reference. Shared between the
/// callback server and checkout handoffs.
#[derive(Debug, Clone, Default)]
pub struct PaymentLedger {
  records: Arc<RwLock<HashMap<Uuid, PaymentRecord>>>,
}

impl PaymentLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores a verified callback. A repeated callback for the same reference replaces the earlier one.
  pub fn record(&self, callback: PaymentCallback) {
    info!(reference = %callback.reference, status = ?callback.status, amount = %callback.amount, "Payment callback recorded.");
    self.records.write().insert(
      callback.reference,
      PaymentRecord {
        callback,
        received_at: Utc::now(),
      },
    );
  }

  pub fn get(&self, reference: &Uuid) -> Option<PaymentRecord> {
    self.records.read().get(reference).cloned()
  }

  /// Paid, for the expected amount.
  pub fn is_paid(&self, reference: &Uuid, amount: Price) -> bool {
    self
      .records
      .read()
      .get(reference)
      .map(|r| r.callback.status == PaymentStatus::Paid && r.callback.amount == amount)
      .unwrap_or(false)
  }

  pub fn len(&self) -> usize {
    self.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
