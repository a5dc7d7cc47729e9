// client/src/cart/view_model.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::{CartLine, Item, Price};
use crate::state::AppState;
use crate::ui::Screen;
use crate::workflows::add_to_cart::{self, AddToCartOutcome};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 1000;

pub const UPDATE_FAILED: &str = "Failed to update item quantity.";
pub const REMOVE_FAILED: &str = "Failed to remove item from cart.";

/// What the parent screen shows next to the cart: running total and row count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
  pub total: Price,
  pub count: usize,
}

impl CartSummary {
  pub fn of(lines: &[CartLine]) -> Self {
    Self {
      total: lines.iter().map(CartLine::line_total).sum(),
      count: lines.len(),
    }
  }
}

#[derive(Debug, Default)]
struct CartState {
  lines: Vec<CartLine>,
  summary: CartSummary,
  error: Option<String>,
  loading: bool,
}

impl CartState {
  fn recompute(&mut self) {
    self.summary = CartSummary::of(&self.lines);
  }

  fn reset(&mut self) {
    self.lines.clear();
    self.recompute();
  }
}

/// The cart screen. Clones share one cart, so the checkout flow and the
/// tab badge see the same rows and totals.
///
/// Edits are applied locally first and then persisted; when the backend
/// refuses, the prior row is put back and an alert is raised.
#[derive(Clone)]
pub struct CartViewModel {
  state: AppState,
  inner: Arc<Mutex<CartState>>,
}

impl CartViewModel {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      inner: Arc::new(Mutex::new(CartState::default())),
    }
  }

  pub fn lines(&self) -> Vec<CartLine> {
    self.inner.lock().lines.clone()
  }

  pub fn summary(&self) -> CartSummary {
    self.inner.lock().summary
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().lines.is_empty()
  }

  pub fn is_loading(&self) -> bool {
    self.inner.lock().loading
  }

  /// Message of the last failed fetch, if any.
  pub fn error(&self) -> Option<String> {
    self.inner.lock().error.clone()
  }

  /// Reloads the signed-in user's cart. Signed out, the cart is simply emptied.
  #[instrument(name = "cart::on_focus", skip(self))]
  pub async fn on_focus(&self) -> CartSummary {
    let Some(user_id) = self.state.session.user_id() else {
      debug!("No signed-in user; clearing cart.");
      let mut inner = self.inner.lock();
      inner.reset();
      inner.error = None;
      return inner.summary;
    };

    self.inner.lock().loading = true;
    let fetched = self.state.api.get_cart(&user_id).await;

    let mut inner = self.inner.lock();
    inner.loading = false;
    match fetched {
      Ok(lines) => {
        inner.lines = lines;
        inner.error = None;
        inner.recompute();
        info!(count = inner.summary.count, total = %inner.summary.total, "Cart loaded.");
      }
      Err(e) => {
        warn!(error = %e, "Cart fetch failed.");
        inner.reset();
        inner.error = Some(e.to_string());
      }
    }
    inner.summary
  }

  /// Sets row `index` to `quantity`.
  ///
  /// Out-of-range quantities or indexes are rejected before anything changes.
  #[instrument(name = "cart::set_quantity", skip(self), err(Display))]
  pub async fn set_quantity(&self, index: usize, quantity: u32) -> AppResult<()> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
      return Err(AppError::Validation(format!(
        "Quantity must be between {} and {}.",
        MIN_QUANTITY, MAX_QUANTITY
      )));
    }
    let user_id = self.state.require_user()?;

    let snapshot = {
      let mut inner = self.inner.lock();
      let line = inner
        .lines
        .get_mut(index)
        .ok_or_else(|| AppError::Validation(format!("No cart row at position {}.", index)))?;
      if line.quantity == quantity {
        return Ok(());
      }
      let snapshot = line.clone();
      line.quantity = quantity;
      inner.recompute();
      snapshot
    };

    if let Err(e) = self
      .state
      .api
      .update_cart_quantity(&user_id, &snapshot.item_id, quantity)
      .await
    {
      warn!(error = %e, item_id = %snapshot.item_id, "Quantity update failed; restoring row.");
      {
        let mut inner = self.inner.lock();
        // Only undo our own write; a newer edit of the same row wins.
        if let Some(line) = inner
          .lines
          .iter_mut()
          .find(|l| l.item_id == snapshot.item_id && l.quantity == quantity)
        {
          *line = snapshot;
        }
        inner.recompute();
      }
      self.state.ui.alert("Error", UPDATE_FAILED);
      return Err(e);
    }
    Ok(())
  }

  /// Stepper "+". No-op at the upper bound.
  pub async fn increment(&self, index: usize) -> AppResult<()> {
    match self.quantity_at(index) {
      Some(q) if q < MAX_QUANTITY => self.set_quantity(index, q + 1).await,
      _ => Ok(()),
    }
  }

  /// Stepper "-". No-op at the lower bound.
  pub async fn decrement(&self, index: usize) -> AppResult<()> {
    match self.quantity_at(index) {
      Some(q) if q > MIN_QUANTITY => self.set_quantity(index, q - 1).await,
      _ => Ok(()),
    }
  }

  fn quantity_at(&self, index: usize) -> Option<u32> {
    self.inner.lock().lines.get(index).map(|l| l.quantity)
  }

  /// Removes row `index`; on failure the row goes back where it was.
  #[instrument(name = "cart::delete", skip(self), err(Display))]
  pub async fn delete(&self, index: usize) -> AppResult<()> {
    let user_id = self.state.require_user()?;

    let removed = {
      let mut inner = self.inner.lock();
      if index >= inner.lines.len() {
        return Err(AppError::Validation(format!("No cart row at position {}.", index)));
      }
      let removed = inner.lines.remove(index);
      inner.recompute();
      removed
    };

    if let Err(e) = self.state.api.remove_from_cart(&user_id, &removed.item_id).await {
      warn!(error = %e, item_id = %removed.item_id, "Cart delete failed; re-inserting row.");
      {
        let mut inner = self.inner.lock();
        // A reload while the delete was in flight may have brought the row back.
        if !inner.lines.iter().any(|l| l.item_id == removed.item_id) {
          let at = index.min(inner.lines.len());
          inner.lines.insert(at, removed);
        }
        inner.recompute();
      }
      self.state.ui.alert("Error", REMOVE_FAILED);
      return Err(e);
    }
    Ok(())
  }

  /// Adds `item` to the remote cart and reloads on success.
  pub async fn add_to_cart(&self, item: &Item, quantity: u32) -> AppResult<AddToCartOutcome> {
    let outcome = add_to_cart::run(&self.state, item, quantity).await?;
    if outcome == AddToCartOutcome::Added {
      self.on_focus().await;
    }
    Ok(outcome)
  }

  /// Moves on to checkout with the current total, or back home when empty.
  pub fn request_checkout(&self) -> Option<Price> {
    let summary = self.summary();
    if summary.count > 0 {
      self.state.ui.navigate(Screen::Checkout { total: summary.total });
      Some(summary.total)
    } else {
      self
        .state
        .ui
        .alert("Cart is Empty", "Please add items to cart to proceed to checkout");
      self.state.ui.navigate(Screen::Home);
      None
    }
  }

  /// Drops local rows once a payment has gone through.
  pub fn clear_after_payment(&self) {
    let mut inner = self.inner.lock();
    inner.reset();
    inner.error = None;
  }
}
