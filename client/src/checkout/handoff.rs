// client/src/checkout/handoff.rs

use crate::cart::CartViewModel;
use crate::checkout::ledger::PaymentLedger;
use crate::errors::{AppError, Result as AppResult};
use crate::models::Price;
use crate::state::AppState;
use crate::ui::Screen;
use reqwest::Url;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const SUCCESS_MARKER: &str = "/Success";
pub const ERROR_MARKER: &str = "/Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
  /// The payment page reported success. `verified` is true only when a signed
  /// gateway callback for this checkout and amount has been recorded.
  Succeeded { verified: bool },
  Failed,
}

/// One trip through the hosted payment page.
///
/// The embedded browser reports every URL it navigates to through
/// [`CheckoutHandoff::on_navigation`]; the first success or error URL ends the
/// checkout and later ones are ignored.
pub struct CheckoutHandoff {
  state: AppState,
  cart: CartViewModel,
  ledger: PaymentLedger,
  reference: Uuid,
  amount: Price,
  payment_url: String,
  outcome: Option<CheckoutOutcome>,
}

impl CheckoutHandoff {
  /// Builds `{payment_page_url}/{user_id}?reference={uuid}&amount={total}` for the current cart.
  #[instrument(name = "checkout::start", skip_all, err(Display))]
  pub fn start(
    state: &AppState,
    cart: &CartViewModel,
    ledger: &PaymentLedger,
    payment_page_url: &str,
  ) -> AppResult<Self> {
    let user_id = state.require_user()?;
    let amount = cart.summary().total;
    if amount <= Price::ZERO {
      return Err(AppError::Validation("Please add items to cart to proceed to checkout".to_string()));
    }
    let reference = Uuid::new_v4();

    let mut url = Url::parse(&format!("{}/", payment_page_url.trim_end_matches('/')))
      .and_then(|base| base.join(&user_id))
      .map_err(|e| AppError::Config(format!("Invalid payment page URL: {}", e)))?;
    url
      .query_pairs_mut()
      .append_pair("reference", &reference.to_string())
      .append_pair("amount", &amount.to_string());

    info!(%reference, %amount, "Checkout handed off to payment page.");
    Ok(Self {
      state: state.clone(),
      cart: cart.clone(),
      ledger: ledger.clone(),
      reference,
      amount,
      payment_url: url.to_string(),
      outcome: None,
    })
  }

  pub fn payment_url(&self) -> &str {
    &self.payment_url
  }

  pub fn reference(&self) -> Uuid {
    self.reference
  }

  pub fn amount(&self) -> Price {
    self.amount
  }

  pub fn outcome(&self) -> Option<CheckoutOutcome> {
    self.outcome
  }

  /// Whether the gateway has confirmed this checkout. The callback can land
  /// after the browser redirect, so this re-reads the ledger.
  pub fn is_verified(&self) -> bool {
    self.ledger.is_paid(&self.reference, self.amount)
  }

  /// Feeds one navigated URL. Returns the outcome only on the transition.
  #[instrument(name = "checkout::on_navigation", skip(self), fields(reference = %self.reference))]
  pub async fn on_navigation(&mut self, url: &str) -> Option<CheckoutOutcome> {
    if self.outcome.is_some() {
      return None;
    }

    let outcome = if url.contains(SUCCESS_MARKER) {
      let verified = self.is_verified();
      if !verified {
        warn!("Payment page reported success before a signed callback arrived.");
      }
      self
        .state
        .notifier
        .notify_now("Payment successful", "Your order has been placed.")
        .await;
      self.cart.clear_after_payment();
      self.state.ui.navigate(Screen::Home);
      CheckoutOutcome::Succeeded { verified }
    } else if url.contains(ERROR_MARKER) {
      self
        .state
        .ui
        .alert("Payment failed", "The payment could not be completed. Please try again.");
      self.state.ui.navigate(Screen::Home);
      CheckoutOutcome::Failed
    } else {
      return None;
    };

    info!(?outcome, "Checkout finished.");
    self.outcome = Some(outcome);
    Some(outcome)
  }
}
