// client/src/workflows/contexts.rs

//! Data carried through each client workflow. Handlers receive these
//! wrapped in `agromart_flow::ContextData`.

use crate::checkout::{CallbackVerifier, PaymentCallback, PaymentLedger};
use crate::models::{Price, UserProfile, UserType};
use crate::services::AuthUser;
use crate::state::AppState;
use crate::validation::SignUpForm;

#[derive(Clone)]
pub struct SignUpCtxData {
  pub state: AppState,
  pub form: SignUpForm,
  pub role: UserType,
  pub account: Option<AuthUser>,
  pub profile: Option<UserProfile>,
}

#[derive(Clone)]
pub struct SignInCtxData {
  pub state: AppState,
  pub email: String,
  pub password: String,
  pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCartOutcome {
  Added,
  AlreadyInCart,
  SignInRequired,
}

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub state: AppState,
  pub item_id: String,
  pub unit_price: Price,
  pub quantity: u32,
  pub buyer_id: Option<String>,
  pub outcome: Option<AddToCartOutcome>,
}

#[derive(Clone)]
pub struct TakeOrderCtxData {
  pub state: AppState,
  pub order_id: String,
  pub rider_id: String,
  pub delivery_created: bool,
  pub order_marked: bool,
  pub notified: bool,
}

#[derive(Clone)]
pub struct PaymentCallbackCtxData {
  pub verifier: CallbackVerifier,
  pub ledger: PaymentLedger,
  pub raw_payload: Vec<u8>,
  pub signature: Option<String>,
  pub callback: Option<PaymentCallback>,
}
