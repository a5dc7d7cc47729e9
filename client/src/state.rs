// client/src/state.rs

use crate::errors::AppError;
use crate::services::{IdentityProvider, MarketplaceApi, Notifier};
use crate::session::SessionContext;
use crate::ui::UiSink;
use crate::workflows;
use agromart_flow::FlowRegistry;
use std::sync::Arc;

/// Everything a view model or workflow handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
  pub api: Arc<dyn MarketplaceApi>,
  pub identity: Arc<dyn IdentityProvider>,
  pub notifier: Arc<dyn Notifier>,
  pub session: SessionContext,
  pub ui: Arc<dyn UiSink>,
  pub flows: Arc<FlowRegistry<AppError>>,
}

impl AppState {
  /// Starts signed out, with every client workflow registered.
  pub fn new(
    api: Arc<dyn MarketplaceApi>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    ui: Arc<dyn UiSink>,
  ) -> Self {
    let flows = Arc::new(FlowRegistry::<AppError>::new());
    workflows::register_all(&flows);
    Self {
      api,
      identity,
      notifier,
      session: SessionContext::new(),
      ui,
      flows,
    }
  }

  /// The signed-in user's id, or the alert-worthy error when nobody is signed in.
  pub fn require_user(&self) -> Result<String, AppError> {
    self
      .session
      .user_id()
      .ok_or_else(|| AppError::Validation("You need to be logged in.".to_string()))
  }
}
