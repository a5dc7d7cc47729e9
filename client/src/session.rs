// client/src/session.rs

//! The signed-in user, shared explicitly instead of through a global.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Who is signed in, if anyone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
  #[default]
  SignedOut,
  SignedIn { user_id: String, email: String },
}

impl SessionState {
  pub fn user_id(&self) -> Option<&str> {
    match self {
      SessionState::SignedIn { user_id, .. } => Some(user_id),
      SessionState::SignedOut => None,
    }
  }
}

/// Cheap to clone; every clone observes the same session.
#[derive(Debug, Clone)]
pub struct SessionContext {
  tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionContext {
  fn default() -> Self {
    Self::new()
  }
}

impl SessionContext {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(SessionState::SignedOut);
    Self { tx: Arc::new(tx) }
  }

  pub fn current(&self) -> SessionState {
    self.tx.borrow().clone()
  }

  pub fn user_id(&self) -> Option<String> {
    self.tx.borrow().user_id().map(str::to_string)
  }

  pub fn sign_in(&self, user_id: impl Into<String>, email: impl Into<String>) {
    let user_id = user_id.into();
    info!(%user_id, "Session started.");
    self.tx.send_replace(SessionState::SignedIn {
      user_id,
      email: email.into(),
    });
  }

  /// Ends the session and wakes every subscriber.
  pub fn logout(&self) {
    if self.tx.borrow().user_id().is_some() {
      info!("Session ended.");
    }
    self.tx.send_replace(SessionState::SignedOut);
  }

  pub fn subscribe(&self) -> SessionSubscription {
    SessionSubscription { rx: self.tx.subscribe() }
  }
}

/// Receives session changes. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
  rx: watch::Receiver<SessionState>,
}

impl SessionSubscription {
  pub fn current(&self) -> SessionState {
    self.rx.borrow().clone()
  }

  /// Waits for the next change. `None` once the session context is gone.
  pub async fn changed(&mut self) -> Option<SessionState> {
    self.rx.changed().await.ok()?;
    Some(self.rx.borrow_and_update().clone())
  }

  /// Returns the pending change without waiting, if there is one.
  pub fn poll_change(&mut self) -> Option<SessionState> {
    match self.rx.has_changed() {
      Ok(true) => Some(self.rx.borrow_and_update().clone()),
      _ => None,
    }
  }
}
