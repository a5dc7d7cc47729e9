// client/src/profile.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Address, ProfileUpdate, UserProfile};
use crate::state::AppState;
use crate::ui::Screen;
use tracing::{info, instrument, warn};

/// The profile tab shared by every role: user details plus a postal address.
pub struct ProfileViewModel {
  state: AppState,
  profile: Option<UserProfile>,
  address: Address,
  editable: bool,
  error: Option<String>,
}

impl ProfileViewModel {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      profile: None,
      address: Address::unset(),
      editable: false,
      error: None,
    }
  }

  pub fn profile(&self) -> Option<&UserProfile> {
    self.profile.as_ref()
  }

  pub fn address(&self) -> &Address {
    &self.address
  }

  pub fn is_editable(&self) -> bool {
    self.editable
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Loads the profile, and the address when one has been saved before.
  #[instrument(name = "profile::load", skip(self), err(Display))]
  pub async fn load(&mut self) -> AppResult<&UserProfile> {
    let user_id = self.state.require_user()?;
    let profile = self.state.api.get_user(&user_id).await.inspect_err(|e| {
      self.state.ui.alert("Error", &e.to_string());
    })?;

    self.address = if profile.address_id.as_deref().is_some_and(|id| !id.is_empty()) {
      match self.state.api.get_user_address(&user_id).await {
        Ok(address) => address,
        Err(e) => {
          warn!(error = %e, "Address fetch failed.");
          self.state.ui.alert("Error", &e.to_string());
          Address::unset()
        }
      }
    } else {
      Address::unset()
    };
    self.error = None;
    Ok(&*self.profile.insert(profile))
  }

  pub fn edit(&mut self) {
    self.editable = true;
  }

  /// Applies local edits before `save`. Ignored unless editing.
  pub fn update(&mut self, change: impl FnOnce(&mut UserProfile, &mut Address)) {
    if !self.editable {
      return;
    }
    if let Some(profile) = self.profile.as_mut() {
      change(profile, &mut self.address);
    }
  }

  /// PUTs profile and address; the response replaces the local profile.
  #[instrument(name = "profile::save", skip(self), err(Display))]
  pub async fn save(&mut self) -> AppResult<&UserProfile> {
    let profile = self
      .profile
      .clone()
      .ok_or_else(|| AppError::Validation("Profile is not loaded.".to_string()))?;
    let user_id = profile.user_id.clone();
    let update = ProfileUpdate {
      profile,
      addressup: self.address.clone(),
    };

    match self.state.api.update_user(&user_id, &update).await {
      Ok(saved) => {
        info!(%user_id, "Profile saved.");
        self.editable = false;
        self.error = None;
        Ok(&*self.profile.insert(saved))
      }
      Err(e) => {
        self.error = Some(e.to_string());
        self.state.ui.alert("Error", &e.to_string());
        Err(e)
      }
    }
  }

  pub fn logout(&mut self) {
    self.state.session.logout();
    self.profile = None;
    self.address = Address::unset();
    self.editable = false;
    self.state.ui.navigate(Screen::SignIn);
  }
}
