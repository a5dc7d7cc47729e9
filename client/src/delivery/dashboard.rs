// client/src/delivery/dashboard.rs

use crate::errors::Result as AppResult;
use crate::models::UserProfile;
use crate::state::AppState;
use crate::ui::Screen;
use tracing::instrument;

/// Sections behind the rider dashboard's picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderTab {
  Orders,
  Deliveries,
  Profile,
}

impl RiderTab {
  pub const ALL: [RiderTab; 3] = [RiderTab::Orders, RiderTab::Deliveries, RiderTab::Profile];

  pub fn label(self) -> &'static str {
    match self {
      RiderTab::Orders => "View Orders",
      RiderTab::Deliveries => "View Deliveries",
      RiderTab::Profile => "Profile",
    }
  }

  fn screen(self) -> Screen {
    match self {
      RiderTab::Orders => Screen::RiderOrders,
      RiderTab::Deliveries => Screen::Deliveries,
      RiderTab::Profile => Screen::Profile,
    }
  }
}

pub struct RiderDashboard {
  state: AppState,
  rider: Option<UserProfile>,
  selected: RiderTab,
}

impl RiderDashboard {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      rider: None,
      selected: RiderTab::Orders,
    }
  }

  pub fn rider(&self) -> Option<&UserProfile> {
    self.rider.as_ref()
  }

  pub fn selected(&self) -> RiderTab {
    self.selected
  }

  #[instrument(name = "rider_dashboard::load", skip(self), err(Display))]
  pub async fn load(&mut self) -> AppResult<&UserProfile> {
    let rider_id = self.state.require_user()?;
    let profile = self.state.api.get_user(&rider_id).await.inspect_err(|e| {
      self.state.ui.alert("Error", &e.to_string());
    })?;
    Ok(&*self.rider.insert(profile))
  }

  pub fn select(&mut self, tab: RiderTab) {
    self.selected = tab;
    self.state.ui.navigate(tab.screen());
  }
}
