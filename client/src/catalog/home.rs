// client/src/catalog/home.rs

use crate::errors::Result as AppResult;
use crate::models::Item;
use crate::state::AppState;
use crate::ui::Screen;
use tracing::{debug, instrument, warn};

/// Client-side filters over the item listing. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
  pub search: String,
  pub category: Option<String>,
  pub min_rating: Option<f64>,
}

impl CatalogFilter {
  pub fn matches(&self, item: &Item) -> bool {
    let search = self.search.trim().to_lowercase();
    if !search.is_empty() && !item.item_name.to_lowercase().contains(&search) {
      return false;
    }
    if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
      if item.category.as_deref() != Some(category) {
        return false;
      }
    }
    match self.min_rating {
      Some(min) => item.average_rating_value >= min,
      None => true,
    }
  }

  pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
    items.iter().filter(|item| self.matches(item)).collect()
  }
}

/// The catalog tab: every item, the active filter and the cart badge.
pub struct HomeViewModel {
  state: AppState,
  items: Vec<Item>,
  pub filter: CatalogFilter,
  cart_count: usize,
  error: Option<String>,
}

impl HomeViewModel {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      items: Vec::new(),
      filter: CatalogFilter::default(),
      cart_count: 0,
      error: None,
    }
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  /// Items passing the current filter.
  pub fn visible_items(&self) -> Vec<&Item> {
    self.filter.apply(&self.items)
  }

  /// Distinct categories, in listing order.
  pub fn categories(&self) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for category in self.items.iter().filter_map(|i| i.category.as_deref()) {
      if !seen.contains(&category) {
        seen.push(category);
      }
    }
    seen
  }

  pub fn cart_count(&self) -> usize {
    self.cart_count
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  #[instrument(name = "home::load", skip(self), err(Display))]
  pub async fn load(&mut self) -> AppResult<()> {
    match self.state.api.list_items().await {
      Ok(items) => {
        self.items = items;
        self.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Item listing failed.");
        self.error = Some(e.to_string());
        return Err(e);
      }
    }
    self.refresh_cart_count().await;
    Ok(())
  }

  /// Badge count; zero when signed out or when the cart cannot be read.
  pub async fn refresh_cart_count(&mut self) -> usize {
    self.cart_count = match self.state.session.user_id() {
      Some(user_id) => self.state.api.get_cart(&user_id).await.map(|lines| lines.len()).unwrap_or_else(|e| {
        debug!(error = %e, "Cart count unavailable.");
        0
      }),
      None => 0,
    };
    self.cart_count
  }

  pub fn open_item(&self, item: &Item) {
    if item.item_id.is_empty() {
      self.state.ui.alert("Error", "Item ID is missing.");
      return;
    }
    self.state.ui.navigate(Screen::ItemView {
      item_id: item.item_id.clone(),
    });
  }

  /// The cart button: the cart when signed in, sign-in otherwise.
  pub fn open_cart(&self) {
    let screen = if self.state.session.user_id().is_some() {
      Screen::Cart
    } else {
      Screen::SignIn
    };
    self.state.ui.navigate(screen);
  }

  pub fn logout(&mut self) {
    self.state.session.logout();
    self.cart_count = 0;
    self.state.ui.navigate(Screen::Home);
  }
}
