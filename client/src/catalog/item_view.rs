// client/src/catalog/item_view.rs

use crate::cart::view_model::{MAX_QUANTITY, MIN_QUANTITY};
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, NewReview, Price, Review};
use crate::state::AppState;
use crate::ui::Screen;
use crate::workflows::add_to_cart::{self, AddToCartOutcome};
use tracing::{info, instrument, warn};

pub const REVIEW_INCOMPLETE: &str = "Please provide a review and rating";
pub const REVIEW_SUBMITTED: &str = "Review submitted successfully";
pub const REVIEW_AUTHOR_SELF: &str = "You";

pub struct ItemViewModel {
  state: AppState,
  item_id: String,
  item: Option<Item>,
  reviews: Vec<Review>,
  quantity: u32,
}

impl ItemViewModel {
  pub fn new(state: AppState, item_id: impl Into<String>) -> Self {
    Self {
      state,
      item_id: item_id.into(),
      item: None,
      reviews: Vec::new(),
      quantity: MIN_QUANTITY,
    }
  }

  pub fn item(&self) -> Option<&Item> {
    self.item.as_ref()
  }

  pub fn reviews(&self) -> &[Review] {
    &self.reviews
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  /// Clamped to the cart's quantity range.
  pub fn set_quantity(&mut self, quantity: u32) {
    self.quantity = quantity.clamp(MIN_QUANTITY, MAX_QUANTITY);
  }

  /// Price shown under the stepper.
  pub fn line_total(&self) -> Price {
    self
      .item
      .as_ref()
      .map(|i| i.unit_price * self.quantity)
      .unwrap_or(Price::ZERO)
  }

  /// Loads the item and its reviews. Missing reviews leave the list empty.
  #[instrument(name = "item_view::load", skip(self), fields(item_id = %self.item_id), err(Display))]
  pub async fn load(&mut self) -> AppResult<()> {
    let item = self.state.api.get_item(&self.item_id).await?;
    self.reviews = match self.state.api.list_reviews(&self.item_id).await {
      Ok(reviews) => reviews,
      Err(e) => {
        warn!(error = %e, "Reviews unavailable.");
        Vec::new()
      }
    };
    self.item = Some(item);
    Ok(())
  }

  #[instrument(name = "item_view::submit_review", skip(self, comment), fields(item_id = %self.item_id), err(Display))]
  pub async fn submit_review(&mut self, rating: u8, comment: &str) -> AppResult<()> {
    let comment = comment.trim();
    if comment.is_empty() || !(1..=5).contains(&rating) {
      self.state.ui.alert("Review", REVIEW_INCOMPLETE);
      return Err(AppError::Validation(REVIEW_INCOMPLETE.to_string()));
    }
    let buyer_id = self.state.require_user()?;

    let review = NewReview {
      item_id: self.item_id.clone(),
      description: comment.to_string(),
      rating,
      buyer_id: buyer_id.clone(),
    };
    self.state.api.post_review(&review).await.inspect_err(|e| {
      warn!(error = %e, "Review submission failed.");
      self.state.ui.show(e.alert());
    })?;

    self.reviews.push(Review {
      item_id: review.item_id,
      buyer_id: Some(buyer_id),
      rating,
      description: review.description,
      first_name: Some(REVIEW_AUTHOR_SELF.to_string()),
      last_name: None,
    });
    info!("Review submitted.");
    self.state.ui.alert("Review", REVIEW_SUBMITTED);
    Ok(())
  }

  /// Adds the shown quantity to the cart and opens the cart on success.
  pub async fn add_to_cart(&self) -> AppResult<AddToCartOutcome> {
    let item = self
      .item
      .as_ref()
      .ok_or_else(|| AppError::NotFound(format!("Item {} is not loaded.", self.item_id)))?;
    let outcome = add_to_cart::run(&self.state, item, self.quantity).await?;
    if outcome == AddToCartOutcome::Added {
      self.state.ui.navigate(Screen::Cart);
    }
    Ok(outcome)
  }
}
