// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different slice of these helpers

use agromart::errors::{AppError, Result as AppResult};
use agromart::models::{
  Address, CartLine, Complaint, Delivery, DeliveryConfirmation, DeliveryStatusUpdate, Item, NewCartLine,
  NewDelivery, NewReview, Order, Price, ProfileUpdate, Review, SellerRecord, UserProfile, UserType,
};
use agromart::services::{InProcessNotifier, LocalIdentityProvider, MarketplaceApi, Notifier};
use agromart::ui::RecordingUi;
use agromart::AppState;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::Level;

// --- Tracing ---

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

// --- In-memory backend ---

/// Backend rows, open to tests for setup and assertions.
#[derive(Debug, Default)]
pub struct BackendData {
  pub items: Vec<Item>,
  pub reviews: Vec<Review>,
  pub carts: HashMap<String, Vec<CartLine>>,
  pub orders: Vec<Order>,
  pub deliveries: Vec<Delivery>,
  pub users: HashMap<String, UserProfile>,
  pub addresses: HashMap<String, Address>,
  pub buyers: Vec<String>,
  pub sellers: Vec<SellerRecord>,
  pub complaints: Vec<Complaint>,
  pub confirmations: Vec<(String, DeliveryConfirmation)>,
  pub status_updates: Vec<(String, DeliveryStatusUpdate)>,
}

/// `MarketplaceApi` over `BackendData`. Operations named in `failing` answer
/// HTTP 500; `list_orders` answers 404 when `orders_missing` is set.
/// Cart writes yield once before answering so concurrent edits interleave.
#[derive(Default)]
pub struct FakeBackend {
  pub data: Mutex<BackendData>,
  failing: Mutex<HashSet<&'static str>>,
  rejected_quantities: Mutex<HashSet<u32>>,
  orders_missing: Mutex<bool>,
  calls: Mutex<Vec<String>>,
}

impl FakeBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail(&self, operation: &'static str) {
    self.failing.lock().insert(operation);
  }

  pub fn recover(&self, operation: &'static str) {
    self.failing.lock().remove(operation);
  }

  /// Makes `update_cart_quantity` answer HTTP 500 for this quantity only.
  pub fn reject_quantity(&self, quantity: u32) {
    self.rejected_quantities.lock().insert(quantity);
  }

  pub fn set_orders_missing(&self, missing: bool) {
    *self.orders_missing.lock() = missing;
  }

  /// Names of the operations called so far, in order.
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self, operation: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.as_str() == operation).count()
  }

  fn enter(&self, operation: &'static str) -> AppResult<()> {
    self.calls.lock().push(operation.to_string());
    if self.failing.lock().contains(operation) {
      return Err(AppError::Http {
        status: 500,
        message: format!("{} failed", operation),
      });
    }
    Ok(())
  }
}

#[async_trait]
impl MarketplaceApi for FakeBackend {
  async fn list_items(&self) -> AppResult<Vec<Item>> {
    self.enter("list_items")?;
    Ok(self.data.lock().items.clone())
  }

  async fn get_item(&self, item_id: &str) -> AppResult<Item> {
    self.enter("get_item")?;
    self
      .data
      .lock()
      .items
      .iter()
      .find(|i| i.item_id == item_id)
      .cloned()
      .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))
  }

  async fn list_reviews(&self, item_id: &str) -> AppResult<Vec<Review>> {
    self.enter("list_reviews")?;
    Ok(self.data.lock().reviews.iter().filter(|r| r.item_id == item_id).cloned().collect())
  }

  async fn post_review(&self, review: &NewReview) -> AppResult<()> {
    self.enter("post_review")?;
    self.data.lock().reviews.push(Review {
      item_id: review.item_id.clone(),
      buyer_id: Some(review.buyer_id.clone()),
      rating: review.rating,
      description: review.description.clone(),
      first_name: None,
      last_name: None,
    });
    Ok(())
  }

  async fn get_cart(&self, user_id: &str) -> AppResult<Vec<CartLine>> {
    self.enter("get_cart")?;
    Ok(self.data.lock().carts.get(user_id).cloned().unwrap_or_default())
  }

  async fn add_to_cart(&self, line: &NewCartLine) -> AppResult<()> {
    self.enter("add_to_cart")?;
    let mut data = self.data.lock();
    let item_name = data
      .items
      .iter()
      .find(|i| i.item_id == line.item_id)
      .map(|i| i.item_name.clone())
      .unwrap_or_default();
    let cart = data.carts.entry(line.buyer_id.clone()).or_default();
    if cart.iter().any(|l| l.item_id == line.item_id) {
      return Err(AppError::AlreadyInCart);
    }
    cart.push(CartLine {
      item_id: line.item_id.clone(),
      seller_name: "Green Farm".to_string(),
      item_name,
      unit_price: line.price,
      quantity: line.quantity,
    });
    Ok(())
  }

  async fn update_cart_quantity(&self, user_id: &str, item_id: &str, quantity: u32) -> AppResult<()> {
    tokio::task::yield_now().await;
    self.enter("update_cart_quantity")?;
    if self.rejected_quantities.lock().contains(&quantity) {
      return Err(AppError::Http {
        status: 500,
        message: format!("quantity {} rejected", quantity),
      });
    }
    let mut data = self.data.lock();
    let line = data
      .carts
      .get_mut(user_id)
      .and_then(|cart| cart.iter_mut().find(|l| l.item_id == item_id))
      .ok_or_else(|| AppError::NotFound(format!("Cart row {} not found", item_id)))?;
    line.quantity = quantity;
    Ok(())
  }

  async fn remove_from_cart(&self, user_id: &str, item_id: &str) -> AppResult<()> {
    tokio::task::yield_now().await;
    self.enter("remove_from_cart")?;
    if let Some(cart) = self.data.lock().carts.get_mut(user_id) {
      cart.retain(|l| l.item_id != item_id);
    }
    Ok(())
  }

  async fn buyer_orders(&self, buyer_id: &str) -> AppResult<Vec<Order>> {
    self.enter("buyer_orders")?;
    Ok(
      self
        .data
        .lock()
        .orders
        .iter()
        .filter(|o| o.buyer_id.as_deref() == Some(buyer_id))
        .cloned()
        .collect(),
    )
  }

  async fn list_orders(&self) -> AppResult<Vec<Order>> {
    self.enter("list_orders")?;
    if *self.orders_missing.lock() {
      return Err(AppError::NotFound("no orders".to_string()));
    }
    Ok(self.data.lock().orders.clone())
  }

  async fn mark_order_taken(&self, order_id: &str) -> AppResult<()> {
    self.enter("mark_order_taken")?;
    let mut data = self.data.lock();
    let order = data
      .orders
      .iter_mut()
      .find(|o| o.order_id == order_id)
      .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;
    order.deliver_took = true;
    Ok(())
  }

  async fn submit_complaint(&self, complaint: &Complaint) -> AppResult<()> {
    self.enter("submit_complaint")?;
    self.data.lock().complaints.push(complaint.clone());
    Ok(())
  }

  async fn create_delivery(&self, delivery: &NewDelivery) -> AppResult<()> {
    self.enter("create_delivery")?;
    let mut data = self.data.lock();
    let delivery_id = format!("d{}", data.deliveries.len() + 1);
    data.deliveries.push(Delivery {
      delivery_id,
      order_id: delivery.order_id.clone(),
      delivery_rider_id: Some(delivery.delivery_rider_id.clone()),
      delivery_status: None,
      delivered_to_sc: None,
      delivered_to_dc: None,
      is_delivered_to_buyer: delivery.is_delivered_to_buyer,
      confirmation_date: None,
    });
    Ok(())
  }

  async fn rider_deliveries(&self, rider_id: &str) -> AppResult<Vec<Delivery>> {
    self.enter("rider_deliveries")?;
    Ok(
      self
        .data
        .lock()
        .deliveries
        .iter()
        .filter(|d| d.delivery_rider_id.as_deref() == Some(rider_id))
        .cloned()
        .collect(),
    )
  }

  async fn update_delivery_status(&self, delivery_id: &str, update: &DeliveryStatusUpdate) -> AppResult<()> {
    self.enter("update_delivery_status")?;
    let mut data = self.data.lock();
    if let Some(delivery) = data.deliveries.iter_mut().find(|d| d.delivery_id == delivery_id) {
      delivery.delivery_status = Some(update.delivery_status.clone());
      delivery.is_delivered_to_buyer = update.is_delivered_to_buyer;
    }
    data.status_updates.push((delivery_id.to_string(), update.clone()));
    Ok(())
  }

  async fn delivery_for_order(&self, order_id: &str) -> AppResult<Option<Delivery>> {
    self.enter("delivery_for_order")?;
    Ok(self.data.lock().deliveries.iter().find(|d| d.order_id == order_id).cloned())
  }

  async fn confirm_delivery(&self, delivery_id: &str, confirmation: &DeliveryConfirmation) -> AppResult<()> {
    self.enter("confirm_delivery")?;
    let mut data = self.data.lock();
    if let Some(delivery) = data.deliveries.iter_mut().find(|d| d.delivery_id == delivery_id) {
      delivery.is_delivered_to_buyer = confirmation.is_delivered_to_buyer;
      delivery.confirmation_date = Some(confirmation.confirmation_date.clone());
    }
    data.confirmations.push((delivery_id.to_string(), confirmation.clone()));
    Ok(())
  }

  async fn get_user(&self, user_id: &str) -> AppResult<UserProfile> {
    self.enter("get_user")?;
    self
      .data
      .lock()
      .users
      .get(user_id)
      .cloned()
      .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
  }

  async fn create_user(&self, profile: &UserProfile) -> AppResult<()> {
    self.enter("create_user")?;
    self.data.lock().users.insert(profile.user_id.clone(), profile.clone());
    Ok(())
  }

  async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> AppResult<UserProfile> {
    self.enter("update_user")?;
    let mut data = self.data.lock();
    let mut saved = update.profile.clone();
    saved.address_id = Some(format!("addr-{}", user_id));
    data.users.insert(user_id.to_string(), saved.clone());
    data.addresses.insert(user_id.to_string(), update.addressup.clone());
    Ok(saved)
  }

  async fn create_buyer(&self, profile: &UserProfile) -> AppResult<()> {
    self.enter("create_buyer")?;
    self.data.lock().buyers.push(profile.user_id.clone());
    Ok(())
  }

  async fn create_seller(&self, seller: &SellerRecord) -> AppResult<()> {
    self.enter("create_seller")?;
    self.data.lock().sellers.push(seller.clone());
    Ok(())
  }

  async fn get_user_address(&self, user_id: &str) -> AppResult<Address> {
    self.enter("get_user_address")?;
    self
      .data
      .lock()
      .addresses
      .get(user_id)
      .cloned()
      .ok_or_else(|| AppError::NotFound(format!("No address for {}", user_id)))
  }
}

// --- Harness ---

pub struct Harness {
  pub state: AppState,
  pub backend: Arc<FakeBackend>,
  pub identity: Arc<LocalIdentityProvider>,
  pub notifier: Arc<InProcessNotifier>,
  pub ui: RecordingUi,
}

pub fn harness() -> Harness {
  setup_tracing();
  let backend = Arc::new(FakeBackend::new());
  let identity = Arc::new(LocalIdentityProvider::new());
  let notifier = Arc::new(InProcessNotifier::new(true));
  let ui = RecordingUi::new();
  let state = AppState::new(backend.clone(), identity.clone(), notifier.clone(), Arc::new(ui.clone()));
  Harness {
    state,
    backend,
    identity,
    notifier,
    ui,
  }
}

/// A harness with `user_id` signed in and a device token registered.
pub async fn signed_in(user_id: &str) -> Harness {
  let h = harness();
  h.state.session.sign_in(user_id, format!("{}@example.com", user_id));
  h.notifier.register_device("device-token".to_string()).await;
  h
}

// --- Fixtures ---

pub fn cart_line(item_id: &str, units: i64, quantity: u32) -> CartLine {
  CartLine {
    item_id: item_id.to_string(),
    seller_name: "Green Farm".to_string(),
    item_name: format!("Item {}", item_id),
    unit_price: Price::from_units(units),
    quantity,
  }
}

pub fn item(item_id: &str, name: &str, units: i64) -> Item {
  Item {
    item_id: item_id.to_string(),
    item_name: name.to_string(),
    category: Some("Vegetables".to_string()),
    unit_price: Price::from_units(units),
    unit_type: Some("kg".to_string()),
    image_url: Some(format!("https://img.example.com/{}.png", item_id)),
    description: None,
    average_rating_value: 4.0,
    seller_id: Some("seller-1".to_string()),
  }
}

pub fn order(order_id: &str, buyer_id: &str, item_id: &str, sent_to_delivery: bool) -> Order {
  Order {
    order_id: order_id.to_string(),
    buyer_id: Some(buyer_id.to_string()),
    seller_id: Some("seller-1".to_string()),
    item_id: item_id.to_string(),
    quantity: 1,
    order_date: None,
    sent_to_delivery,
    deliver_took: false,
    buyer_address: None,
    seller_address: None,
    item_image: None,
  }
}

pub fn profile(user_id: &str, user_type: UserType) -> UserProfile {
  UserProfile {
    user_id: user_id.to_string(),
    first_name: "Nimal".to_string(),
    last_name: "Perera".to_string(),
    mobile_number: "0712345678".to_string(),
    email: format!("{}@example.com", user_id),
    address_id: None,
    user_type,
    image_url: None,
  }
}
