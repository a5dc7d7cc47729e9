// client/src/services/backend.rs

//! The marketplace REST backend: catalog, cart, orders, deliveries, users.

use crate::errors::{AppError, Result as AppResult};
use crate::models::{
  Address, AddressEnvelope, CartLine, Complaint, Delivery, DeliveryConfirmation, DeliveryStatusUpdate, Item,
  NewCartLine, NewDelivery, NewReview, Order, OrderTaken, ProfileUpdate, QuantityUpdate, Review, SellerRecord,
  UserProfile,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Every backend call the client makes. View models and workflows only see this trait.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
  // --- Catalog ---
  async fn list_items(&self) -> AppResult<Vec<Item>>;
  async fn get_item(&self, item_id: &str) -> AppResult<Item>;
  async fn list_reviews(&self, item_id: &str) -> AppResult<Vec<Review>>;
  async fn post_review(&self, review: &NewReview) -> AppResult<()>;

  // --- Cart ---
  async fn get_cart(&self, user_id: &str) -> AppResult<Vec<CartLine>>;
  /// Fails with [`AppError::AlreadyInCart`] when the backend answers 409.
  async fn add_to_cart(&self, line: &NewCartLine) -> AppResult<()>;
  async fn update_cart_quantity(&self, user_id: &str, item_id: &str, quantity: u32) -> AppResult<()>;
  async fn remove_from_cart(&self, user_id: &str, item_id: &str) -> AppResult<()>;

  // --- Orders ---
  async fn buyer_orders(&self, buyer_id: &str) -> AppResult<Vec<Order>>;
  async fn list_orders(&self) -> AppResult<Vec<Order>>;
  async fn mark_order_taken(&self, order_id: &str) -> AppResult<()>;
  async fn submit_complaint(&self, complaint: &Complaint) -> AppResult<()>;

  // --- Deliveries ---
  async fn create_delivery(&self, delivery: &NewDelivery) -> AppResult<()>;
  async fn rider_deliveries(&self, rider_id: &str) -> AppResult<Vec<Delivery>>;
  async fn update_delivery_status(&self, delivery_id: &str, update: &DeliveryStatusUpdate) -> AppResult<()>;
  async fn delivery_for_order(&self, order_id: &str) -> AppResult<Option<Delivery>>;
  async fn confirm_delivery(&self, delivery_id: &str, confirmation: &DeliveryConfirmation) -> AppResult<()>;

  // --- Users ---
  async fn get_user(&self, user_id: &str) -> AppResult<UserProfile>;
  async fn create_user(&self, profile: &UserProfile) -> AppResult<()>;
  async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> AppResult<UserProfile>;
  async fn create_buyer(&self, profile: &UserProfile) -> AppResult<()>;
  async fn create_seller(&self, seller: &SellerRecord) -> AppResult<()>;
  async fn get_user_address(&self, user_id: &str) -> AppResult<Address>;
}

/// `MarketplaceApi` over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct RestBackend {
  client: Client,
  base_url: String,
}

impl RestBackend {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
    Ok(Self::with_client(client, base_url))
  }

  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    let base_url: String = base_url.into();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self.client.request(method, format!("{}{}", self.base_url, path))
  }

  async fn execute(&self, builder: RequestBuilder) -> AppResult<Response> {
    let response = builder.send().await?;
    check_status(response).await
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
    let response = self.execute(self.request(Method::GET, path)).await?;
    Ok(response.json::<T>().await?)
  }

  async fn send_json<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> AppResult<Response> {
    self.execute(self.request(method, path).json(body)).await
  }

  /// Some lookups return a one-element array instead of an object.
  async fn get_first<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
    let rows: Vec<T> = self.get_json(path).await?;
    Ok(rows.into_iter().next())
  }
}

async fn check_status(response: Response) -> AppResult<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let url = response.url().path().to_string();
  let body = response.text().await.unwrap_or_default();
  warn!(%status, %url, "Backend request failed.");
  let message = if body.trim().is_empty() {
    status.canonical_reason().unwrap_or("request failed").to_string()
  } else {
    body
  };
  Err(match status {
    StatusCode::NOT_FOUND => AppError::NotFound(message),
    _ => AppError::Http {
      status: status.as_u16(),
      message,
    },
  })
}

#[async_trait]
impl MarketplaceApi for RestBackend {
  #[instrument(name = "backend::list_items", skip(self), err(Display))]
  async fn list_items(&self) -> AppResult<Vec<Item>> {
    self.get_json("/items").await
  }

  #[instrument(name = "backend::get_item", skip(self), err(Display))]
  async fn get_item(&self, item_id: &str) -> AppResult<Item> {
    self
      .get_first(&format!("/items/{}", item_id))
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))
  }

  #[instrument(name = "backend::list_reviews", skip(self), err(Display))]
  async fn list_reviews(&self, item_id: &str) -> AppResult<Vec<Review>> {
    self.get_json(&format!("/reviews/{}", item_id)).await
  }

  #[instrument(name = "backend::post_review", skip(self, review), fields(item_id = %review.item_id), err(Display))]
  async fn post_review(&self, review: &NewReview) -> AppResult<()> {
    self.send_json(Method::POST, "/reviews", review).await?;
    Ok(())
  }

  #[instrument(name = "backend::get_cart", skip(self), err(Display))]
  async fn get_cart(&self, user_id: &str) -> AppResult<Vec<CartLine>> {
    self.get_json(&format!("/cartWithSellerName/{}", user_id)).await
  }

  #[instrument(name = "backend::add_to_cart", skip(self, line), fields(item_id = %line.item_id, quantity = line.quantity), err(Display))]
  async fn add_to_cart(&self, line: &NewCartLine) -> AppResult<()> {
    match self.send_json(Method::POST, "/cart", line).await {
      Ok(_) => Ok(()),
      Err(AppError::Http { status: 409, .. }) => {
        debug!("Item already in cart.");
        Err(AppError::AlreadyInCart)
      }
      Err(e) => Err(e),
    }
  }

  #[instrument(name = "backend::update_cart_quantity", skip(self), err(Display))]
  async fn update_cart_quantity(&self, user_id: &str, item_id: &str, quantity: u32) -> AppResult<()> {
    let path = format!("/cart/{}/{}", user_id, item_id);
    self.send_json(Method::PUT, &path, &QuantityUpdate { quantity }).await?;
    Ok(())
  }

  #[instrument(name = "backend::remove_from_cart", skip(self), err(Display))]
  async fn remove_from_cart(&self, user_id: &str, item_id: &str) -> AppResult<()> {
    let path = format!("/cart/{}/{}", user_id, item_id);
    self.execute(self.request(Method::DELETE, &path)).await?;
    Ok(())
  }

  #[instrument(name = "backend::buyer_orders", skip(self), err(Display))]
  async fn buyer_orders(&self, buyer_id: &str) -> AppResult<Vec<Order>> {
    self.get_json(&format!("/api/orders_for_buyers/{}", buyer_id)).await
  }

  #[instrument(name = "backend::list_orders", skip(self), err(Display))]
  async fn list_orders(&self) -> AppResult<Vec<Order>> {
    self.get_json("/orders").await
  }

  #[instrument(name = "backend::mark_order_taken", skip(self), err(Display))]
  async fn mark_order_taken(&self, order_id: &str) -> AppResult<()> {
    let path = format!("/orders/{}", order_id);
    self.send_json(Method::PUT, &path, &OrderTaken { deliver_took: true }).await?;
    Ok(())
  }

  #[instrument(name = "backend::submit_complaint", skip(self, complaint), fields(order_id = %complaint.order_id), err(Display))]
  async fn submit_complaint(&self, complaint: &Complaint) -> AppResult<()> {
    self.send_json(Method::POST, "/api/complaints", complaint).await?;
    Ok(())
  }

  #[instrument(name = "backend::create_delivery", skip(self, delivery), fields(order_id = %delivery.order_id), err(Display))]
  async fn create_delivery(&self, delivery: &NewDelivery) -> AppResult<()> {
    // The deliveries endpoint expects the record under a `deliveryData` key.
    self
      .send_json(Method::POST, "/deliveries", &json!({ "deliveryData": delivery }))
      .await?;
    Ok(())
  }

  #[instrument(name = "backend::rider_deliveries", skip(self), err(Display))]
  async fn rider_deliveries(&self, rider_id: &str) -> AppResult<Vec<Delivery>> {
    self.get_json(&format!("/deliveries/{}", rider_id)).await
  }

  #[instrument(name = "backend::update_delivery_status", skip(self, update), fields(status = %update.delivery_status), err(Display))]
  async fn update_delivery_status(&self, delivery_id: &str, update: &DeliveryStatusUpdate) -> AppResult<()> {
    let path = format!("/delivery-status/{}", delivery_id);
    self.send_json(Method::PUT, &path, update).await?;
    Ok(())
  }

  #[instrument(name = "backend::delivery_for_order", skip(self), err(Display))]
  async fn delivery_for_order(&self, order_id: &str) -> AppResult<Option<Delivery>> {
    self.get_first(&format!("/delivery-by-orderID/{}", order_id)).await
  }

  #[instrument(name = "backend::confirm_delivery", skip(self, confirmation), err(Display))]
  async fn confirm_delivery(&self, delivery_id: &str, confirmation: &DeliveryConfirmation) -> AppResult<()> {
    let path = format!("/delivery/{}", delivery_id);
    self.send_json(Method::PATCH, &path, confirmation).await?;
    Ok(())
  }

  #[instrument(name = "backend::get_user", skip(self), err(Display))]
  async fn get_user(&self, user_id: &str) -> AppResult<UserProfile> {
    self.get_json(&format!("/users/{}", user_id)).await
  }

  #[instrument(name = "backend::create_user", skip(self, profile), fields(user_id = %profile.user_id), err(Display))]
  async fn create_user(&self, profile: &UserProfile) -> AppResult<()> {
    self.send_json(Method::POST, "/users", profile).await?;
    Ok(())
  }

  #[instrument(name = "backend::update_user", skip(self, update), err(Display))]
  async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> AppResult<UserProfile> {
    let path = format!("/users/{}", user_id);
    let response = self.send_json(Method::PUT, &path, update).await?;
    Ok(response.json::<UserProfile>().await?)
  }

  #[instrument(name = "backend::create_buyer", skip(self, profile), fields(user_id = %profile.user_id), err(Display))]
  async fn create_buyer(&self, profile: &UserProfile) -> AppResult<()> {
    self.send_json(Method::POST, "/buyer", profile).await?;
    Ok(())
  }

  #[instrument(name = "backend::create_seller", skip(self, seller), fields(user_id = %seller.user_id), err(Display))]
  async fn create_seller(&self, seller: &SellerRecord) -> AppResult<()> {
    self.send_json(Method::POST, "/sellers", seller).await?;
    Ok(())
  }

  #[instrument(name = "backend::get_user_address", skip(self), err(Display))]
  async fn get_user_address(&self, user_id: &str) -> AppResult<Address> {
    let envelope: AddressEnvelope = self.get_json(&format!("/get_user_address/{}", user_id)).await?;
    Ok(envelope.user_address)
  }
}
