// tests/workflow_tests.rs
mod common;

use agromart::errors::{Alert, AppError, SIGN_IN_FAILED};
use agromart::models::UserType;
use agromart::services::IdentityProvider;
use agromart::ui::Screen;
use agromart::validation::{SellerFields, SignUpForm, INVALID_EMAIL, PASSWORDS_DIFFER};
use agromart::workflows::{signin, signup, take_order};
use common::*;
use serial_test::serial;

fn buyer_form() -> SignUpForm {
  SignUpForm {
    first_name: "Kamal".to_string(),
    last_name: "Silva".to_string(),
    email: "kamal@example.com".to_string(),
    phone: "0712345678".to_string(),
    password: "harvest2024".to_string(),
    confirm_password: "harvest2024".to_string(),
    seller: None,
  }
}

#[tokio::test]
#[serial]
async fn test_buyer_sign_up_creates_account_profile_and_buyer_record() {
  let h = harness();

  let profile = signup::run(&h.state, buyer_form(), UserType::Buyer).await.unwrap();

  assert_eq!(profile.user_type, UserType::Buyer);
  assert_eq!(profile.email, "kamal@example.com");
  let data = h.backend.data.lock();
  assert!(data.users.contains_key(&profile.user_id));
  assert_eq!(data.buyers, vec![profile.user_id.clone()]);
  assert!(data.sellers.is_empty());
  drop(data);

  assert_eq!(
    h.backend.calls(),
    vec!["create_user".to_string(), "create_buyer".to_string()]
  );
  assert_eq!(h.ui.alerts(), vec![Alert::new("Success", signup::CREATED)]);
  assert_eq!(h.ui.navigations(), vec![Screen::SignIn]);
  assert!(h.identity.sign_in("kamal@example.com", "harvest2024").await.is_ok());
}

#[tokio::test]
#[serial]
async fn test_seller_sign_up_creates_seller_record() {
  let h = harness();
  let mut form = buyer_form();
  form.seller = Some(SellerFields {
    nic: "200012345678".to_string(),
    store_name: "Green Farm".to_string(),
  });

  let profile = signup::run(&h.state, form, UserType::Seller).await.unwrap();

  let data = h.backend.data.lock();
  assert!(data.buyers.is_empty());
  assert_eq!(data.sellers.len(), 1);
  assert_eq!(data.sellers[0].user_id, profile.user_id);
  assert_eq!(data.sellers[0].store_name, "Green Farm");
}

#[tokio::test]
#[serial]
async fn test_sign_up_validation_stops_before_any_call() {
  let h = harness();
  let mut form = buyer_form();
  form.email = "not-an-email".to_string();

  let err = signup::run(&h.state, form, UserType::Buyer).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(ref m) if m == INVALID_EMAIL));
  assert!(h.backend.calls().is_empty());
  assert_eq!(h.ui.alerts(), vec![Alert::new("Sign up", INVALID_EMAIL)]);
  assert!(h.ui.navigations().is_empty());

  let mut form = buyer_form();
  form.confirm_password = "different1".to_string();
  let err = signup::run(&h.state, form, UserType::Buyer).await.unwrap_err();
  assert!(matches!(err, AppError::Validation(ref m) if m == PASSWORDS_DIFFER));
}

#[tokio::test]
#[serial]
async fn test_sign_up_backend_failure_shows_generic_error() {
  let h = harness();
  h.backend.fail("create_user");

  assert!(signup::run(&h.state, buyer_form(), UserType::Buyer).await.is_err());
  assert_eq!(h.ui.alerts(), vec![Alert::new("Error", signup::CREATE_FAILED)]);
  assert_eq!(h.backend.call_count("create_buyer"), 0);
}

#[tokio::test]
#[serial]
async fn test_sign_in_starts_session_and_opens_home_tabs() {
  let h = harness();
  h.identity.sign_up("kamal@example.com", "harvest2024").await.unwrap();
  let mut subscription = h.state.session.subscribe();

  let user = signin::run(&h.state, "kamal@example.com", "harvest2024").await.unwrap();

  assert_eq!(h.state.session.user_id(), Some(user.uid.clone()));
  assert_eq!(subscription.poll_change().unwrap().user_id(), Some(user.uid.as_str()));
  assert_eq!(h.ui.navigations(), vec![Screen::HomeTabs]);
}

#[tokio::test]
#[serial]
async fn test_sign_in_failures_share_one_alert() {
  let h = harness();
  h.identity.sign_up("kamal@example.com", "harvest2024").await.unwrap();

  for (email, password) in [
    ("kamal@example.com", "wrongpass1"),
    ("nobody@example.com", "harvest2024"),
    ("", ""),
  ] {
    let err = signin::run(&h.state, email, password).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));
  }
  assert_eq!(h.ui.alerts(), vec![Alert::new("Error", SIGN_IN_FAILED); 3]);
  assert!(h.state.session.user_id().is_none());
}

#[tokio::test]
#[serial]
async fn test_take_order_creates_delivery_marks_order_and_notifies() {
  let h = signed_in("rider-1").await;
  h.backend.data.lock().orders.push(order("41", "buyer-1", "7", true));

  let notified = take_order::run(&h.state, "41", "rider-1").await.unwrap();

  assert!(notified);
  let data = h.backend.data.lock();
  assert_eq!(data.deliveries.len(), 1);
  assert_eq!(data.deliveries[0].delivery_rider_id.as_deref(), Some("rider-1"));
  assert!(!data.deliveries[0].is_delivered_to_buyer);
  assert!(data.orders[0].deliver_took);
  drop(data);

  let shown = h.notifier.shown();
  assert_eq!(shown[0].title, take_order::TAKEN_TITLE);
  assert_eq!(shown[0].body, "41 has been successfully taken by you.");
}

#[tokio::test]
#[serial]
async fn test_take_order_stops_when_delivery_creation_fails() {
  let h = signed_in("rider-1").await;
  h.backend.data.lock().orders.push(order("41", "buyer-1", "7", true));
  h.backend.fail("create_delivery");

  assert!(take_order::run(&h.state, "41", "rider-1").await.is_err());
  assert_eq!(h.backend.call_count("mark_order_taken"), 0);
  assert!(!h.backend.data.lock().orders[0].deliver_took);
  assert!(h.notifier.shown().is_empty());
}
