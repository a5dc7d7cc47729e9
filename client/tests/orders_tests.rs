// tests/orders_tests.rs
mod common;

use agromart::errors::AppError;
use agromart::models::{Delivery, UserType};
use agromart::orders::complaint::{DESCRIPTION_REQUIRED, LOGIN_REQUIRED, SUBMITTED};
use agromart::orders::tracking::CONFIRMED;
use agromart::orders::{BuyerOrdersViewModel, ComplaintForm, TrackingViewModel};
use agromart::ui::Screen;
use common::*;
use serial_test::serial;

fn delivery(delivery_id: &str, order_id: &str, rider_id: Option<&str>) -> Delivery {
  Delivery {
    delivery_id: delivery_id.to_string(),
    order_id: order_id.to_string(),
    delivery_rider_id: rider_id.map(str::to_string),
    delivery_status: Some("Delivery Processed".to_string()),
    delivered_to_sc: rider_id.map(|_| "2024-05-01".to_string()),
    delivered_to_dc: None,
    is_delivered_to_buyer: false,
    confirmation_date: None,
  }
}

#[tokio::test]
#[serial]
async fn test_buyer_orders_filter_sort_and_attach_images() {
  let h = signed_in("buyer-1").await;
  {
    let mut data = h.backend.data.lock();
    data.items.push(item("7", "Carrots", 120));
    data.orders.push(order("1002", "buyer-1", "7", true));
    data.orders.push(order("1010", "buyer-1", "missing", true));
    data.orders.push(order("1005", "buyer-1", "7", false));
    data.orders.push(order("1001", "buyer-2", "7", true));
  }
  let mut vm = BuyerOrdersViewModel::new(h.state.clone());

  let orders = vm.load().await.unwrap();
  let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
  assert_eq!(ids, vec!["1010", "1002"]);
  assert!(orders[0].item_image.is_none());
  assert_eq!(orders[1].item_image.as_deref(), Some("https://img.example.com/7.png"));
}

#[tokio::test]
#[serial]
async fn test_buyer_orders_navigation() {
  let h = signed_in("buyer-1").await;
  h.backend.data.lock().orders.push(order("1002", "buyer-1", "7", true));
  let mut vm = BuyerOrdersViewModel::new(h.state.clone());
  vm.load().await.unwrap();

  vm.open_tracking("1002");
  assert!(vm.open_complaint(0));
  assert!(!vm.open_complaint(5));
  assert_eq!(
    h.ui.navigations(),
    vec![
      Screen::Tracking {
        order_id: "1002".to_string()
      },
      Screen::Complaint {
        order_id: "1002".to_string(),
        seller_id: Some("seller-1".to_string())
      },
    ]
  );
}

#[tokio::test]
#[serial]
async fn test_buyer_orders_failure_alerts() {
  let h = signed_in("buyer-1").await;
  h.backend.fail("buyer_orders");
  let mut vm = BuyerOrdersViewModel::new(h.state.clone());

  assert!(vm.load().await.is_err());
  assert!(vm.orders().is_empty());
  assert!(vm.error().is_some());
  assert_eq!(h.ui.alerts().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_tracking_loads_rider_and_renders_steps() {
  let h = signed_in("buyer-1").await;
  {
    let mut data = h.backend.data.lock();
    data.deliveries.push(delivery("d1", "1002", Some("rider-1")));
    data.users.insert("rider-1".to_string(), profile("rider-1", UserType::DeliveryRider));
  }
  let mut vm = TrackingViewModel::new(h.state.clone(), "1002");
  assert!(vm.steps().is_empty());

  vm.load().await.unwrap();
  let steps = vm.steps();
  assert_eq!(steps.len(), 3);
  assert!(steps[0].complete);
  assert!(steps[1].complete);
  assert!(steps[1].description.starts_with("Assigned to: Nimal Perera"));
  assert!(!steps[2].complete);
  assert!(vm.can_confirm());
}

#[tokio::test]
#[serial]
async fn test_tracking_without_delivery_is_not_found() {
  let h = signed_in("buyer-1").await;
  let mut vm = TrackingViewModel::new(h.state.clone(), "404");
  assert!(matches!(vm.load().await, Err(AppError::NotFound(_))));
  assert!(!vm.can_confirm());
}

#[tokio::test]
#[serial]
async fn test_confirm_delivery_patches_once() {
  let h = signed_in("buyer-1").await;
  h.backend.data.lock().deliveries.push(delivery("d1", "1002", None));
  let mut vm = TrackingViewModel::new(h.state.clone(), "1002");
  vm.load().await.unwrap();

  vm.confirm_delivery().await.unwrap();
  assert!(!vm.can_confirm());
  assert!(vm.steps()[2].complete);
  assert!(matches!(vm.confirm_delivery().await, Err(AppError::Validation(_))));

  let data = h.backend.data.lock();
  assert_eq!(data.confirmations.len(), 1);
  let (delivery_id, confirmation) = &data.confirmations[0];
  assert_eq!(delivery_id, "d1");
  assert!(confirmation.is_delivered_to_buyer);
  // YYYY-MM-DD HH:MM
  assert_eq!(confirmation.confirmation_date.len(), 16);
  assert_eq!(&confirmation.confirmation_date[4..5], "-");
  assert_eq!(&confirmation.confirmation_date[10..11], " ");
  drop(data);
  assert_eq!(h.ui.alerts()[0].message, CONFIRMED);
}

#[tokio::test]
#[serial]
async fn test_complaint_requires_description_and_session() {
  let h = harness();
  let mut form = ComplaintForm::new(h.state.clone(), "1002", Some("seller-1".to_string()));

  assert!(form.submit().await.is_err());
  assert_eq!(form.error(), Some(DESCRIPTION_REQUIRED));

  form.description = "Carrots arrived damaged".to_string();
  assert!(form.submit().await.is_err());
  assert_eq!(form.error(), Some(LOGIN_REQUIRED));
  assert_eq!(h.backend.call_count("submit_complaint"), 0);
}

#[tokio::test]
#[serial]
async fn test_complaint_submission_posts_and_returns_to_orders() {
  let h = signed_in("buyer-1").await;
  let mut form = ComplaintForm::new(h.state.clone(), "1002", Some("seller-1".to_string()));
  form.description = "Carrots arrived damaged".to_string();
  form.complain_seller = true;

  form.submit().await.unwrap();

  let complaints = h.backend.data.lock().complaints.clone();
  assert_eq!(complaints.len(), 1);
  assert_eq!(complaints[0].buyer_id, "buyer-1");
  assert_eq!(complaints[0].complaint_status_seller, "reviewing");
  assert!(complaints[0].complaint_seller);
  assert_eq!(h.ui.alerts()[0].message, SUBMITTED);
  assert_eq!(h.ui.navigations(), vec![Screen::Orders]);
}
