// client/src/workflows/take_order.rs

//! A rider takes an available order: a delivery record is created, the order
//! is marked as taken and the rider gets a local notification.

use crate::errors::{AppError, Result as AppResult};
use crate::models::NewDelivery;
use crate::state::AppState;
use crate::workflows::contexts::TakeOrderCtxData;
use agromart_flow::{ContextData, FlowControl, FlowRegistry, Workflow};
use tracing::{info, instrument};

pub const TAKEN_TITLE: &str = "Order successfully taken";

pub fn register(registry: &FlowRegistry<AppError>) {
  let mut p = Workflow::<TakeOrderCtxData, AppError>::new(&[
    ("create_delivery", false, None),
    ("mark_order_taken", false, None),
    ("notify_rider", true, None),
  ]);

  p.on("create_delivery", |ctx_data: ContextData<TakeOrderCtxData>| async move {
    let (api, delivery) = {
      let guard = ctx_data.read();
      (
        guard.state.api.clone(),
        NewDelivery {
          order_id: guard.order_id.clone(),
          delivery_rider_id: guard.rider_id.clone(),
          is_delivered_to_buyer: false,
        },
      )
    };
    api.create_delivery(&delivery).await?;
    ctx_data.write().delivery_created = true;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("mark_order_taken", |ctx_data: ContextData<TakeOrderCtxData>| async move {
    let (api, order_id) = {
      let guard = ctx_data.read();
      (guard.state.api.clone(), guard.order_id.clone())
    };
    api.mark_order_taken(&order_id).await?;
    ctx_data.write().order_marked = true;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("notify_rider", |ctx_data: ContextData<TakeOrderCtxData>| async move {
    let (notifier, order_id) = {
      let guard = ctx_data.read();
      (guard.state.notifier.clone(), guard.order_id.clone())
    };
    let body = format!("{} has been successfully taken by you.", order_id);
    let shown = notifier.notify_now(TAKEN_TITLE, &body).await;
    ctx_data.write().notified = shown;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  registry.register(p);
}

/// Runs the take-order steps. Returns whether the rider was notified.
#[instrument(name = "workflow::take_order", skip(state), err(Display))]
pub async fn run(state: &AppState, order_id: &str, rider_id: &str) -> AppResult<bool> {
  let ctx = ContextData::new(TakeOrderCtxData {
    state: state.clone(),
    order_id: order_id.to_string(),
    rider_id: rider_id.to_string(),
    delivery_created: false,
    order_marked: false,
    notified: false,
  });
  state.flows.run(ctx.clone()).await?;
  let notified = ctx.read().notified;
  info!(%order_id, notified, "Order taken.");
  Ok(notified)
}
