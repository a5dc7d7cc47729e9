// client/src/workflows/add_to_cart.rs

use crate::cart::view_model::{MAX_QUANTITY, MIN_QUANTITY};
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, NewCartLine};
use crate::state::AppState;
use crate::ui::Screen;
use crate::workflows::contexts::AddToCartCtxData;
use agromart_flow::{ContextData, FlowControl, FlowRegistry, Workflow};
use tracing::{event, info, instrument, Level};

pub use crate::workflows::contexts::AddToCartOutcome;

pub const ADDED: &str = "Item successfully added to the cart";
pub const LOGIN_REQUIRED: &str = "Please log in to add items to the cart.";

pub fn register(registry: &FlowRegistry<AppError>) {
  let mut p = Workflow::<AddToCartCtxData, AppError>::new(&[
    ("require_session", false, None),
    ("validate_quantity", false, None),
    ("post_cart_line", false, None),
  ]);

  p.on("require_session", |ctx_data: ContextData<AddToCartCtxData>| async move {
    let buyer_id = ctx_data.read().state.session.user_id();
    match buyer_id {
      Some(id) => {
        ctx_data.write().buyer_id = Some(id);
        Ok::<_, AppError>(FlowControl::Continue)
      }
      None => {
        event!(Level::INFO, "Add to cart attempted while signed out.");
        ctx_data.write().outcome = Some(AddToCartOutcome::SignInRequired);
        Ok(FlowControl::Stop)
      }
    }
  });

  p.on("validate_quantity", |ctx_data: ContextData<AddToCartCtxData>| async move {
    let quantity = ctx_data.read().quantity;
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
      return Err(AppError::Validation(format!(
        "Quantity must be between {} and {}.",
        MIN_QUANTITY, MAX_QUANTITY
      )));
    }
    Ok(FlowControl::Continue)
  });

  p.on("post_cart_line", |ctx_data: ContextData<AddToCartCtxData>| async move {
    let (api, line) = {
      let guard = ctx_data.read();
      let line = NewCartLine {
        buyer_id: guard.buyer_id.clone().unwrap_or_default(),
        item_id: guard.item_id.clone(),
        quantity: guard.quantity,
        price: guard.unit_price,
      };
      (guard.state.api.clone(), line)
    };

    let outcome = match api.add_to_cart(&line).await {
      Ok(()) => AddToCartOutcome::Added,
      Err(AppError::AlreadyInCart) => AddToCartOutcome::AlreadyInCart,
      Err(e) => return Err(e),
    };
    info!(item_id = %line.item_id, ?outcome, "Add to cart finished.");
    ctx_data.write().outcome = Some(outcome);
    Ok(FlowControl::Continue)
  });

  registry.register(p);
}

/// Adds `quantity` of `item` to the signed-in buyer's cart and tells the user how it went.
#[instrument(name = "workflow::add_to_cart", skip(state, item), fields(item_id = %item.item_id), err(Display))]
pub async fn run(state: &AppState, item: &Item, quantity: u32) -> AppResult<AddToCartOutcome> {
  let ctx = ContextData::new(AddToCartCtxData {
    state: state.clone(),
    item_id: item.item_id.clone(),
    unit_price: item.unit_price,
    quantity,
    buyer_id: None,
    outcome: None,
  });

  if let Err(e) = state.flows.run(ctx.clone()).await {
    state.ui.show(e.alert());
    return Err(e);
  }

  let outcome = ctx
    .read()
    .outcome
    .ok_or_else(|| AppError::Internal("add to cart finished without an outcome".to_string()))?;
  match outcome {
    AddToCartOutcome::Added => state.ui.alert("Success", ADDED),
    AddToCartOutcome::AlreadyInCart => state.ui.show(AppError::AlreadyInCart.alert()),
    AddToCartOutcome::SignInRequired => {
      state.ui.alert("Sign in", LOGIN_REQUIRED);
      state.ui.navigate(Screen::SignIn);
    }
  }
  Ok(outcome)
}
