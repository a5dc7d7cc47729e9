// client/src/workflows/signup.rs

//! Account creation for buyers and sellers: identity account, then the user
//! profile, then the role record.

use crate::errors::{Alert, AppError, Result as AppResult};
use crate::models::{SellerRecord, UserProfile, UserType};
use crate::state::AppState;
use crate::ui::Screen;
use crate::validation::SignUpForm;
use crate::workflows::contexts::SignUpCtxData;
use agromart_flow::{ContextData, FlowControl, FlowRegistry, SkipCondition, Workflow};
use std::sync::Arc;
use tracing::{event, info, instrument, warn, Level};

pub const CREATED: &str = "Account created successfully";
pub const CREATE_FAILED: &str = "Error creating account";

pub fn register(registry: &FlowRegistry<AppError>) {
  let buyers_only: SkipCondition<SignUpCtxData> =
    Arc::new(|ctx: ContextData<SignUpCtxData>| ctx.read().role != UserType::Buyer);
  let sellers_only: SkipCondition<SignUpCtxData> =
    Arc::new(|ctx: ContextData<SignUpCtxData>| ctx.read().role != UserType::Seller);

  let mut p = Workflow::<SignUpCtxData, AppError>::new(&[
    ("validate_form", false, None),
    ("create_account", false, None),
    ("create_profile", false, None),
    ("create_buyer_record", false, Some(buyers_only)),
    ("create_seller_record", false, Some(sellers_only)),
  ]);

  p.on("validate_form", |ctx_data: ContextData<SignUpCtxData>| async move {
    let (form, role) = {
      let guard = ctx_data.read();
      (guard.form.clone(), guard.role)
    };
    if role == UserType::Seller && form.seller.is_none() {
      return Err(AppError::Validation("Store details are required for sellers.".to_string()));
    }
    form.validate()?;
    event!(Level::DEBUG, email = %form.email, ?role, "Sign-up form valid.");
    Ok(FlowControl::Continue)
  });

  p.on("create_account", |ctx_data: ContextData<SignUpCtxData>| async move {
    let (identity, email, password) = {
      let guard = ctx_data.read();
      (
        guard.state.identity.clone(),
        guard.form.email.trim().to_string(),
        guard.form.password.clone(),
      )
    };
    let account = identity.sign_up(&email, &password).await?;
    info!(uid = %account.uid, "Identity account created.");
    ctx_data.write().account = Some(account);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("create_profile", |ctx_data: ContextData<SignUpCtxData>| async move {
    let (api, profile) = {
      let guard = ctx_data.read();
      let account = guard
        .account
        .as_ref()
        .ok_or_else(|| AppError::Internal("profile step ran before account creation".to_string()))?;
      let profile = UserProfile {
        user_id: account.uid.clone(),
        first_name: guard.form.first_name.trim().to_string(),
        last_name: guard.form.last_name.trim().to_string(),
        mobile_number: guard.form.phone.trim().to_string(),
        email: account.email.clone(),
        address_id: None,
        user_type: guard.role,
        image_url: None,
      };
      (guard.state.api.clone(), profile)
    };
    api.create_user(&profile).await?;
    ctx_data.write().profile = Some(profile);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("create_buyer_record", |ctx_data: ContextData<SignUpCtxData>| async move {
    let (api, profile) = {
      let guard = ctx_data.read();
      (guard.state.api.clone(), guard.profile.clone())
    };
    let profile = profile.ok_or_else(|| AppError::Internal("buyer record needs a profile".to_string()))?;
    api.create_buyer(&profile).await?;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("create_seller_record", |ctx_data: ContextData<SignUpCtxData>| async move {
    let (api, record) = {
      let guard = ctx_data.read();
      let uid = guard.account.as_ref().map(|a| a.uid.clone());
      let record = match (uid, guard.form.seller.as_ref()) {
        (Some(user_id), Some(seller)) => SellerRecord {
          user_id,
          nic: seller.nic.trim().to_string(),
          store_name: seller.store_name.trim().to_string(),
        },
        _ => return Err(AppError::Internal("seller record needs an account and store details".to_string())),
      };
      (guard.state.api.clone(), record)
    };
    api.create_seller(&record).await?;
    Ok(FlowControl::Continue)
  });

  registry.register(p);
}

/// Validates and submits a sign-up form, then alerts and moves to sign-in.
///
/// A form error is shown as-is; anything after validation shows one generic failure.
#[instrument(name = "workflow::sign_up", skip(state, form), fields(email = %form.email), err(Display))]
pub async fn run(state: &AppState, form: SignUpForm, role: UserType) -> AppResult<UserProfile> {
  let ctx = ContextData::new(SignUpCtxData {
    state: state.clone(),
    form,
    role,
    account: None,
    profile: None,
  });

  match state.flows.run(ctx.clone()).await {
    Ok(_) => {
      let profile = ctx
        .read()
        .profile
        .clone()
        .ok_or_else(|| AppError::Internal("sign-up finished without a profile".to_string()))?;
      state.ui.alert("Success", CREATED);
      state.ui.navigate(Screen::SignIn);
      Ok(profile)
    }
    Err(AppError::Validation(message)) => {
      state.ui.show(Alert::new("Sign up", message.clone()));
      Err(AppError::Validation(message))
    }
    Err(e) => {
      warn!(error = %e, "Sign-up failed.");
      state.ui.alert("Error", CREATE_FAILED);
      Err(e)
    }
  }
}
