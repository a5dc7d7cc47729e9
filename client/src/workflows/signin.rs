// client/src/workflows/signin.rs

use crate::errors::{AppError, Result as AppResult, SIGN_IN_FAILED};
use crate::services::AuthUser;
use crate::state::AppState;
use crate::ui::Screen;
use crate::workflows::contexts::SignInCtxData;
use agromart_flow::{ContextData, FlowControl, FlowRegistry, Workflow};
use tracing::{info, instrument, warn};

pub fn register(registry: &FlowRegistry<AppError>) {
  let mut p = Workflow::<SignInCtxData, AppError>::new(&[
    ("check_credentials_present", false, None),
    ("authenticate", false, None),
    ("start_session", false, None),
  ]);

  p.on("check_credentials_present", |ctx_data: ContextData<SignInCtxData>| async move {
    let missing = {
      let guard = ctx_data.read();
      guard.email.trim().is_empty() || guard.password.is_empty()
    };
    if missing {
      return Err(AppError::Auth("email or password missing".to_string()));
    }
    Ok(FlowControl::Continue)
  });

  p.on("authenticate", |ctx_data: ContextData<SignInCtxData>| async move {
    let (identity, email, password) = {
      let guard = ctx_data.read();
      (guard.state.identity.clone(), guard.email.trim().to_string(), guard.password.clone())
    };
    // Every failure below the identity provider collapses into one auth error.
    let user = identity
      .sign_in(&email, &password)
      .await
      .map_err(|e| AppError::Auth(e.to_string()))?;
    ctx_data.write().user = Some(user);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("start_session", |ctx_data: ContextData<SignInCtxData>| async move {
    let guard = ctx_data.read();
    let user = guard
      .user
      .as_ref()
      .ok_or_else(|| AppError::Internal("session step ran before authentication".to_string()))?;
    guard.state.session.sign_in(user.uid.clone(), user.email.clone());
    Ok::<_, AppError>(FlowControl::Continue)
  });

  registry.register(p);
}

/// Signs in and opens the home tabs. Any failure shows the same alert.
#[instrument(name = "workflow::sign_in", skip(state, password), err(Display))]
pub async fn run(state: &AppState, email: &str, password: &str) -> AppResult<AuthUser> {
  let ctx = ContextData::new(SignInCtxData {
    state: state.clone(),
    email: email.to_string(),
    password: password.to_string(),
    user: None,
  });

  let result = state.flows.run(ctx.clone()).await;
  let user = ctx.read().user.clone();
  match (result, user) {
    (Ok(_), Some(user)) => {
      info!(uid = %user.uid, "Signed in.");
      state.ui.navigate(Screen::HomeTabs);
      Ok(user)
    }
    (result, _) => {
      let reason = result.err().map(|e| e.to_string()).unwrap_or_default();
      warn!(%reason, "Sign-in failed.");
      state.ui.alert("Error", SIGN_IN_FAILED);
      Err(AppError::Auth(SIGN_IN_FAILED.to_string()))
    }
  }
}
