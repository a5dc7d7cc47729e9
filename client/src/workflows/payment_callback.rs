// client/src/workflows/payment_callback.rs

//! Handling of a payment gateway callback: verify the signature over the
//! raw body, parse it, record the result.

use crate::checkout::{CallbackVerifier, PaymentCallback, PaymentLedger, SIGNATURE_HEADER};
use crate::errors::{AppError, Result as AppResult};
use crate::workflows::contexts::PaymentCallbackCtxData;
use agromart_flow::{ContextData, FlowControl, FlowRegistry, Workflow};
use tracing::{error, info, instrument, warn};

pub fn register(registry: &FlowRegistry<AppError>) {
  let mut p = Workflow::<PaymentCallbackCtxData, AppError>::new(&[
    ("verify_signature", false, None),
    ("parse_payload", false, None),
    ("record_payment", false, None),
  ]);

  p.on("verify_signature", |ctx_data: ContextData<PaymentCallbackCtxData>| async move {
    let guard = ctx_data.read();
    let signature = guard.signature.as_deref().ok_or_else(|| {
      warn!("Payment callback without signature.");
      AppError::Auth(format!("Missing {} header.", SIGNATURE_HEADER))
    })?;
    guard.verifier.verify(&guard.raw_payload, signature).inspect_err(|e| {
      warn!(error = %e, "Payment callback signature rejected.");
    })?;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  p.on("parse_payload", |ctx_data: ContextData<PaymentCallbackCtxData>| async move {
    let parsed = serde_json::from_slice::<PaymentCallback>(&ctx_data.read().raw_payload);
    match parsed {
      Ok(callback) => {
        ctx_data.write().callback = Some(callback);
        Ok(FlowControl::Continue)
      }
      Err(e) => {
        error!(error = %e, "Payment callback payload is not valid.");
        Err(AppError::Validation(format!("Invalid payment callback payload: {}", e)))
      }
    }
  });

  p.on("record_payment", |ctx_data: ContextData<PaymentCallbackCtxData>| async move {
    let guard = ctx_data.read();
    let callback = guard
      .callback
      .clone()
      .ok_or_else(|| AppError::Internal("record step ran before parsing".to_string()))?;
    guard.ledger.record(callback);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  registry.register(p);
}

/// Verifies and records one callback; returns what was recorded.
#[instrument(name = "workflow::payment_callback", skip_all, fields(payload_len = raw_payload.len()), err(Display))]
pub async fn run(
  flows: &FlowRegistry<AppError>,
  verifier: &CallbackVerifier,
  ledger: &PaymentLedger,
  raw_payload: Vec<u8>,
  signature: Option<String>,
) -> AppResult<PaymentCallback> {
  let ctx = ContextData::new(PaymentCallbackCtxData {
    verifier: verifier.clone(),
    ledger: ledger.clone(),
    raw_payload,
    signature,
    callback: None,
  });
  flows.run(ctx.clone()).await?;
  let callback = ctx
    .read()
    .callback
    .clone()
    .ok_or_else(|| AppError::Internal("callback workflow finished without a payload".to_string()))?;
  info!(reference = %callback.reference, "Payment callback accepted.");
  Ok(callback)
}
