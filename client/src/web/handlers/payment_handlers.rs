// client/src/web/handlers/payment_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{error, info, instrument};

use crate::checkout::SIGNATURE_HEADER;
use crate::errors::AppError;
use crate::web::CallbackState;
use crate::workflows::payment_callback;

#[instrument(
    name = "handler::payment_callback",
    skip(state, req, body),
    fields(payload_len = body.len())
)]
pub async fn payment_callback_handler(
  state: web::Data<CallbackState>,
  req: HttpRequest,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  let signature = req
    .headers()
    .get(SIGNATURE_HEADER)
    .and_then(|h_val| h_val.to_str().ok())
    .map(String::from);

  match payment_callback::run(&state.flows, &state.verifier, &state.ledger, body.to_vec(), signature).await {
    Ok(callback) => {
      info!(reference = %callback.reference, status = ?callback.status, "Payment callback recorded.");
      Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "recorded",
        "reference": callback.reference,
      })))
    }
    Err(app_err) => {
      // Auth errors answer 401 and payload errors 400 through ResponseError.
      error!(error = %app_err, "Payment callback rejected.");
      Err(app_err)
    }
  }
}
