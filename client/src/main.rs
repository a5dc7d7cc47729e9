// client/src/main.rs

use agromart::checkout::{CallbackVerifier, PaymentLedger};
use agromart::config::AppConfig;
use agromart::web::{configure_app_routes, CallbackState};
use agromart::{workflows, AppError};
use agromart_flow::FlowRegistry;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting payment callback server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  // This process only receives gateway callbacks; view models run in the
  // front end that embeds the library, so only the callback workflow is registered.
  let flows = Arc::new(FlowRegistry::<AppError>::new());
  workflows::payment_callback::register(&flows);

  let callback_state = CallbackState {
    flows,
    verifier: CallbackVerifier::new(&app_config.payment_callback_secret),
    ledger: PaymentLedger::new(),
  };

  let server_address = app_config.callback_bind_address();
  tracing::info!("Attempting to bind payment callback server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(callback_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
