// client/src/checkout/signature.rs

//! Payment gateway callback signatures: a keyed BLAKE3 MAC over the raw
//! request body, sent hex-encoded in `X-Payment-Signature`.

use crate::errors::AppError;

pub const SIGNATURE_HEADER: &str = "X-Payment-Signature";

const KEY_CONTEXT: &str = "agromart 2024 payment callback signing key";

#[derive(Clone)]
pub struct CallbackVerifier {
  key: [u8; 32],
}

impl std::fmt::Debug for CallbackVerifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CallbackVerifier").field("key", &"[redacted]").finish()
  }
}

impl CallbackVerifier {
  /// Derives the MAC key from the shared secret.
  pub fn new(shared_secret: &str) -> Self {
    Self {
      key: blake3::derive_key(KEY_CONTEXT, shared_secret.as_bytes()),
    }
  }

  /// Hex signature for `payload`. The gateway side of the contract; tests use it too.
  pub fn sign(&self, payload: &[u8]) -> String {
    blake3::keyed_hash(&self.key, payload).to_hex().to_string()
  }

  /// Checks `signature_hex` against `payload` in constant time.
  pub fn verify(&self, payload: &[u8], signature_hex: &str) -> Result<(), AppError> {
    let provided = blake3::Hash::from_hex(signature_hex.trim())
      .map_err(|_| AppError::Auth("Malformed payment callback signature.".to_string()))?;
    if provided == blake3::keyed_hash(&self.key, payload) {
      Ok(())
    } else {
      Err(AppError::Auth("Payment callback signature mismatch.".to_string()))
    }
  }
}
