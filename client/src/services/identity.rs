// client/src/services/identity.rs

//! Email/password identity: the hosted provider over REST, and an in-process
//! argon2-backed provider for development and tests.

use crate::errors::{AppError, Result as AppResult};
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// A signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
  pub uid: String,
  pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
  async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser>;
  async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;
}

// --- Hosted provider ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
  email: &'a str,
  password: &'a str,
  return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsResponse {
  local_id: String,
  #[serde(default)]
  email: String,
}

pub struct RestIdentityProvider {
  client: Client,
  base_url: String,
  api_key: String,
}

impl RestIdentityProvider {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> AppResult<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
    let base_url: String = base_url.into();
    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      api_key: api_key.into(),
    })
  }

  async fn call(&self, action: &str, email: &str, password: &str) -> AppResult<AuthUser> {
    let url = format!("{}/accounts:{}", self.base_url, action);
    let response = self
      .client
      .post(url)
      .query(&[("key", self.api_key.as_str())])
      .json(&CredentialsRequest {
        email,
        password,
        return_secure_token: true,
      })
      .send()
      .await
      .map_err(|e| AppError::Auth(format!("identity provider unreachable: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      warn!(%status, action, "Identity provider rejected the request.");
      return Err(AppError::Auth(body));
    }

    let body: CredentialsResponse = response
      .json()
      .await
      .map_err(|e| AppError::Auth(format!("unexpected identity response: {}", e)))?;
    Ok(AuthUser {
      uid: body.local_id,
      email: if body.email.is_empty() { email.to_string() } else { body.email },
    })
  }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
  #[instrument(name = "identity::sign_in", skip(self, password), err(Display))]
  async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
    self.call("signInWithPassword", email, password).await
  }

  #[instrument(name = "identity::sign_up", skip(self, password), err(Display))]
  async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
    self.call("signUp", email, password).await
  }
}

// --- Local provider ---

#[derive(Default)]
pub struct LocalIdentityProvider {
  /// email -> (uid, argon2 hash)
  accounts: Mutex<HashMap<String, (String, String)>>,
}

impl LocalIdentityProvider {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
  #[instrument(name = "identity::local_sign_in", skip(self, password), err(Display))]
  async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
    let account = self.accounts.lock().get(&email.to_lowercase()).cloned();
    let (uid, hash) = account.ok_or_else(|| AppError::Auth("unknown account".to_string()))?;
    if verify_password(&hash, password)? {
      Ok(AuthUser {
        uid,
        email: email.to_string(),
      })
    } else {
      Err(AppError::Auth("wrong password".to_string()))
    }
  }

  #[instrument(name = "identity::local_sign_up", skip(self, password), err(Display))]
  async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
    let hash = hash_password(password)?;
    let key = email.to_lowercase();
    let mut accounts = self.accounts.lock();
    if accounts.contains_key(&key) {
      return Err(AppError::Validation("An account with this email already exists.".to_string()));
    }
    let uid = uuid::Uuid::new_v4().simple().to_string();
    accounts.insert(key, (uid.clone(), hash));
    Ok(AuthUser {
      uid,
      email: email.to_string(),
    })
  }
}

/// Hashes a plain-text password with Argon2 and a random salt.
#[instrument(name = "identity::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> AppResult<String> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| {
      error!(error = %e, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing failed: {}", e))
    })
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(hashed_password: &str, provided_password: &str) -> AppResult<bool> {
  let parsed_hash = PasswordHash::new(hashed_password)
    .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;
  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password mismatch.");
      Ok(false)
    }
    Err(e) => Err(AppError::Internal(format!("Password verification failed: {}", e))),
  }
}
