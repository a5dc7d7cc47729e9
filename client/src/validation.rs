// client/src/validation.rs

//! Sign-up form checks. Each field check yields the inline message for that
//! field; the first failing check also becomes the blocking alert.

use crate::errors::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^07[0-9]{8}$").expect("phone pattern"));
static NIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[0-9]{9}[vV]|[0-9]{12})$").expect("nic pattern"));

pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PASSWORD: &str =
  "Password must be at least 8 characters long and include at least one letter and one number";
pub const INVALID_FIRST_NAME: &str = "Please enter a valid first name (letters only)";
pub const INVALID_LAST_NAME: &str = "Please enter a valid last name (letters only)";
pub const INVALID_PHONE: &str = "Please enter a valid phone number (e.g., 0712345678)";
pub const INVALID_NIC: &str = "Invalid NIC";
pub const MISSING_STORE_NAME: &str = "Please enter a store name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  ConfirmPassword,
  Email,
  Password,
  FirstName,
  LastName,
  Phone,
  Nic,
  StoreName,
}

pub fn email(value: &str) -> Option<&'static str> {
  (!EMAIL_RE.is_match(value)).then_some(INVALID_EMAIL)
}

/// At least 8 characters, letters and digits only, with at least one of each.
pub fn password(value: &str) -> Option<&'static str> {
  let ok = value.chars().count() >= 8
    && value.chars().all(|c| c.is_ascii_alphanumeric())
    && value.chars().any(|c| c.is_ascii_alphabetic())
    && value.chars().any(|c| c.is_ascii_digit());
  (!ok).then_some(INVALID_PASSWORD)
}

pub fn first_name(value: &str) -> Option<&'static str> {
  (!NAME_RE.is_match(value)).then_some(INVALID_FIRST_NAME)
}

pub fn last_name(value: &str) -> Option<&'static str> {
  (!NAME_RE.is_match(value)).then_some(INVALID_LAST_NAME)
}

pub fn phone(value: &str) -> Option<&'static str> {
  (!PHONE_RE.is_match(value)).then_some(INVALID_PHONE)
}

pub fn nic(value: &str) -> Option<&'static str> {
  (!NIC_RE.is_match(value)).then_some(INVALID_NIC)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerFields {
  pub nic: String,
  pub store_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub password: String,
  pub confirm_password: String,
  /// Present for seller sign-up.
  pub seller: Option<SellerFields>,
}

/// Failing fields in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, field: Field) -> Option<&'static str> {
    self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
  }

  pub fn first(&self) -> Option<&'static str> {
    self.0.first().map(|(_, m)| *m)
  }

  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
    self.0.iter().map(|(f, _)| *f)
  }

  fn check(&mut self, field: Field, outcome: Option<&'static str>) {
    if let Some(message) = outcome {
      self.0.push((field, message));
    }
  }
}

impl SignUpForm {
  pub fn field_errors(&self) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check(
      Field::ConfirmPassword,
      (self.password != self.confirm_password).then_some(PASSWORDS_DIFFER),
    );
    errors.check(Field::Email, email(self.email.trim()));
    errors.check(Field::Password, password(&self.password));
    errors.check(Field::FirstName, first_name(&self.first_name));
    errors.check(Field::LastName, last_name(&self.last_name));
    errors.check(Field::Phone, phone(self.phone.trim()));
    if let Some(seller) = &self.seller {
      errors.check(Field::Nic, nic(seller.nic.trim()));
      errors.check(
        Field::StoreName,
        seller.store_name.trim().is_empty().then_some(MISSING_STORE_NAME),
      );
    }
    errors
  }

  /// `Err(AppError::Validation(first message))` when any field fails.
  pub fn validate(&self) -> Result<(), AppError> {
    match self.field_errors().first() {
      Some(message) => Err(AppError::Validation(message.to_string())),
      None => Ok(()),
    }
  }
}
