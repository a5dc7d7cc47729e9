// client/src/models/de.rs

//! Lenient field decoders. The backend is not consistent about ids
//! (string or number) and flags (bool, 0/1 or null).

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::String(s) => Ok(s),
    Value::Number(n) => Ok(n.to_string()),
    other => Err(de::Error::custom(format!("expected an id, got {}", other))),
  }
}

pub fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(None),
    Value::String(s) if s.is_empty() => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    other => Err(de::Error::custom(format!("expected an id, got {}", other))),
  }
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(false),
    Value::Bool(b) => Ok(b),
    Value::Number(n) => Ok(n.as_i64().map(|v| v != 0).unwrap_or(false)),
    Value::String(s) => Ok(matches!(s.as_str(), "1" | "true" | "TRUE" | "True")),
    other => Err(de::Error::custom(format!("expected a flag, got {}", other))),
  }
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(0.0),
    Value::Number(n) => n.as_f64().ok_or_else(|| de::Error::custom("number out of range")),
    Value::String(s) => s.trim().parse::<f64>().map_err(de::Error::custom),
    other => Err(de::Error::custom(format!("expected a number, got {}", other))),
  }
}

pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::Number(n) => n
      .as_u64()
      .and_then(|v| u32::try_from(v).ok())
      .ok_or_else(|| de::Error::custom("quantity out of range")),
    Value::String(s) => s.trim().parse::<u32>().map_err(de::Error::custom),
    other => Err(de::Error::custom(format!("expected a quantity, got {}", other))),
  }
}
