//! Response envelope normalisation.
//!
//! Every JSON response that can fail carries `success: bool` and, on
//! failure, an `error` string. A missing `success` counts as failure. The
//! document listing is the exception: it has no `success` field and fails
//! only by carrying `error`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Parse a body whose payload is only valid when `success` is `true`.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    let value = parse_json(status, body)?;
    if value.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(ApiError::Rejected(error_message(&value, fallback)));
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a body that signals failure only through an `error` field.
pub(crate) fn parse_listing<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    let value = parse_json(status, body)?;
    if value.get("error").is_some() || !is_success_status(status) {
        return Err(ApiError::Rejected(error_message(&value, fallback)));
    }
    Ok(serde_json::from_value(value)?)
}

fn parse_json(status: u16, body: &str) -> Result<Value, ApiError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !is_success_status(status) => Err(ApiError::Status {
            status,
            body: body.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn error_message(value: &Value, fallback: &str) -> String {
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub(crate) fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
