// src/utils/envelope.rs

//! Decoder for the `{success, data, message}` envelope every backend
//! response is wrapped in.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Backend response wrapper.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ResponseEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parse a raw body into an untyped envelope.
///
/// An empty body is an unsuccessful envelope without data. Anything else
/// must be a JSON object of the envelope shape; whitespace-only text or a
/// top-level array is `MalformedResponse`.
pub fn parse_envelope(body: &str) -> Result<ResponseEnvelope<Value>> {
    if body.is_empty() {
        return Ok(ResponseEnvelope::default());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        log::debug!("Envelope parse failed: {}", e);
        AppError::MalformedResponse
    })?;
    if !value.is_object() {
        log::debug!("Expected an envelope object, got {}", value_kind(&value));
        return Err(AppError::MalformedResponse);
    }

    serde_json::from_value(value).map_err(|e| {
        log::debug!("Envelope fields have unexpected types: {}", e);
        AppError::MalformedResponse
    })
}

/// Check status and `success`, returning the payload of an accepted envelope.
pub fn accept(status: u16, envelope: ResponseEnvelope<Value>, fallback: &str) -> Result<Option<Value>> {
    if !(200..300).contains(&status) || !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(AppError::rejected(status, message));
    }
    Ok(envelope.data)
}

/// Decode a list-shaped response.
///
/// A missing or non-list `data` on an accepted envelope yields an empty
/// list. Elements that do not match `T` are `MalformedResponse`.
pub fn decode_list<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> Result<Vec<T>> {
    let envelope = parse_envelope(body)?;
    match accept(status, envelope, fallback)? {
        Some(data @ Value::Array(_)) => serde_json::from_value(data).map_err(|e| {
            log::debug!("Envelope data does not match the expected item shape: {}", e);
            AppError::MalformedResponse
        }),
        Some(other) => {
            log::debug!("Expected a list in envelope data, got {}", value_kind(&other));
            Ok(Vec::new())
        }
        None => Ok(Vec::new()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "failed to load";

    #[test]
    fn empty_body_is_unsuccessful_without_data() {
        let envelope = parse_envelope("").unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn empty_body_is_rejected_with_fallback() {
        match decode_list::<i64>(200, "", FALLBACK) {
            Err(AppError::RequestRejected { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, FALLBACK);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_list_data_degrades_to_empty() {
        let items: Vec<i64> = decode_list(200, r#"{"success":true,"data":"not-a-list"}"#, FALLBACK).unwrap();
        assert!(items.is_empty());

        let items: Vec<i64> = decode_list(200, r#"{"success":true}"#, FALLBACK).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            decode_list::<i64>(200, "{not json", FALLBACK),
            Err(AppError::MalformedResponse)
        ));
    }

    #[test]
    fn whitespace_body_is_malformed() {
        assert!(matches!(parse_envelope("   "), Err(AppError::MalformedResponse)));
        assert!(matches!(
            decode_list::<i64>(200, " \n", FALLBACK),
            Err(AppError::MalformedResponse)
        ));
    }

    #[test]
    fn top_level_array_is_not_an_envelope() {
        assert!(matches!(
            decode_list::<i64>(200, "[true,[1,2],null]", FALLBACK),
            Err(AppError::MalformedResponse)
        ));
        assert!(matches!(parse_envelope("\"ok\""), Err(AppError::MalformedResponse)));
    }

    #[test]
    fn success_false_carries_backend_message() {
        let err = decode_list::<i64>(200, r#"{"success":false,"message":"expired token"}"#, FALLBACK)
            .unwrap_err();
        assert_eq!(err.to_string(), "expired token");
    }

    #[test]
    fn error_status_wins_over_success_flag() {
        let err = decode_list::<i64>(500, r#"{"success":true,"data":[1]}"#, FALLBACK).unwrap_err();
        assert!(matches!(err, AppError::RequestRejected { status: 500, .. }));
        assert_eq!(err.to_string(), FALLBACK);
    }

    #[test]
    fn error_status_with_unparseable_body_is_malformed() {
        assert!(matches!(
            decode_list::<i64>(502, "<html>Bad Gateway</html>", FALLBACK),
            Err(AppError::MalformedResponse)
        ));
    }

    #[test]
    fn list_data_is_decoded_in_order() {
        let items: Vec<i64> = decode_list(200, r#"{"success":true,"data":[3,1,2]}"#, FALLBACK).unwrap();
        assert_eq!(items, vec![3, 1, 2]);
    }
}
