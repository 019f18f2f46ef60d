//
//  gitlab-generic-client
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Interpretation
//!
//! Turns a [`RawResponse`] into either a decoded body or a classified
//! [`ClientError`].
//!
//! ## Decision Order
//!
//! 1. No response object: [`ClientError::NoResponse`]
//! 2. No body: success with `None`, whatever the status
//! 3. JSON content type that does not parse: [`ClientError::Decode`]
//! 4. Status 404: [`ClientError::NotFound`] with the requested URL
//! 5. Status 400 and above, or an `error` field in the body: [`ClientError::Http`]
//! 6. Otherwise: the decoded body, normalized when
//!    [`ClientOptions::json_decode_to_array`] is set

use serde_json::{Map, Number, Value};
use tracing::debug;

use super::common::ClientError;
use crate::config::{ClientOptions, JsonDecodeOptions};
use crate::transport::RawResponse;

/// Interprets the transport result of one request.
///
/// `requested_url` is the remembered URL of the request; it is consumed when a
/// 404 is reported so the enrichment happens once.
pub(crate) fn interpret(
    response: Option<RawResponse>,
    options: &ClientOptions,
    requested_url: &mut Option<String>,
) -> Result<Option<Value>, ClientError> {
    let response = response.ok_or(ClientError::NoResponse)?;
    let Some(raw) = response.body.as_deref() else {
        return Ok(None);
    };

    let body = decode_body(raw, response.is_json())?;
    let status = response.status;
    let flags = options.json_decode_options;
    let error = field_text(&body, "error", flags);

    if status >= 400 {
        let message = error
            .or_else(|| field_text(&body, "message", flags))
            .unwrap_or_default();
        debug!(status, "API reported an error");

        if status == 404 {
            return Err(ClientError::NotFound {
                url: requested_url.take().unwrap_or_default(),
                message: (!message.is_empty()).then_some(message),
            });
        }
        return Err(ClientError::Http { status, message });
    }

    if let Some(message) = error {
        return Err(ClientError::Http { status, message });
    }

    Ok(match body {
        Value::Null => None,
        body if options.json_decode_to_array => Some(normalize(body, flags)),
        body => Some(body),
    })
}

/// Decodes a raw body.
///
/// Bodies that are not valid JSON are kept as a string unless the response
/// declared JSON. An empty body decodes to `null`.
fn decode_body(raw: &[u8], declared_json: bool) -> Result<Value, ClientError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(raw) {
        Ok(value) => Ok(value),
        Err(e) if declared_json => Err(ClientError::Decode(e)),
        Err(_) => Ok(Value::String(String::from_utf8_lossy(raw).into_owned())),
    }
}

/// Text of a non-null body field.
fn field_text(body: &Value, name: &str, flags: JsonDecodeOptions) -> Option<String> {
    body.get(name)
        .filter(|value| !value.is_null())
        .map(|value| error_text(value, flags))
}

/// Text of an `error` or `message` field.
fn error_text(value: &Value, flags: JsonDecodeOptions) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => encode_compact(other, flags).trim_matches('"').to_string(),
    }
}

/// Applies the numeric-check and force-object flags to a decoded value.
///
/// Object key order is preserved.
pub fn normalize(value: Value, flags: JsonDecodeOptions) -> Value {
    match value {
        Value::String(text) if flags.contains(JsonDecodeOptions::NUMERIC_CHECK) => {
            numeric(&text).map(Value::Number).unwrap_or(Value::String(text))
        }
        Value::Array(items) => {
            let items = items.into_iter().map(|item| normalize(item, flags));
            if flags.contains(JsonDecodeOptions::FORCE_OBJECT) {
                Value::Object(
                    items
                        .enumerate()
                        .map(|(index, item)| (index.to_string(), item))
                        .collect(),
                )
            } else {
                Value::Array(items.collect())
            }
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, normalize(item, flags)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Encodes a value as compact JSON honouring the encoding flags.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::api::response::encode_compact;
/// use gitlab_generic_client::config::JsonDecodeOptions;
/// use serde_json::json;
///
/// let value = json!({"path": "a/b", "count": "3"});
/// assert_eq!(
///     encode_compact(&value, JsonDecodeOptions::default()),
///     r#"{"path":"a/b","count":3}"#
/// );
/// assert_eq!(
///     encode_compact(&value, JsonDecodeOptions::EMPTY),
///     r#"{"path":"a\/b","count":"3"}"#
/// );
/// ```
pub fn encode_compact(value: &Value, flags: JsonDecodeOptions) -> String {
    let encoded = normalize(value.clone(), flags).to_string();
    let mut out = String::with_capacity(encoded.len());

    // `/` and non-ASCII characters can only occur inside JSON strings.
    for ch in encoded.chars() {
        if ch == '/' && !flags.contains(JsonDecodeOptions::UNESCAPED_SLASHES) {
            out.push_str("\\/");
        } else if !ch.is_ascii() && !flags.contains(JsonDecodeOptions::UNESCAPED_UNICODE) {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Parses a numeric-looking string.
fn numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim_start();
    let looks_numeric = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !looks_numeric {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::from(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}
