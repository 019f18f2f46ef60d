//
//  gitlab-generic-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-call request inputs and parameter encoding.

use serde_json::Value;

use super::common::HeaderMapping;
use super::path::scalar_text;
use crate::transport::UploadFile;

/// Inputs of one terminal call: parameters, headers and files.
///
/// For `GET` and `DELETE` the parameters become the query string. For
/// `POST`, `PUT` and `PATCH` they become a URL-encoded form body, or a
/// multipart body as soon as at least one file is attached.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::api::Payload;
/// use gitlab_generic_client::transport::UploadFile;
///
/// let payload = Payload::new()
///     .param("title", "Release 1.2")
///     .param("confidential", false)
///     .header("X-Request-Id", "42")
///     .file(UploadFile::from_bytes("file", "notes.txt", b"hello".to_vec()));
///
/// assert_eq!(payload.parameters.len(), 2);
/// assert_eq!(payload.headers["X-Request-Id"], "42");
/// assert_eq!(payload.files.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Payload {
    /// Parameters in the order they were added.
    pub parameters: Vec<(String, Value)>,
    /// Headers for this call only.
    pub headers: HeaderMapping,
    /// Files to upload.
    pub files: Vec<UploadFile>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    ///
    /// `null` values are dropped when the payload is encoded. Arrays and
    /// objects are sent with Rails bracket keys (`labels[]`, `assignee[id]`).
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Adds a header sent with this call only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds several headers sent with this call only.
    pub fn headers(mut self, headers: HeaderMapping) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attaches a file, switching the body to multipart.
    pub fn file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }
}

/// Flattens parameters into ordered text pairs.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::api::request::encode_parameters;
/// use serde_json::json;
///
/// let pairs = encode_parameters(&[
///     ("labels".to_string(), json!(["bug", "ui"])),
///     ("milestone".to_string(), json!(null)),
///     ("assignee".to_string(), json!({"id": 7})),
/// ]);
/// assert_eq!(pairs, vec![
///     ("labels[]".to_string(), "bug".to_string()),
///     ("labels[]".to_string(), "ui".to_string()),
///     ("assignee[id]".to_string(), "7".to_string()),
/// ]);
/// ```
pub fn encode_parameters(parameters: &[(String, Value)]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (name, value) in parameters {
        flatten(name, value, &mut pairs);
    }
    pairs
}

fn flatten(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            let key = format!("{}[]", key);
            for item in items {
                flatten(&key, item, pairs);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten(&format!("{}[{}]", key, sub), item, pairs);
            }
        }
        scalar => {
            if let Ok(Some(text)) = scalar_text(scalar) {
                pairs.push((key.to_string(), text));
            }
        }
    }
}

/// URL-encodes text pairs as `application/x-www-form-urlencoded`.
pub fn form_encode(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        let pairs = encode_parameters(&[
            ("param2".to_string(), json!("value2")),
            ("page".to_string(), json!(2)),
            ("archived".to_string(), json!(true)),
        ]);
        assert_eq!(form_encode(&pairs), "param2=value2&page=2&archived=true");
    }

    #[test]
    fn test_null_dropped() {
        let pairs = encode_parameters(&[("search".to_string(), Value::Null)]);
        assert!(pairs.is_empty());
        assert_eq!(form_encode(&pairs), "");
    }

    #[test]
    fn test_form_encoding_escapes() {
        let pairs = vec![("search".to_string(), "a b&c/d".to_string())];
        assert_eq!(form_encode(&pairs), "search=a+b%26c%2Fd");
    }

    #[test]
    fn test_nested() {
        let pairs = encode_parameters(&[(
            "variables".to_string(),
            json!([{"key": "DEPLOY", "value": "1"}]),
        )]);
        assert_eq!(
            pairs,
            vec![
                ("variables[][key]".to_string(), "DEPLOY".to_string()),
                ("variables[][value]".to_string(), "1".to_string()),
            ]
        );
    }
}
