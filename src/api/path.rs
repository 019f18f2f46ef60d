//
//  gitlab-generic-client
//  api/path.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Path Builder
//!
//! Accumulates the `/`-separated segments of a resource path one chained call
//! at a time. Every segment is percent-encoded before it is appended, so
//! caller-supplied identifiers such as `group/project` or `v1.2.0` always stay
//! a single path component.
//!
//! ## Example
//!
//! ```rust
//! use gitlab_generic_client::api::path::PathBuilder;
//!
//! let mut path = PathBuilder::default();
//! path.push("projects");
//! path.push_with("repository", ["tags", "v1.2.0"]).unwrap();
//!
//! assert_eq!(path.as_str(), "/projects/repository/tags/v1%2E2%2E0");
//! assert_eq!(path.take(), "/projects/repository/tags/v1%2E2%2E0");
//! assert!(path.as_str().is_empty());
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use super::common::ClientError;

/// Characters escaped inside a path segment.
///
/// Everything except the RFC 3986 unreserved set is encoded, minus `.`, which
/// stays in the set so it comes out as `%2E`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Percent-encodes a single path segment.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::api::path::encode_segment;
///
/// assert_eq!(encode_segment("data one"), "data%20one");
/// assert_eq!(encode_segment("group/project"), "group%2Fproject");
/// assert_eq!(encode_segment("README.md"), "README%2Emd");
/// ```
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Renders a scalar JSON value as plain text.
///
/// Returns `Ok(None)` for `null` and an error for arrays and objects.
pub(crate) fn scalar_text(value: &Value) -> Result<Option<String>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

/// Appends an encoded query string to a path.
///
/// Uses `?` when the path has no query yet and `&` otherwise. An empty query
/// leaves the path unchanged.
pub fn append_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, query)
}

/// The pending resource path of a call chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    pending: String,
}

impl PathBuilder {
    /// Appends `/` followed by the encoded segment name.
    pub fn push(&mut self, name: &str) {
        self.pending.push('/');
        self.pending.push_str(&encode_segment(name));
    }

    /// Appends the segment name followed by one segment per argument.
    ///
    /// `null` arguments are skipped so optional path components can be passed
    /// without branching. Arrays and objects are rejected; when that happens
    /// nothing is appended, not even the name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] naming the segment when any
    /// argument is not a scalar.
    pub fn push_with<I, A>(&mut self, name: &str, args: I) -> Result<(), ClientError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let mut segments = Vec::new();
        for arg in args {
            match scalar_text(&arg.into()) {
                Ok(Some(text)) => segments.push(text),
                Ok(None) => {}
                Err(()) => {
                    return Err(ClientError::invalid_argument(format!(
                        "segment \"{}\": invalid argument type, scalar expected",
                        name
                    )))
                }
            }
        }

        self.push(name);
        for segment in &segments {
            self.push(segment);
        }
        Ok(())
    }

    /// Returns the path accumulated so far.
    pub fn as_str(&self) -> &str {
        &self.pending
    }

    /// Returns the accumulated path and resets the builder.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    /// Discards the accumulated path.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("plain-name_1~x"), "plain-name_1~x");
        assert_eq!(encode_segment("data one"), "data%20one");
        assert_eq!(encode_segment("a.b.c"), "a%2Eb%2Ec");
        assert_eq!(encode_segment("é"), "%C3%A9");
        assert_eq!(encode_segment("feature/login?x=1"), "feature%2Flogin%3Fx%3D1");
    }

    #[test]
    fn test_chained_segments() {
        let mut path = PathBuilder::default();
        path.push_with("path", [1]).unwrap();
        path.push_with("to", ["data one"]).unwrap();
        path.push_with("for", ["test"]).unwrap();
        assert_eq!(path.as_str(), "/path/1/to/data%20one/for/test");
    }

    #[test]
    fn test_null_arguments_are_skipped() {
        let mut with_null = PathBuilder::default();
        with_null
            .push_with("path", [json!("x"), Value::Null, json!("y")])
            .unwrap();

        let mut without = PathBuilder::default();
        without.push_with("path", ["x", "y"]).unwrap();

        assert_eq!(with_null, without);
        assert_eq!(without.as_str(), "/path/x/y");
    }

    #[test]
    fn test_scalar_kinds() {
        let mut path = PathBuilder::default();
        path.push_with("flags", [json!(true), json!(false), json!(2.5), json!(-3)])
            .unwrap();
        assert_eq!(path.as_str(), "/flags/true/false/2%2E5/-3");
    }

    #[test]
    fn test_non_scalar_rejected() {
        let mut path = PathBuilder::default();
        path.push("projects");

        let err = path
            .push_with("path", [json!({"array": "not accepted here"})])
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
        assert!(err.to_string().contains("scalar expected"));
        assert!(err.to_string().contains("\"path\""));
        assert_eq!(path.as_str(), "/projects");

        assert!(path.push_with("list", [json!([1, 2])]).is_err());
    }

    #[test]
    fn test_take_resets() {
        let mut path = PathBuilder::default();
        path.push("user");
        assert_eq!(path.take(), "/user");
        assert_eq!(path.take(), "");
    }

    #[test]
    fn test_append_query() {
        assert_eq!(append_query("/path", "a=1"), "/path?a=1");
        assert_eq!(append_query("/path?a=1", "b=2"), "/path?a=1&b=2");
        assert_eq!(append_query("/path", ""), "/path");
    }
}
