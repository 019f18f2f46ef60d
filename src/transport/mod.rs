//
//  gitlab-generic-client
//  transport/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Layer
//!
//! The narrow contract between the client and whatever actually moves bytes
//! over the network. The client hands a fully prepared [`TransportRequest`] to
//! a [`Transport`] and interprets the [`RawResponse`] it gets back; it never
//! touches sockets, TLS or DNS itself.
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`.
//! Tests and embedders can supply their own implementation to observe requests
//! or return synthetic responses.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use gitlab_generic_client::transport::{RawResponse, Transport, TransportRequest};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn send(&self, _request: TransportRequest) -> anyhow::Result<Option<RawResponse>> {
//!         Ok(Some(RawResponse::json(200, r#"{"id": 1}"#)))
//!     }
//! }
//! ```

mod http;

pub use http::HttpTransport;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;

use crate::api::common::HeaderMapping;
use crate::config::ClientOptions;

/// Content type of URL-encoded form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type of multipart bodies (the boundary is added by the encoder).
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Sends prepared requests.
///
/// `Ok(None)` means the transport completed without producing any response;
/// the client reports it as [`ClientError::NoResponse`](crate::ClientError::NoResponse).
/// `Err` is a transport failure and is reported as
/// [`ClientError::Transport`](crate::ClientError::Transport).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one HTTP exchange.
    async fn send(&self, request: TransportRequest) -> anyhow::Result<Option<RawResponse>>;
}

/// Connection-level settings passed with every request.
///
/// [`HttpTransport`] applies `timeout` on every request. `verify_peer`,
/// `verify_host` and `user_agent` are fixed when the transport is built from
/// these options and are ignored on individual requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Verify the server certificate chain.
    pub verify_peer: bool,
    /// Verify that the certificate matches the host name.
    pub verify_host: bool,
    /// Upper bound for the whole exchange.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl From<&ClientOptions> for TransportOptions {
    fn from(options: &ClientOptions) -> Self {
        Self {
            verify_peer: options.verify_peer,
            verify_host: options.verify_host,
            timeout: options.timeout_duration(),
            user_agent: options.user_agent.clone(),
        }
    }
}

/// Where the bytes of an uploaded file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read from disk when the request is sent.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Vec<u8>),
}

/// A file sent as one part of a multipart body.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::transport::UploadFile;
///
/// let avatar = UploadFile::from_path("avatar", "assets/logo.png");
/// assert_eq!(avatar.file_name.as_deref(), Some("logo.png"));
///
/// let notes = UploadFile::from_bytes("file", "notes.txt", b"hello".to_vec());
/// assert_eq!(notes.field, "file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: Option<String>,
    /// File contents.
    pub source: FileSource,
}

impl UploadFile {
    /// Uploads the file at `path`, named after its last path component.
    pub fn from_path(field: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            field: field.into(),
            file_name,
            source: FileSource::Path(path),
        }
    }

    /// Uploads in-memory bytes under `file_name`.
    pub fn from_bytes(
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: Some(file_name.into()),
            source: FileSource::Bytes(bytes),
        }
    }
}

/// Body of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// Form fields and files encoded as `multipart/form-data`.
    Multipart {
        /// Plain text parts.
        fields: Vec<(String, String)>,
        /// File parts.
        files: Vec<UploadFile>,
    },
}

impl RequestBody {
    /// Returns the content type the body is encoded with.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
            Self::Multipart { .. } => Some(MULTIPART_CONTENT_TYPE),
        }
    }
}

/// A fully prepared request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    /// Request body.
    pub body: RequestBody,
    /// Final merged headers.
    pub headers: HeaderMapping,
    /// Connection settings.
    pub options: TransportOptions,
}

/// What the transport got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded body; `None` when the exchange carried no body at all.
    pub body: Option<Vec<u8>>,
    /// Response headers.
    pub headers: HeaderMapping,
}

impl RawResponse {
    /// Creates a response without headers.
    pub fn new(status: u16, body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            body,
            headers: HeaderMapping::new(),
        }
    }

    /// Creates a response declaring `Content-Type: application/json`.
    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, Some(body.as_bytes().to_vec()))
            .with_header("Content-Type", "application/json")
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Looks up a header, ignoring the case of its name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the response declares a JSON body.
    ///
    /// Media type parameters such as `charset` are ignored.
    pub fn is_json(&self) -> bool {
        self.header("Content-Type")
            .and_then(|value| value.split(';').next())
            .map(|media| media.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_detection() {
        assert!(RawResponse::json(200, "{}").is_json());
        assert!(RawResponse::new(200, None)
            .with_header("content-type", "Application/JSON; charset=utf-8")
            .is_json());
        assert!(!RawResponse::new(200, None)
            .with_header("Content-Type", "text/plain")
            .is_json());
        assert!(!RawResponse::new(200, None).is_json());
    }

    #[test]
    fn test_transport_options_from_client_options() {
        let options = ClientOptions {
            timeout: 5,
            verify_host: false,
            ..ClientOptions::default()
        };
        let transport = TransportOptions::from(&options);
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(transport.verify_peer);
        assert!(!transport.verify_host);
        assert_eq!(transport.user_agent, "gitlab-generic-client");
    }

    #[test]
    fn test_body_content_type() {
        assert_eq!(RequestBody::Empty.content_type(), None);
        assert_eq!(
            RequestBody::Form(vec![]).content_type(),
            Some("application/x-www-form-urlencoded")
        );
        let multipart = RequestBody::Multipart {
            fields: vec![],
            files: vec![UploadFile::from_bytes("file", "a.txt", vec![])],
        };
        assert_eq!(multipart.content_type(), Some("multipart/form-data"));
    }
}
