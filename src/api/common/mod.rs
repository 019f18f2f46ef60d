//
//  gitlab-generic-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common types shared by every layer of the client
//!
//! This module provides the error type returned by all client operations and
//! the header mapping type passed between the header composer and the
//! transport.
//!
//! # Example
//!
//! ```rust
//! use gitlab_generic_client::api::common::ClientError;
//!
//! fn describe(result: Result<(), ClientError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(ClientError::NotFound { url, .. }) => format!("missing: {}", url),
//!         Err(e) => match e.status() {
//!             Some(status) => format!("http {}", status),
//!             None => e.to_string(),
//!         },
//!     }
//! }
//!
//! assert_eq!(describe(Err(ClientError::NoResponse)), "No response");
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Header name to header value mapping.
///
/// Keys are kept exactly as the caller wrote them; the composer only compares
/// names case-insensitively when resolving authentication collisions.
pub type HeaderMapping = BTreeMap<String, String>;

/// Root error type for every client operation.
///
/// Every failure the client can report is a variant of this enum, so callers
/// can either propagate it wholesale or branch on the specific variant.
///
/// # Variants
///
/// | Variant | Raised when | HTTP Status |
/// |---------|-------------|-------------|
/// | `InvalidArgument` | Non-scalar path argument, unknown option, bad base URL | N/A |
/// | `Config` | A TOML options file cannot be read or parsed | N/A |
/// | `NoResponse` | The transport produced no response at all | N/A |
/// | `Transport` | The transport failed (DNS, TLS, refused, timeout) | N/A |
/// | `Decode` | A JSON response body is malformed | N/A |
/// | `NotFound` | The API answered 404 | 404 |
/// | `Http` | Any other error status, or an `error` field in the body | status |
///
/// # Notes
///
/// - The status code is available as data through [`ClientError::status`]
/// - Nothing is retried by the client; retry policy belongs to the caller
#[derive(Error, Debug)]
pub enum ClientError {
    /// A caller supplied an argument the client cannot use.
    ///
    /// Raised synchronously at the call site.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An options file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The transport returned without any response object.
    #[error("No response")]
    NoResponse,

    /// The transport itself failed before an HTTP response was available.
    #[error("Transport failure: {0}")]
    Transport(#[from] anyhow::Error),

    /// The response declared a JSON content type but the body did not parse.
    #[error("Unable to decode json response")]
    Decode(#[source] serde_json::Error),

    /// The requested resource does not exist (HTTP 404).
    ///
    /// # Fields
    ///
    /// * `url` - The absolute URL that was requested
    /// * `message` - The message reported by the API, if any
    #[error(
        "Page not found : {url}{}",
        .message.as_deref().map(|m| format!(" / {}", m)).unwrap_or_default()
    )]
    NotFound {
        /// The absolute URL that was requested.
        url: String,
        /// The message reported by the API, if any.
        message: Option<String>,
    },

    /// The API reported an error.
    ///
    /// Either the status was 400 or above, or the body carried an `error`
    /// field.
    #[error("{status} - {message}")]
    Http {
        /// The HTTP status code of the response.
        status: u16,
        /// The error text extracted from the body (possibly empty).
        message: String,
    },
}

impl ClientError {
    /// Returns the HTTP status code attached to this error, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gitlab_generic_client::api::common::ClientError;
    ///
    /// let err = ClientError::Http { status: 403, message: "forbidden".to_string() };
    /// assert_eq!(err.status(), Some(403));
    /// assert_eq!(ClientError::NoResponse.status(), None);
    /// ```
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
