//
//  gitlab-generic-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Computes the authentication headers attached to every request.
//!
//! ## Supported Authentication Modes
//!
//! - **Private token** ([`AuthMode::HttpToken`]): personal, project or
//!   impersonation access token sent as `PRIVATE-TOKEN`.
//! - **OAuth token** ([`AuthMode::OAuthToken`]): token issued by GitLab's OAuth
//!   provider, sent as `Authorization: Bearer <token>`.
//! - **None** ([`AuthMode::None`]): anonymous requests.
//!
//! Either token mode may additionally impersonate another user through the
//! `SUDO` header (administrator tokens only).
//!
//! ## Example
//!
//! ```rust
//! use gitlab_generic_client::auth::{authentication_headers, AuthMode};
//!
//! let headers = authentication_headers("glpat-xxxx", AuthMode::OAuthToken, Some("jdoe"));
//! assert_eq!(headers["Authorization"], "Bearer glpat-xxxx");
//! assert_eq!(headers["SUDO"], "jdoe");
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::api::common::{ClientError, HeaderMapping};

/// Header carrying a private access token.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Header carrying an OAuth bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header selecting the user to impersonate.
pub const SUDO_HEADER: &str = "SUDO";

/// Header names owned by the authentication layer.
pub const RESERVED_HEADERS: [&str; 3] = [PRIVATE_TOKEN_HEADER, AUTHORIZATION_HEADER, SUDO_HEADER];

/// Returns `true` if `name` is one of [`RESERVED_HEADERS`], ignoring ASCII case.
pub fn is_reserved_header(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// How requests are authenticated.
///
/// The string names match the mode constants used by GitLab client libraries:
///
/// | Mode | Name |
/// |------|------|
/// | `None` | `"NONE"` |
/// | `HttpToken` | `"HTTP"` |
/// | `OAuthToken` | `"OAUTH"` |
///
/// Converting with [`From<&str>`] is lenient: an unrecognized name becomes
/// `None` and clears the credentials. Use [`str::parse`] to reject unknown
/// names instead.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::auth::AuthMode;
///
/// assert_eq!(AuthMode::from("OAUTH"), AuthMode::OAuthToken);
/// assert_eq!(AuthMode::from("bogus-mode"), AuthMode::None);
/// assert!("bogus-mode".parse::<AuthMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMode {
    /// No authentication headers.
    #[default]
    None,
    /// `PRIVATE-TOKEN: <token>`
    HttpToken,
    /// `Authorization: Bearer <token>`
    OAuthToken,
}

impl AuthMode {
    /// Name of [`AuthMode::None`].
    pub const NONE: &'static str = "NONE";
    /// Name of [`AuthMode::HttpToken`].
    pub const HTTP: &'static str = "HTTP";
    /// Name of [`AuthMode::OAuthToken`].
    pub const OAUTH: &'static str = "OAUTH";

    /// Returns the mode's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => Self::NONE,
            Self::HttpToken => Self::HTTP,
            Self::OAuthToken => Self::OAUTH,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::NONE => Ok(Self::None),
            Self::HTTP => Ok(Self::HttpToken),
            Self::OAUTH => Ok(Self::OAuthToken),
            other => Err(ClientError::invalid_argument(format!(
                "unknown authentication mode \"{}\"",
                other
            ))),
        }
    }
}

impl From<&str> for AuthMode {
    fn from(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(mode = name, "Unrecognized authentication mode, sending anonymous requests");
            Self::None
        })
    }
}

impl From<&String> for AuthMode {
    fn from(name: &String) -> Self {
        Self::from(name.as_str())
    }
}

/// Computes the authentication headers for a token and mode.
///
/// The result always replaces the previous authentication headers; it is never
/// merged with them. With [`AuthMode::None`] the token and sudo identity are
/// ignored and the mapping is empty.
pub fn authentication_headers(token: &str, mode: AuthMode, sudo: Option<&str>) -> HeaderMapping {
    let mut headers = HeaderMapping::new();

    match mode {
        AuthMode::None => return headers,
        AuthMode::HttpToken => {
            headers.insert(PRIVATE_TOKEN_HEADER.to_string(), token.to_string());
        }
        AuthMode::OAuthToken => {
            headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
        }
    }

    if let Some(sudo) = sudo {
        headers.insert(SUDO_HEADER.to_string(), sudo.to_string());
    }

    headers
}
