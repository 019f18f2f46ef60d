//
//  gitlab-generic-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the generic client for GitLab's REST API. No resource
//! is modelled: any endpoint is addressed by chaining path segments and
//! finishing with an HTTP verb.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: The [`GitlabClient`] and its terminal calls
//! - [`path`]: Percent-encoded path building
//! - [`headers`]: Header precedence between configured, authentication and per-call headers
//! - [`request`]: Per-call parameters, headers and files
//! - [`response`]: Status classification and body decoding
//! - [`common`]: Shared types (errors, header mappings)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_generic_client::api::{GitlabClient, Payload};
//! use gitlab_generic_client::config::ClientOptions;
//!
//! # async fn example() -> Result<(), gitlab_generic_client::api::ClientError> {
//! let mut client = GitlabClient::new("https://gitlab.com/api/v4", ClientOptions::default())?;
//! let version = client.segment("version").get(Payload::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as [`ClientError`] variants:
//!
//! - `NotFound`: 404, carrying the requested URL
//! - `Http`: any other status of 400 and above, or an `error` field in the body
//! - `Decode`: a JSON response that does not parse
//! - `NoResponse`: the transport produced nothing
//! - `Transport`: the exchange itself failed
//! - `InvalidArgument`: a path segment or option was rejected

/// Core client for GitLab APIs.
///
/// Provides the [`GitlabClient`] struct which handles:
/// - Path composition
/// - Authentication header injection
/// - Parameter encoding per HTTP verb
/// - Response interpretation
pub mod client;

/// Shared types: [`ClientError`] and [`HeaderMapping`].
pub mod common;

pub mod headers;

pub mod path;

pub mod request;

pub mod response;

/// Re-export of the main GitLab API client.
pub use client::GitlabClient;

/// Re-export of common API types.
pub use common::{ClientError, HeaderMapping};

pub use request::Payload;
