//
//  gitlab-generic-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitLab Generic Client
//!
//! A small client for calling any endpoint of the GitLab REST API without a
//! typed binding per resource.
//!
//! ## Overview
//!
//! The path of a call is built from chained segments, each of them
//! percent-encoded. A terminal verb (`get`, `post`, `put`, `patch`, `delete`)
//! sends the request, decodes the JSON answer and turns error statuses into
//! [`ClientError`] values.
//!
//! ## Features
//!
//! - **Any Endpoint**: `projects/42/merge_requests` is three chained calls
//! - **Authentication**: private tokens, OAuth bearer tokens and sudo
//! - **Headers**: global and per-call headers that never replace credentials
//! - **Bodies**: query strings, URL-encoded forms and multipart uploads
//! - **Pluggable Transport**: swap the HTTP layer for tests or custom stacks
//!
//! ## Module Structure
//!
//! - [`api`]: The client, path building, request and response handling
//! - [`auth`]: Authentication modes and credential headers
//! - [`config`]: Client options and their TOML representation
//! - [`transport`]: The transport contract and its `reqwest` implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gitlab_generic_client::{AuthMode, ClientOptions, GitlabClient, Payload};
//!
//! # async fn example() -> Result<(), gitlab_generic_client::ClientError> {
//! let mut client = GitlabClient::new("https://gitlab.com/api/v4", ClientOptions::default())?;
//! client.authenticate("glpat-xxxx", AuthMode::HttpToken, None);
//!
//! // POST /projects/group%2Fproject/issues
//! let issue = client
//!     .segment_with("projects", ["group/project"])?
//!     .segment("issues")
//!     .post(Payload::new().param("title", "Broken pipeline"))
//!     .await?;
//!
//! if let Some(issue) = issue {
//!     println!("Created issue #{}", issue["iid"]);
//! }
//! # Ok(())
//! # }
//! ```

/// API client for GitLab.
///
/// Handles path building, header composition, request encoding and response
/// interpretation.
pub mod api;

/// Authentication modes and the headers they produce.
pub mod auth;

/// Client options.
///
/// Options can be built in code, from name/value overrides, or loaded from a
/// TOML file.
pub mod config;

/// HTTP transport abstraction.
pub mod transport;

/// Re-export of the main client and its request/error types.
pub use api::{ClientError, GitlabClient, HeaderMapping, Payload};

pub use auth::AuthMode;

/// Re-export of the client options.
pub use config::ClientOptions;

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::VERSION;
///
/// println!("gitlab-generic-client {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
