//
//  gitlab-generic-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic GitLab API Client
//!
//! This module provides the client used to address any GitLab REST resource
//! without a typed binding. Resource paths are composed one segment at a time,
//! then a terminal call sends the request and interprets the answer.
//!
//! ## Features
//!
//! - Path building through chained [`segment`](GitlabClient::segment) calls
//! - Private token, OAuth and sudo authentication
//! - Global and per-call headers with a fixed precedence
//! - Query string, form and multipart encoding of parameters
//! - Uniform error model with 404 URL enrichment

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::common::{ClientError, HeaderMapping};
use super::headers::compose_headers;
use super::path::{append_query, PathBuilder};
use super::request::{encode_parameters, form_encode, Payload};
use super::response::interpret;
use crate::auth::{authentication_headers, AuthMode};
use crate::config::ClientOptions;
use crate::transport::{HttpTransport, RequestBody, Transport, TransportOptions, TransportRequest};

/// Client for any resource of a GitLab REST API.
///
/// The client owns the pending path of the call chain being built. Every
/// terminal call (`get`, `post`, `put`, `patch`, `delete`) consumes and resets
/// it, whatever the outcome. Builder methods take `&mut self`, so one instance
/// serves one call chain at a time; clone the client to build chains
/// independently (clones share the transport).
///
/// # Creating a Client
///
/// ```rust,no_run
/// use gitlab_generic_client::{ClientOptions, GitlabClient};
///
/// let client = GitlabClient::new("https://gitlab.example.com/api/v4", ClientOptions::default())?;
/// assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
/// # Ok::<(), gitlab_generic_client::ClientError>(())
/// ```
///
/// # Making Requests
///
/// ```rust,no_run
/// use gitlab_generic_client::{AuthMode, ClientOptions, GitlabClient, Payload};
///
/// # async fn example() -> Result<(), gitlab_generic_client::ClientError> {
/// let mut client = GitlabClient::new("https://gitlab.example.com/api/v4", ClientOptions::default())?;
/// client.authenticate("glpat-xxxx", AuthMode::HttpToken, None);
///
/// // GET /projects/42/merge_requests?state=opened
/// let merge_requests = client
///     .segment_with("projects", [42])?
///     .segment("merge_requests")
///     .get(Payload::new().param("state", "opened"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitlabClient {
    /// Performs the HTTP exchanges
    transport: Arc<dyn Transport>,
    /// Absolute API root without trailing slash
    base_url: String,
    options: ClientOptions,
    /// Headers sent with every request
    headers: HeaderMapping,
    /// Headers derived from the last `authenticate` call
    auth_headers: HeaderMapping,
    path: PathBuilder,
    /// URL of the last dispatched request, consumed by 404 enrichment
    last_url: Option<String>,
}

impl GitlabClient {
    /// Creates a client using the default [`HttpTransport`].
    ///
    /// # Parameters
    ///
    /// * `base_url` - Absolute API root (e.g. `https://gitlab.com/api/v4`);
    ///   trailing slashes are removed
    /// * `options` - Client options
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `base_url` is not an
    /// absolute URL, or [`ClientError::Transport`] if the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&TransportOptions::from(&options))?;
        Self::with_transport(base_url, options, Arc::new(transport))
    }

    /// Creates a client that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `base_url` is not an
    /// absolute URL.
    pub fn with_transport(
        base_url: &str,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| {
            ClientError::invalid_argument(format!("invalid base URL \"{}\": {}", base_url, e))
        })?;

        Ok(Self {
            transport,
            base_url: base_url.to_string(),
            options,
            headers: HeaderMapping::new(),
            auth_headers: HeaderMapping::new(),
            path: PathBuilder::default(),
            last_url: None,
        })
    }

    /// Returns the API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Reads an option by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for unknown names.
    pub fn get_option(&self, name: &str) -> Result<Value, ClientError> {
        self.options.get(name)
    }

    /// Replaces the headers sent with every request.
    pub fn set_headers(&mut self, headers: HeaderMapping) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Returns the headers sent with every request.
    pub fn headers(&self) -> &HeaderMapping {
        &self.headers
    }

    /// Authenticates all following requests.
    ///
    /// Replaces any previous authentication. Mode names are converted
    /// leniently: an unrecognized name behaves like [`AuthMode::None`] and
    /// leaves requests anonymous. Parse the name with
    /// `str::parse::<AuthMode>()` first to reject unknown modes.
    ///
    /// # Parameters
    ///
    /// * `token` - Private or OAuth token
    /// * `mode` - An [`AuthMode`] or its name (`"HTTP"`, `"OAUTH"`, `"NONE"`)
    /// * `sudo` - User to impersonate, if any
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gitlab_generic_client::{AuthMode, ClientOptions, GitlabClient};
    ///
    /// let mut client = GitlabClient::new("https://gitlab.com/api/v4", ClientOptions::default())?;
    /// client.authenticate("oauth-token", AuthMode::OAuthToken, Some("jdoe"));
    /// assert_eq!(client.authentication_headers()["SUDO"], "jdoe");
    ///
    /// client.authenticate("ignored", "no-such-mode", None);
    /// assert!(client.authentication_headers().is_empty());
    /// # Ok::<(), gitlab_generic_client::ClientError>(())
    /// ```
    pub fn authenticate(
        &mut self,
        token: &str,
        mode: impl Into<AuthMode>,
        sudo: Option<&str>,
    ) -> &mut Self {
        self.auth_headers = authentication_headers(token, mode.into(), sudo);
        self
    }

    /// Returns the headers derived from the last `authenticate` call.
    pub fn authentication_headers(&self) -> &HeaderMapping {
        &self.auth_headers
    }

    /// Appends a path segment.
    pub fn segment(&mut self, name: &str) -> &mut Self {
        self.path.push(name);
        self
    }

    /// Appends a path segment followed by one segment per argument.
    ///
    /// `null` arguments are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] naming the segment if an
    /// argument is an array or an object. The pending path is left as it was.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gitlab_generic_client::{ClientOptions, GitlabClient};
    ///
    /// let mut client = GitlabClient::new("https://gitlab.com/api/v4", ClientOptions::default())?;
    /// client
    ///     .segment_with("projects", ["group/project"])?
    ///     .segment_with("repository", ["files", "README.md"])?;
    /// assert_eq!(
    ///     client.pending_path(),
    ///     "/projects/group%2Fproject/repository/files/README%2Emd"
    /// );
    /// # Ok::<(), gitlab_generic_client::ClientError>(())
    /// ```
    pub fn segment_with<I, A>(&mut self, name: &str, args: I) -> Result<&mut Self, ClientError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        self.path.push_with(name, args)?;
        Ok(self)
    }

    /// Returns the path built so far.
    pub fn pending_path(&self) -> &str {
        self.path.as_str()
    }

    /// Discards the path built so far.
    pub fn clear_path(&mut self) -> &mut Self {
        self.path.clear();
        self
    }

    /// Sends a `GET` request to the pending path.
    ///
    /// Parameters are sent as the query string. Returns the decoded body, or
    /// `None` when the response has no body.
    pub async fn get(&mut self, payload: Payload) -> Result<Option<Value>, ClientError> {
        self.request(Method::GET, payload).await
    }

    /// Sends a `POST` request to the pending path.
    pub async fn post(&mut self, payload: Payload) -> Result<Option<Value>, ClientError> {
        self.request(Method::POST, payload).await
    }

    /// Sends a `PUT` request to the pending path.
    pub async fn put(&mut self, payload: Payload) -> Result<Option<Value>, ClientError> {
        self.request(Method::PUT, payload).await
    }

    /// Sends a `PATCH` request to the pending path.
    pub async fn patch(&mut self, payload: Payload) -> Result<Option<Value>, ClientError> {
        self.request(Method::PATCH, payload).await
    }

    /// Sends a `DELETE` request to the pending path.
    ///
    /// Parameters are sent as the query string.
    pub async fn delete(&mut self, payload: Payload) -> Result<Option<Value>, ClientError> {
        self.request(Method::DELETE, payload).await
    }

    async fn request(
        &mut self,
        method: Method,
        payload: Payload,
    ) -> Result<Option<Value>, ClientError> {
        let mut path = self.path.take();
        let Payload {
            parameters,
            headers,
            files,
        } = payload;
        let fields = encode_parameters(&parameters);

        let body = if method == Method::GET || method == Method::DELETE {
            path = append_query(&path, &form_encode(&fields));
            RequestBody::Empty
        } else if !files.is_empty() {
            RequestBody::Multipart { fields, files }
        } else if !fields.is_empty() {
            RequestBody::Form(fields)
        } else {
            RequestBody::Empty
        };

        let url = format!("{}{}", self.base_url, path)
            .trim_end_matches('/')
            .to_string();
        self.last_url = Some(url.clone());

        debug!(%method, %url, "Dispatching request");

        let request = TransportRequest {
            method,
            url,
            body,
            headers: compose_headers(&self.headers, &self.auth_headers, &headers),
            options: TransportOptions::from(&self.options),
        };
        let response = self.transport.send(request).await?;

        interpret(response, &self.options, &mut self.last_url)
    }
}

impl fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitlabClient")
            .field("base_url", &self.base_url)
            .field("options", &self.options)
            .field("headers", &self.headers)
            .field("auth_headers", &self.auth_headers.keys().collect::<Vec<_>>())
            .field("pending_path", &self.path.as_str())
            .finish()
    }
}
