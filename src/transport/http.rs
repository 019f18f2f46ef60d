//
//  gitlab-generic-client
//  transport/http.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `reqwest`-backed transport.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use super::{FileSource, RawResponse, RequestBody, Transport, TransportOptions, TransportRequest};
use crate::api::common::HeaderMapping;

/// Production [`Transport`] built on a pooled `reqwest` client.
///
/// TLS verification and the user agent are fixed when the transport is
/// built. Of the per-request [`TransportOptions`], only the timeout is
/// applied.
///
/// # Example
///
/// ```rust,no_run
/// use gitlab_generic_client::config::ClientOptions;
/// use gitlab_generic_client::transport::{HttpTransport, TransportOptions};
///
/// let options = ClientOptions { verify_peer: false, ..ClientOptions::default() };
/// let transport = HttpTransport::new(&TransportOptions::from(&options))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(options: &TransportOptions) -> Result<Self> {
        let http = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_peer)
            .danger_accept_invalid_hostnames(!options.verify_host)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<Option<RawResponse>> {
        let TransportRequest {
            method,
            url,
            body,
            headers,
            options,
        } = request;

        let mut builder = self
            .http
            .request(method, &url)
            .timeout(options.timeout);

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Body last so the multipart boundary is never overwritten.
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart { fields, files } => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for file in files {
                    let bytes = match file.source {
                        FileSource::Bytes(bytes) => bytes,
                        FileSource::Path(path) => tokio::fs::read(&path)
                            .await
                            .with_context(|| format!("Failed to read {}", path.display()))?,
                    };
                    let mut part = Part::bytes(bytes);
                    if let Some(file_name) = file.file_name {
                        part = part.file_name(file_name);
                    }
                    form = form.part(file.field, part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HeaderMapping = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(Some(RawResponse {
            status,
            body: Some(body.to_vec()),
            headers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builds_without_verification() {
        let options = TransportOptions {
            verify_peer: false,
            verify_host: false,
            timeout: Duration::from_secs(1),
            user_agent: "test-agent".to_string(),
        };
        assert!(HttpTransport::new(&options).is_ok());
    }
}
