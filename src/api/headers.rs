//
//  gitlab-generic-client
//  api/headers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Header Composition
//!
//! Builds the header set of a single request from three layers:
//!
//! | Layer | Source | Precedence |
//! |-------|--------|------------|
//! | Configured | [`GitlabClient::set_headers`](crate::GitlabClient::set_headers) | lowest |
//! | Authentication | [`GitlabClient::authenticate`](crate::GitlabClient::authenticate) | middle |
//! | Per-call | [`Payload::header`](crate::api::Payload::header) | highest |
//!
//! The one exception to the table: a per-call header can never replace a
//! reserved authentication header (`PRIVATE-TOKEN`, `Authorization`, `SUDO`)
//! that the authentication layer currently sets.

use super::common::HeaderMapping;
use crate::auth::is_reserved_header;

/// Merges the three header layers of one request.
///
/// Names are compared ASCII case-insensitively when resolving collisions with
/// authentication headers; otherwise keys are kept as written.
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::api::common::HeaderMapping;
/// use gitlab_generic_client::api::headers::compose_headers;
///
/// let configured = HeaderMapping::from([
///     ("Authorization".to_string(), "stale".to_string()),
///     ("Accept".to_string(), "application/json".to_string()),
/// ]);
/// let authentication = HeaderMapping::from([
///     ("Authorization".to_string(), "Bearer token".to_string()),
/// ]);
/// let per_call = HeaderMapping::from([
///     ("Authorization".to_string(), "ignored".to_string()),
///     ("X-Trace".to_string(), "1".to_string()),
/// ]);
///
/// let merged = compose_headers(&configured, &authentication, &per_call);
/// assert_eq!(merged["Authorization"], "Bearer token");
/// assert_eq!(merged["Accept"], "application/json");
/// assert_eq!(merged["X-Trace"], "1");
/// ```
pub fn compose_headers(
    configured: &HeaderMapping,
    authentication: &HeaderMapping,
    per_call: &HeaderMapping,
) -> HeaderMapping {
    let mut merged = configured.clone();

    for (name, value) in authentication {
        remove_ignoring_case(&mut merged, name);
        merged.insert(name.clone(), value.clone());
    }

    for (name, value) in per_call {
        let guarded = is_reserved_header(name)
            && authentication
                .keys()
                .any(|auth| auth.eq_ignore_ascii_case(name));
        if guarded {
            continue;
        }
        remove_ignoring_case(&mut merged, name);
        merged.insert(name.clone(), value.clone());
    }

    merged
}

fn remove_ignoring_case(headers: &mut HeaderMapping, name: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
}
