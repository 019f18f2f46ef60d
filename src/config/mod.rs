//
//  gitlab-generic-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client options with their defaults, plus loading from TOML.
//!
//! ## Recognized Options
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `user_agent` | string | `"gitlab-generic-client"` |
//! | `timeout` | integer (seconds) | `60` |
//! | `json_decode_to_array` | bool | `false` |
//! | `json_decode_options` | bitmask | numeric-check, force-object, unescaped slashes and unicode |
//! | `verify_peer` | bool | `true` |
//! | `verify_host` | bool | `true` |
//!
//! Any other key is accepted when options are built and kept verbatim, so
//! applications can carry their own settings next to the client's. Reading an
//! option that was never set is an error.
//!
//! ## Example Configuration File
//!
//! ```toml
//! user_agent = "release-bot"
//! timeout = 15
//! verify_peer = false
//! default_group = "infra"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_generic_client::config::ClientOptions;
//!
//! let options = ClientOptions::load("gitlab.toml")?;
//! println!("timeout: {}", options.get("timeout")?);
//! # Ok::<(), gitlab_generic_client::ClientError>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::ClientError;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "gitlab-generic-client";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Bitmask controlling how JSON bodies are normalized and re-encoded.
///
/// Bit values match PHP's `JSON_*` constants so existing settings can be
/// carried over unchanged.
///
/// | Flag | Bit | Effect |
/// |------|-----|--------|
/// | `FORCE_OBJECT` | 16 | Arrays become objects keyed `"0"`, `"1"`, ... |
/// | `NUMERIC_CHECK` | 32 | Numeric strings become numbers |
/// | `UNESCAPED_SLASHES` | 64 | `/` is not escaped when encoding |
/// | `UNESCAPED_UNICODE` | 256 | Non-ASCII characters are not escaped when encoding |
///
/// # Example
///
/// ```rust
/// use gitlab_generic_client::config::JsonDecodeOptions;
///
/// let opts = JsonDecodeOptions::NUMERIC_CHECK | JsonDecodeOptions::UNESCAPED_SLASHES;
/// assert!(opts.contains(JsonDecodeOptions::NUMERIC_CHECK));
/// assert!(!opts.contains(JsonDecodeOptions::FORCE_OBJECT));
/// assert_eq!(opts.bits(), 96);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonDecodeOptions(u32);

impl JsonDecodeOptions {
    /// No flags.
    pub const EMPTY: Self = Self(0);
    /// Arrays become index-keyed objects.
    pub const FORCE_OBJECT: Self = Self(16);
    /// Numeric strings become numbers.
    pub const NUMERIC_CHECK: Self = Self(32);
    /// Do not escape `/` when encoding.
    pub const UNESCAPED_SLASHES: Self = Self(64);
    /// Do not escape non-ASCII characters when encoding.
    pub const UNESCAPED_UNICODE: Self = Self(256);

    /// Builds a mask from raw bits. Unknown bits are kept.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for JsonDecodeOptions {
    fn default() -> Self {
        Self::NUMERIC_CHECK
            .union(Self::FORCE_OBJECT)
            .union(Self::UNESCAPED_SLASHES)
            .union(Self::UNESCAPED_UNICODE)
    }
}

impl BitOr for JsonDecodeOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for JsonDecodeOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Options of a [`GitlabClient`](crate::GitlabClient).
///
/// Recognized keys are typed fields; everything else lands in `extra`.
///
/// # Examples
///
/// ## Defaults
///
/// ```rust
/// use gitlab_generic_client::config::ClientOptions;
///
/// let options = ClientOptions::default();
/// assert_eq!(options.timeout, 60);
/// assert!(options.verify_peer);
/// assert!(!options.json_decode_to_array);
/// ```
///
/// ## Overrides
///
/// ```rust
/// use gitlab_generic_client::config::ClientOptions;
/// use serde_json::json;
///
/// let options = ClientOptions::from_overrides([
///     ("new_option", json!("value")),
///     ("timeout", json!(666)),
/// ])?;
/// assert_eq!(options.get("new_option")?, json!("value"));
/// assert_eq!(options.get("timeout")?, json!(666));
/// # Ok::<(), gitlab_generic_client::ClientError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// `User-Agent` header value.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Return bodies normalized per `json_decode_options` instead of as parsed.
    pub json_decode_to_array: bool,

    /// Normalization and encoding flags.
    pub json_decode_options: JsonDecodeOptions,

    /// Verify the server's TLS certificate chain.
    pub verify_peer: bool,

    /// Verify that the certificate matches the host name.
    pub verify_host: bool,

    /// Options the client does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            json_decode_to_array: false,
            json_decode_options: JsonDecodeOptions::default(),
            verify_peer: true,
            verify_host: true,
            extra: BTreeMap::new(),
        }
    }
}

impl ClientOptions {
    /// Merges `overrides` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if a recognized key is given a
    /// value of the wrong type (for example a string `timeout`).
    pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (key, value) in overrides {
            merged.insert(key.into(), value.into());
        }

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| ClientError::invalid_argument(format!("invalid option value: {}", e)))
    }

    /// Parses options from a TOML document, merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the document is not valid TOML or a
    /// recognized key has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, ClientError> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Reads an option by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for names that are neither
    /// recognized nor set in `extra`.
    pub fn get(&self, name: &str) -> Result<Value, ClientError> {
        let value = match name {
            "user_agent" => Value::from(self.user_agent.clone()),
            "timeout" => Value::from(self.timeout),
            "json_decode_to_array" => Value::from(self.json_decode_to_array),
            "json_decode_options" => Value::from(self.json_decode_options.bits()),
            "verify_peer" => Value::from(self.verify_peer),
            "verify_host" => Value::from(self.verify_host),
            other => {
                return self.extra.get(other).cloned().ok_or_else(|| {
                    ClientError::invalid_argument(format!("Undefined option called: \"{}\"", other))
                })
            }
        };
        Ok(value)
    }

    /// Returns the timeout as a [`Duration`].
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.get("user_agent").unwrap(), json!("gitlab-generic-client"));
        assert_eq!(options.get("timeout").unwrap(), json!(60));
        assert_eq!(options.get("json_decode_to_array").unwrap(), json!(false));
        assert_eq!(options.get("json_decode_options").unwrap(), json!(368));
        assert_eq!(options.get("verify_peer").unwrap(), json!(true));
        assert_eq!(options.get("verify_host").unwrap(), json!(true));
    }

    #[test]
    fn test_overrides() {
        let options =
            ClientOptions::from_overrides([("new_option", json!("value")), ("timeout", json!(666))])
                .unwrap();
        assert_eq!(options.get("new_option").unwrap(), json!("value"));
        assert_eq!(options.get("timeout").unwrap(), json!(666));
        assert_eq!(options.timeout_duration(), Duration::from_secs(666));
        assert!(options.verify_host);
    }

    #[test]
    fn test_override_with_wrong_type() {
        let err = ClientOptions::from_overrides([("timeout", json!("soon"))]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
    }

    #[test]
    fn test_unknown_option() {
        let err = ClientOptions::default().get("missing-option").unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
        assert!(err.to_string().contains("missing-option"));
    }

    #[test]
    fn test_from_toml() {
        let options = ClientOptions::from_toml_str(
            r#"
            user_agent = "release-bot"
            verify_peer = false
            json_decode_options = 32
            default_group = "infra"
            "#,
        )
        .unwrap();
        assert_eq!(options.user_agent, "release-bot");
        assert!(!options.verify_peer);
        assert_eq!(options.timeout, 60);
        assert_eq!(options.json_decode_options, JsonDecodeOptions::NUMERIC_CHECK);
        assert_eq!(options.get("default_group").unwrap(), json!("infra"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout = 5").unwrap();

        let options = ClientOptions::load(file.path()).unwrap();
        assert_eq!(options.timeout, 5);
    }

    #[test]
    fn test_load_errors() {
        let err = ClientOptions::load("/nonexistent/gitlab.toml").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientOptions::from_toml_str("timeout = \"later\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_flags() {
        let mut opts = JsonDecodeOptions::EMPTY;
        opts |= JsonDecodeOptions::FORCE_OBJECT;
        assert!(opts.contains(JsonDecodeOptions::FORCE_OBJECT));
        assert!(JsonDecodeOptions::default().contains(JsonDecodeOptions::UNESCAPED_UNICODE));
        assert_eq!(JsonDecodeOptions::from_bits(48).bits(), 48);
    }
}
