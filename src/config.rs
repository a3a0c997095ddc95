//! Client configuration.
//!
//! A [`ClientConfig`] is an explicit value owned by each
//! [`Client`](crate::client::Client); nothing is read from global state after
//! construction, so clients pointed at different endpoints or accounts can
//! run side by side.

use crate::paginate::RetryPolicy;

use std::{env, fmt};

/// Default `x-amz-target` prefix of the DynamoDB JSON protocol.
pub const DEFAULT_TARGET_PREFIX: &str = "DynamoDB_20120810";

/// Static signing credentials.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    /// The access key id.
    pub access_key_id: String,
    /// The secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl Credentials {
    /// Long-lived credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Configuration of a [`Client`](crate::client::Client).
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Service endpoint, e.g. `https://dynamodb.us-east-1.amazonaws.com`.
    pub endpoint: String,
    /// Region used in the signing scope.
    pub region: String,
    /// Service name used in the signing scope.
    pub service: String,
    /// Signing credentials.
    pub credentials: Credentials,
    /// Prefix of the `x-amz-target` header, before the operation name.
    pub target_prefix: String,
    /// Round limit and delay for paginated operations.
    pub pagination: RetryPolicy,
    /// Round limit and delay for table status polling.
    pub polling: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_owned(),
            region: "us-east-1".to_owned(),
            service: "dynamodb".to_owned(),
            credentials: Credentials::default(),
            target_prefix: DEFAULT_TARGET_PREFIX.to_owned(),
            pagination: RetryPolicy::default(),
            polling: RetryPolicy::polling(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `DYNAMODB_ENDPOINT`, `AWS_REGION` (falling back to
    /// `AWS_DEFAULT_REGION`), `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
    /// `AWS_SESSION_TOKEN`. Without an explicit endpoint, the regional
    /// endpoint is used when a region is set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let region = env::var("AWS_REGION").or_else(|_| env::var("AWS_DEFAULT_REGION"));
        if let Ok(v) = &region {
            config.region.clone_from(v);
            config.endpoint = format!("https://dynamodb.{v}.amazonaws.com");
        }
        if let Ok(v) = env::var("DYNAMODB_ENDPOINT") {
            config.endpoint = v;
        }
        if let Ok(v) = env::var("AWS_ACCESS_KEY_ID") {
            config.credentials.access_key_id = v;
        }
        if let Ok(v) = env::var("AWS_SECRET_ACCESS_KEY") {
            config.credentials.secret_access_key = v;
        }
        if let Ok(v) = env::var("AWS_SESSION_TOKEN") {
            config.credentials.session_token = Some(v);
        }

        config
    }

    /// Full `x-amz-target` value for an operation.
    #[must_use]
    pub fn target(&self, operation: &str) -> String {
        format!("{}.{operation}", self.target_prefix)
    }
}
