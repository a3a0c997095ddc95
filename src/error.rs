//! Error types returned by every operation.

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building, sending or decoding an operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller's input was rejected before any request was built.
    #[error("validation error: {0}")]
    Validation(String),

    /// The client configuration cannot produce a valid request.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transport failed to complete the round trip.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with a non-success status and no error body.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// The HTTP status returned by the service.
        status: http::StatusCode,
        /// The raw response body, lossily decoded.
        body: String,
    },

    /// The service answered with a typed error (`__type` + `message`).
    #[error("service error {code}: {message}")]
    Service {
        /// The error code, with any `namespace#` prefix removed.
        code: String,
        /// The human readable message.
        message: String,
    },

    /// A request or response body was not valid JSON for its shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A typed item could not be converted to or from attributes.
    #[error("item conversion error: {0}")]
    Item(#[from] serde_dynamo::Error),

    /// A wire attribute value could not be decoded.
    #[error("attribute codec error: {0}")]
    Codec(String),

    /// The request could not be signed.
    #[error("signing error: {0}")]
    Signing(String),

    /// A paginated or polling operation hit its configured round limit.
    #[error("operation still incomplete after {rounds} rounds")]
    RoundsExhausted {
        /// Number of round trips that were issued.
        rounds: u32,
    },
}

/// Convenience result type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Returns `true` when the error was raised before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
