//! The client: request envelope, round trip and response decoding.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::signer::{AMZ_DATE, SigV4Signer, Signer};
use crate::transport::Transport;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderValue, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, sync::Arc};
use tracing::debug;

/// Content type of the JSON protocol.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

const TARGET_HEADER: &str = "x-amz-target";
const SECURITY_TOKEN_HEADER: &str = "x-amz-security-token";

/// Entry point for every operation.
///
/// Cloning is cheap; clones share configuration, transport and signer.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, ClientConfig, table};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new(ClientConfig::from_env());
/// let tables = table::list_tables::ListTables::default().send(&client).await?;
/// # let _ = tables;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn Signer>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client talking HTTP through `reqwest`, signing with SigV4.
    #[cfg(feature = "reqwest")]
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(
            config,
            Arc::new(crate::transport::ReqwestTransport::default()),
        )
    }

    /// Client on a custom transport, signing with SigV4.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let signer = Arc::new(SigV4Signer::from_config(&config));
        Self {
            config: Arc::new(config),
            transport,
            signer,
        }
    }

    /// Replaces the signer.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = signer;
        self
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the signed request for one operation call.
    pub(crate) fn build_request(
        &self,
        operation: &str,
        body: Bytes,
        now: DateTime<Utc>,
    ) -> Result<http::Request<Bytes>> {
        let uri: http::Uri = self
            .config
            .endpoint
            .parse()
            .map_err(|e| Error::Config(format!("invalid endpoint {:?}: {e}", self.config.endpoint)))?;
        let host = uri
            .authority()
            .map(|authority| authority.as_str().to_owned())
            .ok_or_else(|| Error::Config(format!("endpoint {:?} has no host", self.config.endpoint)))?;
        let mut request = http::Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header(header::HOST, host)
            .header(header::DATE, now.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
            .header(AMZ_DATE, now.format("%Y%m%dT%H%M%SZ").to_string())
            .header(TARGET_HEADER, self.config.target(operation))
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header(header::CONTENT_LENGTH, body.len())
            .body(body)
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(token) = &self.config.credentials.session_token {
            let token = HeaderValue::from_str(token)
                .map_err(|e| Error::Config(format!("invalid session token: {e}")))?;
            request.headers_mut().insert(SECURITY_TOKEN_HEADER, token);
        }
        let authorization = self.signer.authorization(&request)?;
        let authorization =
            HeaderValue::from_str(&authorization).map_err(|e| Error::Signing(e.to_string()))?;
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, authorization);
        Ok(request)
    }

    /// One round trip: encode, sign, send, decode.
    pub(crate) async fn call<I, O>(&self, operation: &str, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let body = Bytes::from(serde_json::to_vec(input)?);
        debug!(operation, bytes = body.len(), "sending request");
        let request = self.build_request(operation, body, Utc::now())?;
        let response = self
            .transport
            .send(request)
            .await
            .map_err(Error::Transport)?;
        let status = response.status();
        debug!(operation, %status, "received response");
        decode_response(status, response.body())
    }
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "__type")]
    kind: String,
    #[serde(default, alias = "Message")]
    message: String,
}

fn service_error(body: &[u8]) -> Option<Error> {
    let parsed: ServiceErrorBody = serde_json::from_slice(body).ok()?;
    let code = parsed
        .kind
        .rsplit_once('#')
        .map_or(parsed.kind.as_str(), |(_, code)| code)
        .to_owned();
    Some(Error::Service {
        code,
        message: parsed.message,
    })
}

fn decode_response<O: DeserializeOwned>(status: http::StatusCode, body: &[u8]) -> Result<O> {
    if !status.is_success() {
        return Err(service_error(body).unwrap_or_else(|| Error::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }));
    }
    serde_json::from_slice(body).map_err(|e| service_error(body).unwrap_or(Error::Json(e)))
}
