//! Scripted transport for exercising operations without a service.

use crate::client::Client;
use crate::config::{ClientConfig, Credentials};
use crate::error::BoxError;
use crate::paginate::RetryPolicy;
use crate::transport::Transport;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct Recorded {
    headers: http::HeaderMap,
    body: Value,
}

#[derive(Default)]
struct Script {
    responses: Mutex<VecDeque<(http::StatusCode, Bytes)>>,
    requests: Mutex<Vec<Recorded>>,
}

/// Replays canned responses in order and records every request it receives.
/// Fails the round trip once the script runs out.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Script>,
}

impl ScriptedTransport {
    /// `200 OK` responses with the given JSON bodies.
    pub(crate) fn new(bodies: impl IntoIterator<Item = Value>) -> Self {
        Self::with_responses(bodies.into_iter().map(|body| (http::StatusCode::OK, body)))
    }

    pub(crate) fn with_responses(
        responses: impl IntoIterator<Item = (http::StatusCode, Value)>,
    ) -> Self {
        let transport = Self::default();
        transport.script.responses.lock().unwrap().extend(
            responses
                .into_iter()
                .map(|(status, body)| (status, Bytes::from(body.to_string()))),
        );
        transport
    }

    pub(crate) fn with_raw_response(status: http::StatusCode, body: &'static str) -> Self {
        let transport = Self::default();
        transport
            .script
            .responses
            .lock()
            .unwrap()
            .push_back((status, Bytes::from_static(body.as_bytes())));
        transport
    }

    /// Client on this transport, with polling delays disabled.
    pub(crate) fn client(&self) -> Client {
        let config = ClientConfig {
            credentials: Credentials::new("AKID", "secret"),
            polling: RetryPolicy::default(),
            ..Default::default()
        };
        Client::with_transport(config, Arc::new(self.clone()))
    }

    pub(crate) fn bodies(&self) -> Vec<Value> {
        let requests = self.script.requests.lock().unwrap();
        requests.iter().map(|r| r.body.clone()).collect()
    }

    pub(crate) fn targets(&self) -> Vec<String> {
        self.headers()
            .iter()
            .map(|h| h["x-amz-target"].to_str().unwrap().to_owned())
            .collect()
    }

    pub(crate) fn headers(&self) -> Vec<http::HeaderMap> {
        let requests = self.script.requests.lock().unwrap();
        requests.iter().map(|r| r.headers.clone()).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        let (parts, body) = request.into_parts();
        self.script.requests.lock().unwrap().push(Recorded {
            headers: parts.headers,
            body: serde_json::from_slice(&body)?,
        });
        let (status, body) = self
            .script
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or("script exhausted")?;
        Ok(http::Response::builder().status(status).body(body)?)
    }
}
