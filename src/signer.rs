//! Request signing.
//!
//! The client fills in every header of a request, then asks a [`Signer`] for
//! the `Authorization` value. [`SigV4Signer`] implements AWS Signature
//! Version 4:
//!
//! ```text
//! CanonicalRequest = Method \n CanonicalURI \n CanonicalQuery \n
//!                    CanonicalHeaders \n\n SignedHeaders \n Hex(SHA256(Body))
//! StringToSign     = AWS4-HMAC-SHA256 \n Timestamp \n Scope \n Hex(SHA256(CanonicalRequest))
//! Scope            = Date/Region/Service/aws4_request
//! ```

use crate::config::{ClientConfig, Credentials};
use crate::error::{Error, Result};

use bytes::Bytes;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Header carrying the ISO-8601 basic timestamp the signature is bound to.
pub const AMZ_DATE: &str = "x-amz-date";

/// Computes the `Authorization` header of a fully populated request.
pub trait Signer: Send + Sync {
    /// Returns the `Authorization` header value for the request.
    fn authorization(&self, request: &http::Request<Bytes>) -> Result<String>;
}

/// AWS Signature Version 4 signer.
#[derive(Clone, Debug)]
pub struct SigV4Signer {
    credentials: Credentials,
    region: String,
    service: String,
}

impl SigV4Signer {
    /// Signer for the given credentials and scope.
    pub fn new(
        credentials: Credentials,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Signer using the credentials, region and service of a client config.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.credentials.clone(),
            config.region.clone(),
            config.service.clone(),
        )
    }
}

impl Signer for SigV4Signer {
    fn authorization(&self, request: &http::Request<Bytes>) -> Result<String> {
        let timestamp = request
            .headers()
            .get(AMZ_DATE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Signing(format!("missing {AMZ_DATE} header")))?;
        let date = timestamp
            .get(..8)
            .ok_or_else(|| Error::Signing(format!("malformed timestamp {timestamp:?}")))?;

        let headers = signed_headers(request)?;
        let signed_names = headers.keys().map(String::as_str).collect::<Vec<_>>().join(";");
        let canonical_headers = headers
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join("\n");
        let payload_hash = hex::encode(Sha256::digest(request.body()));
        let canonical_request = format!(
            "{}\n{}\n{}\n{canonical_headers}\n\n{signed_names}\n{payload_hash}",
            request.method(),
            canonical_uri(request.uri().path()),
            canonical_query_string(request.uri().query().unwrap_or_default()),
        );
        debug!(%canonical_request, "built canonical request");

        let scope = format!("{date}/{}/{}/aws4_request", self.region, self.service);
        let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = build_string_to_sign(timestamp, &scope, &canonical_hash);
        let signing_key = derive_signing_key(
            &self.credentials.secret_access_key,
            date,
            &self.region,
            &self.service,
        );
        let signature = compute_signature(&signing_key, &string_to_sign);

        Ok(format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_names}, Signature={signature}",
            self.credentials.access_key_id
        ))
    }
}

/// `host`, `content-type` and every `x-amz-*` header, lowercased, sorted,
/// values trimmed with inner whitespace collapsed.
fn signed_headers(request: &http::Request<Bytes>) -> Result<BTreeMap<String, String>> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in request.headers() {
        let name = name.as_str();
        if !(name == "host" || name == "content-type" || name.starts_with("x-amz-")) {
            continue;
        }
        let value = value
            .to_str()
            .map_err(|e| Error::Signing(format!("header {name} is not ASCII: {e}")))?;
        let value = collapse_whitespace(value.trim());
        headers
            .entry(name.to_owned())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    Ok(headers)
}

fn canonical_uri(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

fn canonical_query_string(query: &str) -> String {
    let mut params: Vec<(&str, &str)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| param.split_once('=').unwrap_or((param, "")))
        .collect();
    params.sort_unstable();
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}

fn build_string_to_sign(timestamp: &str, scope: &str, canonical_hash: &str) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{scope}\n{canonical_hash}")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn compute_signature(signing_key: &[u8], string_to_sign: &str) -> String {
    hex::encode(hmac_sha256(signing_key, string_to_sign.as_bytes()))
}
