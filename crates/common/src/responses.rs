//! Response schemas, one per endpoint
//!
//! Each schema declares only the fields the client relies on; anything else
//! the server sends is kept in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded response body of a verification endpoint
pub trait OracleResponse: DeserializeOwned {
    /// Text shown to the user for a successful exchange.
    ///
    /// Defaults to the body text exactly as the server sent it.
    fn summary(&self, raw: &str) -> String {
        raw.trim().to_string()
    }
}

/// Successful reply: the decoded payload, the parsed body and its original text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply<T> {
    pub payload: T,
    pub body: Value,
    /// Body text as received; numbers keep their original spelling and precision
    #[serde(skip)]
    pub raw: String,
}

impl<T: OracleResponse> Reply<T> {
    /// Decode a response body against the endpoint schema
    pub fn from_text(raw: impl Into<String>) -> serde_json::Result<Self> {
        let raw = raw.into();
        let body: Value = serde_json::from_str(&raw)?;
        let payload: T = serde_json::from_value(body.clone())?;
        Ok(Self { payload, body, raw })
    }

    pub fn summary(&self) -> String {
        self.payload.summary(&self.raw)
    }
}

/// Answer of `POST /oracle/kyc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycResponse {
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OracleResponse for KycResponse {}

/// Answer of `POST /oracle/zkp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZkpResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub proof: Option<String>,
    #[serde(default)]
    pub verifying_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OracleResponse for ZkpResponse {}

/// Answer of `POST /oracle/verify_zkp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyZkpResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OracleResponse for VerifyZkpResponse {}

/// Answer of `POST /api/biometric/verify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricResponse {
    pub message: String,
}

impl OracleResponse for BiometricResponse {
    fn summary(&self, _raw: &str) -> String {
        self.message.clone()
    }
}
