//! Client for the oracle and biometric verification endpoints

use humanhash_common::{
    BiometricFile, BiometricResponse, BiometricUpload, Error, KycRequest, KycResponse,
    OracleResponse, Reply, Result, VerificationOutcome, VerifyZkpRequest, VerifyZkpResponse,
    ZkpRequest, ZkpResponse,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::endpoints;
use crate::providers::{
    AcceptAllLiveness, EncryptionProvider, LivenessCheck, PassthroughEncryption,
};

const KYC_CONTEXT: &str = "KYC request failed";
const ZKP_CONTEXT: &str = "ZKP request failed";
const VERIFY_ZKP_CONTEXT: &str = "ZKP verification failed";
const BIOMETRIC_CONTEXT: &str = "Verification failed";

/// Longest slice of a non-JSON error body quoted back to the user
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Client for the verification endpoints
///
/// Every operation sends exactly one request and never retries. The client
/// holds no mutable state, so clones can be used from concurrent tasks.
#[derive(Clone)]
pub struct VerificationClient {
    config: ClientConfig,
    client: reqwest::Client,
    encryption: Arc<dyn EncryptionProvider>,
    liveness: Arc<dyn LivenessCheck>,
}

impl VerificationClient {
    /// Create a client with the default (no-op) security providers
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> VerificationClientBuilder {
        VerificationClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the oracle for a KYC check of a human hash id
    pub async fn request_kyc(&self, human_hash_id: &str) -> VerificationOutcome<KycResponse> {
        self.submit_kyc(&KycRequest::new(human_hash_id)).await
    }

    pub async fn submit_kyc(&self, request: &KycRequest) -> VerificationOutcome<KycResponse> {
        let url = self.config.oracle_endpoint(endpoints::KYC);
        self.post_json::<_, KycResponse>(&url, KYC_CONTEXT, request)
            .await
            .into()
    }

    /// Submit a zero-knowledge proof for a human hash id
    pub async fn request_zkp(
        &self,
        human_hash_id: &str,
        proof: &str,
    ) -> VerificationOutcome<ZkpResponse> {
        self.submit_zkp(&ZkpRequest::new(human_hash_id, proof)).await
    }

    pub async fn submit_zkp(&self, request: &ZkpRequest) -> VerificationOutcome<ZkpResponse> {
        let url = self.config.oracle_endpoint(endpoints::ZKP);
        self.post_json::<_, ZkpResponse>(&url, ZKP_CONTEXT, request)
            .await
            .into()
    }

    /// Ask the oracle to verify a proof against a verifying key
    pub async fn verify_zkp(
        &self,
        human_hash_id: &str,
        proof: &str,
        verifying_key: &str,
    ) -> VerificationOutcome<VerifyZkpResponse> {
        self.submit_verify_zkp(&VerifyZkpRequest::new(human_hash_id, proof, verifying_key))
            .await
    }

    pub async fn submit_verify_zkp(
        &self,
        request: &VerifyZkpRequest,
    ) -> VerificationOutcome<VerifyZkpResponse> {
        let url = self.config.oracle_endpoint(endpoints::VERIFY_ZKP);
        self.post_json::<_, VerifyZkpResponse>(&url, VERIFY_ZKP_CONTEXT, request)
            .await
            .into()
    }

    /// Upload a biometric sample for verification
    ///
    /// Nothing is sent when the file or the token is missing.
    pub async fn upload_biometric(
        &self,
        file: Option<BiometricFile>,
        token: Option<&str>,
    ) -> VerificationOutcome<BiometricResponse> {
        self.submit_biometric(&BiometricUpload::new(file, token.map(str::to_string)))
            .await
    }

    pub async fn submit_biometric(
        &self,
        upload: &BiometricUpload,
    ) -> VerificationOutcome<BiometricResponse> {
        self.send_biometric(upload).await.into()
    }

    /// Check if the oracle is reachable and healthy
    pub async fn oracle_health(&self) -> Result<bool> {
        let url = self.config.oracle_endpoint(endpoints::HEALTH);
        self.health_check(&url, "Oracle health check failed").await
    }

    /// Check if the biometric API is reachable and healthy
    pub async fn biometric_health(&self) -> Result<bool> {
        let url = self.config.biometric_endpoint(endpoints::HEALTH);
        self.health_check(&url, "Biometric API health check failed")
            .await
    }

    async fn post_json<B, T>(&self, url: &str, context: &str, body: &B) -> Result<Reply<T>>
    where
        B: Serialize + ?Sized,
        T: OracleResponse,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(context, &e))
            .inspect_err(|e| warn!("{}", e))?;

        decode_reply(url, context, response).await
    }

    async fn send_biometric(&self, upload: &BiometricUpload) -> Result<Reply<BiometricResponse>> {
        let Some((file, token)) = upload.ready() else {
            warn!("Biometric upload skipped: file or token missing");
            return Err(Error::MissingUploadInput);
        };

        let live = self
            .liveness
            .is_live(&file.bytes, file.content_type.as_deref())
            .await
            .map_err(|e| prepare_error(BIOMETRIC_CONTEXT, e))?;
        if !live {
            warn!("Liveness check rejected {}", file.filename);
            return Err(Error::LivenessRejected {
                context: BIOMETRIC_CONTEXT.to_string(),
            });
        }

        let filename = self
            .encryption
            .encrypt_filename(&file.filename, &self.config.vault_key_id)
            .map_err(|e| prepare_error(BIOMETRIC_CONTEXT, e))?;

        let mut part = Part::bytes(file.bytes.clone()).file_name(filename);
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type).map_err(|e| Error::Prepare {
                context: BIOMETRIC_CONTEXT.to_string(),
                message: e.to_string(),
            })?;
        }
        let form = Form::new().part(endpoints::BIOMETRIC_FIELD, part);

        let url = self.config.biometric_endpoint(endpoints::BIOMETRIC_VERIFY);
        debug!("POST {} ({} bytes)", url, file.bytes.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(BIOMETRIC_CONTEXT, &e))
            .inspect_err(|e| warn!("{}", e))?;

        decode_reply(&url, BIOMETRIC_CONTEXT, response).await
    }

    async fn health_check(&self, url: &str, context: &str) -> Result<bool> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(context, &e))?;

        Ok(response.status().is_success())
    }
}

/// Builder for [`VerificationClient`] with custom security providers
pub struct VerificationClientBuilder {
    config: ClientConfig,
    encryption: Arc<dyn EncryptionProvider>,
    liveness: Arc<dyn LivenessCheck>,
}

impl VerificationClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            encryption: Arc::new(PassthroughEncryption),
            liveness: Arc::new(AcceptAllLiveness),
        }
    }

    pub fn encryption(mut self, provider: impl EncryptionProvider + 'static) -> Self {
        self.encryption = Arc::new(provider);
        self
    }

    pub fn liveness(mut self, provider: impl LivenessCheck + 'static) -> Self {
        self.liveness = Arc::new(provider);
        self
    }

    pub fn build(self) -> Result<VerificationClient> {
        let config = self.config.normalized();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::Error::new(e).context("Failed to build HTTP client"))?;

        Ok(VerificationClient {
            config,
            client,
            encryption: self.encryption,
            liveness: self.liveness,
        })
    }
}

async fn decode_reply<T: OracleResponse>(
    url: &str,
    context: &str,
    response: reqwest::Response,
) -> Result<Reply<T>> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(context, &e))?;

    if !status.is_success() {
        let err = Error::Status {
            context: context.to_string(),
            status: status.as_u16(),
            message: status_message(status, &bytes),
        };
        warn!("{} answered {}: {}", url, status, err);
        return Err(err);
    }

    let decode = |message: String| Error::Decode {
        context: context.to_string(),
        message,
    };
    let text = String::from_utf8(bytes.to_vec()).map_err(|e| decode(e.to_string()))?;
    let reply = Reply::from_text(text).map_err(|e| decode(e.to_string()))?;

    info!("{} answered {}", url, status);

    Ok(reply)
}

/// Human-readable reason for a non-2xx answer
///
/// Prefers a non-blank `message` or `error` field of a JSON body, then falls
/// back to the status line plus whatever text the server sent.
fn status_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(text)) = fields.get(key) {
                if !text.trim().is_empty() {
                    return text.clone();
                }
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {}", status)
    } else {
        let excerpt: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("HTTP {}: {}", status, excerpt)
    }
}

fn transport_error(context: &str, err: &reqwest::Error) -> Error {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    Error::Transport {
        context: context.to_string(),
        message,
    }
}

fn prepare_error(context: &str, err: Error) -> Error {
    Error::Prepare {
        context: context.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig {
            oracle_url: "http://localhost:3003/".to_string(),
            ..ClientConfig::default()
        };
        let client = VerificationClient::new(config).unwrap();
        assert_eq!(client.config().oracle_url, "http://localhost:3003");
    }

    #[test]
    fn test_status_message_prefers_message_field() {
        let body = br#"{"message":"Invalid token","error":"unauthorized"}"#;
        assert_eq!(
            status_message(reqwest::StatusCode::UNAUTHORIZED, body),
            "Invalid token"
        );
    }

    #[test]
    fn test_status_message_falls_back_to_error_field() {
        let body = br#"{"error":"Unknown human hash id"}"#;
        assert_eq!(
            status_message(reqwest::StatusCode::NOT_FOUND, body),
            "Unknown human hash id"
        );
    }

    #[test]
    fn test_status_message_skips_blank_fields() {
        let body = br#"{"message":"","error":"Unknown human hash id"}"#;
        assert_eq!(
            status_message(reqwest::StatusCode::NOT_FOUND, body),
            "Unknown human hash id"
        );

        let body = br#"{"message":"  ","error":""}"#;
        assert_eq!(
            status_message(reqwest::StatusCode::BAD_REQUEST, body),
            r#"HTTP 400 Bad Request: {"message":"  ","error":""}"#
        );
    }

    #[test]
    fn test_status_message_uses_status_line() {
        assert_eq!(
            status_message(reqwest::StatusCode::SERVICE_UNAVAILABLE, b""),
            "HTTP 503 Service Unavailable"
        );
        assert_eq!(
            status_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, b"boom\n"),
            "HTTP 500 Internal Server Error: boom"
        );
    }

    #[test]
    fn test_status_message_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let message = status_message(reqwest::StatusCode::BAD_GATEWAY, body.as_bytes());
        assert_eq!(message.len(), "HTTP 502 Bad Gateway: ".len() + MAX_ERROR_BODY_CHARS);
    }
}
