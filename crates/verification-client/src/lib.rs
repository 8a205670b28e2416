//! HumanHash Verification Client
//!
//! Sends KYC, zero-knowledge proof and biometric verification requests to the
//! oracle and the biometric API, one request per call.
//!
//! ## Endpoints
//!
//! - `POST /oracle/kyc` - KYC check for a human hash id
//! - `POST /oracle/zkp` - Submit a proof
//! - `POST /oracle/verify_zkp` - Verify a proof against a verifying key
//! - `POST /api/biometric/verify` - Multipart biometric upload with a bearer token
//! - `GET /health` - Health check, on both origins
//!
//! Every call yields a [`VerificationOutcome`]; its `Display` output is the
//! text shown to the user.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod providers;

pub use client::{VerificationClient, VerificationClientBuilder};
pub use config::ClientConfig;
pub use humanhash_common::{
    BiometricFile, BiometricResponse, BiometricUpload, Error, Failure, FailureKind, KycRequest,
    KycResponse, OracleResponse, Reply, Result, VerificationOutcome, VerifyZkpRequest,
    VerifyZkpResponse, ZkpRequest, ZkpResponse,
};
pub use providers::{AcceptAllLiveness, EncryptionProvider, LivenessCheck, PassthroughEncryption};
