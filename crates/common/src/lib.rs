//! Shared types for the HumanHash verification client
//!
//! Request entities, per-endpoint response schemas and the tagged outcome
//! returned by every verification call.

pub mod error;
pub mod outcome;
pub mod requests;
pub mod responses;

pub use error::{Error, Result};
pub use outcome::{Failure, FailureKind, VerificationOutcome};
pub use requests::{BiometricFile, BiometricUpload, KycRequest, VerifyZkpRequest, ZkpRequest};
pub use responses::{
    BiometricResponse, KycResponse, OracleResponse, Reply, VerifyZkpResponse, ZkpResponse,
};
