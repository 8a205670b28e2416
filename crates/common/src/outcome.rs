//! Tagged result of a verification call
//!
//! Success and failure are distinct variants, but both render to the single
//! display string the user sees.

use serde::Serialize;
use std::fmt;

use crate::responses::{OracleResponse, Reply};
use crate::Error;

/// Category of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// File or token absent; nothing was sent
    MissingInput,
    /// Connection, DNS, timeout or body read failure
    Transport,
    /// Server answered with a non-2xx status
    Status,
    /// Body could not be decoded against the endpoint schema
    Decode,
    /// Rejected by the liveness provider before sending
    Liveness,
    /// Local failure while preparing the request
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::MissingUploadInput => FailureKind::MissingInput,
            Error::Transport { .. } => FailureKind::Transport,
            Error::Status { .. } => FailureKind::Status,
            Error::Decode { .. } => FailureKind::Decode,
            Error::LivenessRejected { .. } => FailureKind::Liveness,
            _ => FailureKind::Local,
        };

        Failure {
            kind,
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one request/response transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome<T> {
    Success(Reply<T>),
    Failure(Failure),
}

impl<T> VerificationOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&Reply<T>> {
        match self {
            VerificationOutcome::Success(reply) => Some(reply),
            VerificationOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            VerificationOutcome::Success(_) => None,
            VerificationOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> std::result::Result<Reply<T>, Failure> {
        match self {
            VerificationOutcome::Success(reply) => Ok(reply),
            VerificationOutcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T: OracleResponse> VerificationOutcome<T> {
    /// The string surfaced to the user, whichever way the call went
    pub fn display_text(&self) -> String {
        match self {
            VerificationOutcome::Success(reply) => reply.summary(),
            VerificationOutcome::Failure(failure) => failure.message.clone(),
        }
    }

    /// Hand the display string to a caller-supplied callback
    pub fn notify<F: FnOnce(String)>(&self, on_result: F) {
        on_result(self.display_text());
    }
}

impl<T: OracleResponse> fmt::Display for VerificationOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl<T> From<crate::Result<Reply<T>>> for VerificationOutcome<T> {
    fn from(result: crate::Result<Reply<T>>) -> Self {
        match result {
            Ok(reply) => VerificationOutcome::Success(reply),
            Err(err) => VerificationOutcome::Failure(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{BiometricResponse, KycResponse};
    use serde_json::json;

    #[test]
    fn test_missing_input_failure() {
        let outcome: VerificationOutcome<BiometricResponse> =
            Err(Error::MissingUploadInput).into();

        assert!(!outcome.is_success());
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::MissingInput);
        assert_eq!(outcome.to_string(), "No file or token provided");
    }

    #[test]
    fn test_status_failure_keeps_code() {
        let outcome: VerificationOutcome<KycResponse> = Err(Error::Status {
            context: "KYC request failed".to_string(),
            status: 503,
            message: "HTTP 503 Service Unavailable".to_string(),
        })
        .into();

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Status);
        assert_eq!(failure.status, Some(503));
        assert_eq!(
            outcome.display_text(),
            "KYC request failed: HTTP 503 Service Unavailable"
        );
    }

    #[test]
    fn test_success_notifies_callback_once() {
        let reply: Reply<KycResponse> = Reply::from_text(r#"{"status":"verified"}"#).unwrap();
        let outcome = VerificationOutcome::Success(reply);

        let mut seen = Vec::new();
        outcome.notify(|text| seen.push(text));
        assert_eq!(seen, vec![r#"{"status":"verified"}"#.to_string()]);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome: VerificationOutcome<KycResponse> = Err(Error::Decode {
            context: "KYC request failed".to_string(),
            message: "expected value".to_string(),
        })
        .into();

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["kind"], "decode");
        assert_eq!(value["message"], "KYC request failed: expected value");
    }
}
