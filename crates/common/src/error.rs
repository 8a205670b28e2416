use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No file or token provided")]
    MissingUploadInput,

    #[error("{context}: {message}")]
    Transport { context: String, message: String },

    #[error("{context}: {message}")]
    Status {
        context: String,
        status: u16,
        message: String,
    },

    #[error("{context}: {message}")]
    Decode { context: String, message: String },

    #[error("{context}: {message}")]
    Prepare { context: String, message: String },

    #[error("{context}: liveness check rejected the sample")]
    LivenessRejected { context: String },

    /// Raised by an encryption provider that could not protect the filename
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Raised by a liveness provider that could not evaluate the sample
    #[error("Liveness check error: {0}")]
    Liveness(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status returned by the server, if the failure was a non-2xx answer
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message_is_fixed() {
        assert_eq!(
            Error::MissingUploadInput.to_string(),
            "No file or token provided"
        );
    }

    #[test]
    fn test_contextual_messages() {
        let err = Error::Transport {
            context: "KYC request failed".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "KYC request failed: connection refused");

        let err = Error::Status {
            context: "Verification failed".to_string(),
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert_eq!(err.to_string(), "Verification failed: Invalid token");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_liveness_rejection_message() {
        let err = Error::LivenessRejected {
            context: "Verification failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Verification failed: liveness check rejected the sample"
        );
    }

    #[test]
    fn test_provider_error_messages() {
        assert_eq!(
            Error::Encryption("vault offline".to_string()).to_string(),
            "Encryption error: vault offline"
        );
        assert_eq!(
            Error::Liveness("camera unavailable".to_string()).to_string(),
            "Liveness check error: camera unavailable"
        );
    }
}
