//! Pluggable security capabilities for biometric uploads
//!
//! Real encryption and liveness detection live outside this crate. The
//! defaults here change nothing and accept every sample.

use async_trait::async_trait;
use humanhash_common::Result;

/// Protects the filename sent with a biometric sample
pub trait EncryptionProvider: Send + Sync {
    /// Return the filename to put on the multipart part
    fn encrypt_filename(&self, filename: &str, vault_key_id: &str) -> Result<String>;
}

/// Leaves filenames untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEncryption;

impl EncryptionProvider for PassthroughEncryption {
    fn encrypt_filename(&self, filename: &str, _vault_key_id: &str) -> Result<String> {
        Ok(filename.to_string())
    }
}

/// Decides whether a biometric sample comes from a live subject
#[async_trait]
pub trait LivenessCheck: Send + Sync {
    async fn is_live(&self, sample: &[u8], content_type: Option<&str>) -> Result<bool>;
}

/// Accepts every sample
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllLiveness;

#[async_trait]
impl LivenessCheck for AcceptAllLiveness {
    async fn is_live(&self, _sample: &[u8], _content_type: Option<&str>) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_keeps_filename() {
        let name = PassthroughEncryption
            .encrypt_filename("face.png", "vault-key")
            .unwrap();
        assert_eq!(name, "face.png");
    }

    #[tokio::test]
    async fn test_accept_all_liveness() {
        assert!(AcceptAllLiveness.is_live(&[], None).await.unwrap());
        assert!(AcceptAllLiveness
            .is_live(&[1, 2, 3], Some("image/png"))
            .await
            .unwrap());
    }
}
