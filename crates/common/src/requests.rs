//! Request entities sent to the oracle and the biometric API
//!
//! All of these are built at submit time from user-entered values and dropped
//! once the outcome has been surfaced.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::Result;

/// Body of `POST /oracle/kyc`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KycRequest {
    pub human_hash_id: String,
}

impl KycRequest {
    pub fn new(human_hash_id: impl Into<String>) -> Self {
        Self {
            human_hash_id: human_hash_id.into(),
        }
    }
}

/// Body of `POST /oracle/zkp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZkpRequest {
    pub human_hash_id: String,
    pub proof: String,
}

impl ZkpRequest {
    pub fn new(human_hash_id: impl Into<String>, proof: impl Into<String>) -> Self {
        Self {
            human_hash_id: human_hash_id.into(),
            proof: proof.into(),
        }
    }
}

/// Body of `POST /oracle/verify_zkp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyZkpRequest {
    pub human_hash_id: String,
    pub proof: String,
    pub verifying_key: String,
}

impl VerifyZkpRequest {
    pub fn new(
        human_hash_id: impl Into<String>,
        proof: impl Into<String>,
        verifying_key: impl Into<String>,
    ) -> Self {
        Self {
            human_hash_id: human_hash_id.into(),
            proof: proof.into(),
            verifying_key: verifying_key.into(),
        }
    }
}

/// A biometric sample selected by the user
#[derive(Clone, PartialEq, Eq)]
pub struct BiometricFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    /// MIME type of the sample, when known
    pub content_type: Option<String>,
}

impl BiometricFile {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a sample from disk, inferring an image content type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "biometric".to_string());

        Ok(Self {
            bytes,
            filename,
            content_type: Some(content_type_for(path).to_string()),
        })
    }
}

// Sample bytes are deliberately left out of debug output.
impl fmt::Debug for BiometricFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiometricFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Inputs of a biometric upload, exactly as collected from the user
///
/// Either part may be missing; the client refuses to send anything in that case.
#[derive(Debug, Clone, Default)]
pub struct BiometricUpload {
    pub file: Option<BiometricFile>,
    pub token: Option<String>,
}

impl BiometricUpload {
    pub fn new(file: Option<BiometricFile>, token: Option<String>) -> Self {
        Self { file, token }
    }

    /// Returns the file and token when both are present.
    ///
    /// An empty token counts as absent.
    pub fn ready(&self) -> Option<(&BiometricFile, &str)> {
        let file = self.file.as_ref()?;
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        Some((file, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies_carry_only_their_fields() {
        let kyc = serde_json::to_value(KycRequest::new("abc123")).unwrap();
        assert_eq!(kyc, json!({ "human_hash_id": "abc123" }));

        let zkp = serde_json::to_value(ZkpRequest::new("abc123", "p")).unwrap();
        assert_eq!(zkp, json!({ "human_hash_id": "abc123", "proof": "p" }));

        let verify = serde_json::to_value(VerifyZkpRequest::new("abc123", "p", "vk")).unwrap();
        assert_eq!(
            verify,
            json!({ "human_hash_id": "abc123", "proof": "p", "verifying_key": "vk" })
        );
    }

    #[test]
    fn test_empty_strings_are_still_sent() {
        let kyc = serde_json::to_value(KycRequest::new("")).unwrap();
        assert_eq!(kyc, json!({ "human_hash_id": "" }));
    }

    #[test]
    fn test_upload_readiness() {
        let file = BiometricFile::new(vec![1, 2, 3], "face.png");

        assert!(BiometricUpload::default().ready().is_none());
        assert!(BiometricUpload::new(None, Some("tok".into())).ready().is_none());
        assert!(BiometricUpload::new(Some(file.clone()), None).ready().is_none());
        assert!(BiometricUpload::new(Some(file.clone()), Some(String::new()))
            .ready()
            .is_none());

        let upload = BiometricUpload::new(Some(file), Some("tok".into()));
        let (file, token) = upload.ready().unwrap();
        assert_eq!(file.filename, "face.png");
        assert_eq!(token, "tok");
    }

    #[test]
    fn test_content_type_inference() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a")), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let file = BiometricFile::from_path(&path).unwrap();
        assert_eq!(file.filename, "face.jpg");
        assert_eq!(file.bytes, vec![0xff, 0xd8, 0xff]);
        assert_eq!(file.content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = BiometricFile::from_path(dir.path().join("absent.png"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_debug_hides_sample_bytes() {
        let file = BiometricFile::new(vec![0xde, 0xad], "face.png");
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 2"));
        assert!(!debug.contains("222"));
    }
}
