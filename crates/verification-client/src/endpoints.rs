//! Fixed endpoint paths, relative to the configured origins

pub const KYC: &str = "/oracle/kyc";
pub const ZKP: &str = "/oracle/zkp";
pub const VERIFY_ZKP: &str = "/oracle/verify_zkp";
pub const BIOMETRIC_VERIFY: &str = "/api/biometric/verify";
pub const HEALTH: &str = "/health";

/// Multipart part name carrying the biometric sample
pub const BIOMETRIC_FIELD: &str = "biometric";
