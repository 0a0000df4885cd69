// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

use crate::models::UserAgentDetails;
use crate::strength::StrengthAssessment;

// Crypto requests and responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CipherRequest {
    /// Plaintext to encrypt, or ciphertext to decrypt
    pub text: String,
    /// Cipher name (AES, DES, TripleDES, Rabbit, RC4, RC4Drop, Base64); server default if omitted
    pub algorithm: Option<String>,
    /// Passphrase, required for every cipher except Base64
    pub key: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HashRequest {
    /// Text to hash
    pub text: String,
    /// Digest name (MD5, SHA1, SHA256, SHA512, SHA3); server default if omitted
    pub algorithm: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CryptoResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Algorithm that was applied
    pub algorithm: Option<String>,
    /// Ciphertext, plaintext or hex digest
    pub output: Option<String>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

impl CryptoResponse {
    pub fn ok(algorithm: &str, output: String) -> Self {
        Self {
            success: true,
            algorithm: Some(algorithm.to_string()),
            output: Some(output),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            algorithm: None,
            output: None,
            error: Some(error),
        }
    }
}

/// Multipart form accepted by the file hash endpoint
#[derive(Deserialize, ToSchema)]
pub struct FileHashForm {
    /// File to hash
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Digest name (MD5, SHA1, SHA256, SHA512); server default if omitted
    pub algorithm: Option<String>,
    /// Known digest to compare the result against
    pub compare: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct FileHashResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Digest that was applied
    pub algorithm: Option<String>,
    /// Uploaded file name, when the client sent one
    pub file_name: Option<String>,
    /// Size of the uploaded file in bytes
    pub file_size: Option<u64>,
    /// Hex digest of the file
    pub hash: Option<String>,
    /// Comparison with `compare` (absent when nothing was compared)
    pub matches: Option<bool>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

impl FileHashResponse {
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            algorithm: None,
            file_name: None,
            file_size: None,
            hash: None,
            matches: None,
            error: Some(error),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AlgorithmListResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Names accepted by encrypt/decrypt
    pub ciphers: Vec<String>,
    /// Names accepted by text hashing
    pub digests: Vec<String>,
    /// Names accepted by file hashing
    pub file_digests: Vec<String>,
    /// Cipher used when a request names none
    pub default_cipher: String,
    /// Digest used when a request names none
    pub default_digest: String,
}

// Password generation types
#[derive(Serialize, Deserialize, ToSchema, Default)]
pub struct PasswordGenerationRequest {
    /// Password length (default: server setting, 16 out of the box)
    pub length: Option<usize>,
    /// Include uppercase letters (default: true)
    pub include_uppercase: Option<bool>,
    /// Include lowercase letters (default: true)
    pub include_lowercase: Option<bool>,
    /// Include numbers (default: true)
    pub include_numbers: Option<bool>,
    /// Include symbols (default: true)
    pub include_symbols: Option<bool>,
    /// Exclude similar characters (default: false)
    pub exclude_similar: Option<bool>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Generated password
    pub password: Option<String>,
    /// Strength of the generated password
    pub strength: Option<StrengthAssessment>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysisRequest {
    /// Password to analyze
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysisResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Score, tier, feedback and crack-time label
    pub strength: Option<StrengthAssessment>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

// Tools
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FingerprintResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// What the request's User-Agent reveals
    pub details: Option<UserAgentDetails>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}
