// src/crypto/algorithm.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CryptoError;

/// Reversible algorithms usable with encrypt/decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CipherAlgorithm {
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "DES")]
    Des,
    #[serde(rename = "TripleDES")]
    TripleDes,
    #[serde(rename = "Rabbit")]
    Rabbit,
    #[serde(rename = "RC4")]
    Rc4,
    #[serde(rename = "RC4Drop")]
    Rc4Drop,
    #[serde(rename = "Base64")]
    Base64,
}

impl CipherAlgorithm {
    pub const ALL: [CipherAlgorithm; 7] = [
        CipherAlgorithm::Aes,
        CipherAlgorithm::Des,
        CipherAlgorithm::TripleDes,
        CipherAlgorithm::Rabbit,
        CipherAlgorithm::Rc4,
        CipherAlgorithm::Rc4Drop,
        CipherAlgorithm::Base64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CipherAlgorithm::Aes => "AES",
            CipherAlgorithm::Des => "DES",
            CipherAlgorithm::TripleDes => "TripleDES",
            CipherAlgorithm::Rabbit => "Rabbit",
            CipherAlgorithm::Rc4 => "RC4",
            CipherAlgorithm::Rc4Drop => "RC4Drop",
            CipherAlgorithm::Base64 => "Base64",
        }
    }

    /// Everything except the plain encoding needs a passphrase.
    pub fn requires_key(self) -> bool {
        !matches!(self, CipherAlgorithm::Base64)
    }

    /// Derived key and IV lengths in bytes.
    pub(crate) fn key_iv_len(self) -> (usize, usize) {
        match self {
            CipherAlgorithm::Aes => (32, 16),
            CipherAlgorithm::Des => (8, 8),
            CipherAlgorithm::TripleDes => (24, 8),
            CipherAlgorithm::Rabbit => (16, 8),
            CipherAlgorithm::Rc4 | CipherAlgorithm::Rc4Drop => (32, 0),
            CipherAlgorithm::Base64 => (0, 0),
        }
    }
}

/// One-way digests usable with hash operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DigestAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA512")]
    Sha512,
    #[serde(rename = "SHA3")]
    Sha3,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 5] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Sha3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Sha3 => "SHA3",
        }
    }

    /// Whether the digest is offered for raw byte (file) hashing.
    pub fn supports_bytes(self) -> bool {
        !matches!(self, DigestAlgorithm::Sha3)
    }

    /// MD5 and SHA-1 are collision-broken; kept for checksum compatibility only.
    pub fn is_legacy(self) -> bool {
        matches!(self, DigestAlgorithm::Md5 | DigestAlgorithm::Sha1)
    }
}

/// Any algorithm the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Cipher(CipherAlgorithm),
    Digest(DigestAlgorithm),
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Cipher(cipher) => cipher.name(),
            Algorithm::Digest(digest) => digest.name(),
        }
    }
}

impl From<CipherAlgorithm> for Algorithm {
    fn from(cipher: CipherAlgorithm) -> Self {
        Algorithm::Cipher(cipher)
    }
}

impl From<DigestAlgorithm> for Algorithm {
    fn from(digest: DigestAlgorithm) -> Self {
        Algorithm::Digest(digest)
    }
}

// "SHA-256", "sha_256" and "Sha256" all name the same algorithm.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse `name`, or fall back to `default` when it is missing or blank.
pub fn algorithm_or<T: FromStr<Err = CryptoError>>(name: Option<&str>, default: T) -> Result<T, CryptoError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.parse(),
        None => Ok(default),
    }
}

impl FromStr for CipherAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "aes" | "aes256" => Ok(CipherAlgorithm::Aes),
            "des" => Ok(CipherAlgorithm::Des),
            "tripledes" | "3des" => Ok(CipherAlgorithm::TripleDes),
            "rabbit" => Ok(CipherAlgorithm::Rabbit),
            "rc4" => Ok(CipherAlgorithm::Rc4),
            "rc4drop" => Ok(CipherAlgorithm::Rc4Drop),
            "base64" => Ok(CipherAlgorithm::Base64),
            _ => Err(CryptoError::UnsupportedAlgorithm(format!(
                "'{}' is not an encryption algorithm",
                s
            ))),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            "sha3" | "sha3512" => Ok(DigestAlgorithm::Sha3),
            _ => Err(CryptoError::UnsupportedAlgorithm(format!(
                "'{}' is not a hash algorithm",
                s
            ))),
        }
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(cipher) = s.parse::<CipherAlgorithm>() {
            return Ok(Algorithm::Cipher(cipher));
        }
        s.parse::<DigestAlgorithm>()
            .map(Algorithm::Digest)
            .map_err(|_| CryptoError::UnsupportedAlgorithm(format!("unknown algorithm '{}'", s)))
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
