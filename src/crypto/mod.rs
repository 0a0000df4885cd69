// src/crypto/mod.rs
//! Text encryption, decryption and hashing behind a single dispatcher.
//!
//! Every operation takes and returns strings: ciphertext is a base64
//! envelope, digests are lower-case hex. Algorithms are closed enums, so an
//! unsupported operation/algorithm pairing can only reach the dispatcher
//! through [`process`] or by parsing a name.

use std::fmt;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

mod algorithm;
mod cipher;
mod digest;

pub use algorithm::{algorithm_or, Algorithm, CipherAlgorithm, DigestAlgorithm};
pub use cipher::{decrypt, encrypt};
pub use digest::{digests_match, hash_bytes, hash_file, hash_reader, hash_text};

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("{0} requires a non-empty key")]
    MissingKey(CipherAlgorithm),

    #[error("Cryptographic operation failed: {0}")]
    PrimitiveFailure(String),

    #[error("Failed to read input: {0}")]
    ReadFailure(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
    Hash,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "encrypt"),
            Operation::Decrypt => write!(f, "decrypt"),
            Operation::Hash => write!(f, "hash"),
        }
    }
}

/// One unit of work for [`process`].
#[derive(Debug, Clone)]
pub struct CryptoRequest {
    pub operation: Operation,
    pub algorithm: Algorithm,
    pub input: String,
    pub key: Option<String>,
}

impl CryptoRequest {
    pub fn new(
        operation: Operation,
        algorithm: impl Into<Algorithm>,
        input: impl Into<String>,
        key: Option<String>,
    ) -> Self {
        Self {
            operation,
            algorithm: algorithm.into(),
            input: input.into(),
            key,
        }
    }

    /// Build a request from an algorithm name, as typed by a user.
    pub fn from_name(
        operation: Operation,
        algorithm: &str,
        input: impl Into<String>,
        key: Option<String>,
    ) -> Result<Self> {
        Ok(Self::new(operation, algorithm.parse::<Algorithm>()?, input, key))
    }
}

/// Run a request against the algorithm/mode compatibility table.
pub fn process(request: &CryptoRequest) -> Result<String> {
    debug!("Dispatching {} with {}", request.operation, request.algorithm);

    let key = request.key.as_deref();
    let result = match (request.operation, request.algorithm) {
        (Operation::Encrypt, Algorithm::Cipher(cipher)) => encrypt(&request.input, cipher, key),
        (Operation::Decrypt, Algorithm::Cipher(cipher)) => decrypt(&request.input, cipher, key),
        (Operation::Hash, Algorithm::Digest(digest)) => hash_text(&request.input, digest),
        (operation, algorithm) => Err(CryptoError::UnsupportedAlgorithm(format!(
            "{} cannot be used to {}",
            algorithm, operation
        ))),
    };

    if let Err(CryptoError::PrimitiveFailure(reason)) = &result {
        error!("{} with {} failed: {}", request.operation, request.algorithm, reason);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_each_operation() {
        let sealed = process(&CryptoRequest::new(
            Operation::Encrypt,
            CipherAlgorithm::Aes,
            "secret",
            Some("k1".into()),
        ))
        .unwrap();

        let opened = process(&CryptoRequest::new(
            Operation::Decrypt,
            CipherAlgorithm::Aes,
            sealed,
            Some("k1".into()),
        ))
        .unwrap();
        assert_eq!(opened, "secret");

        let digest = process(&CryptoRequest::new(
            Operation::Hash,
            DigestAlgorithm::Md5,
            "hello world",
            None,
        ))
        .unwrap();
        assert_eq!(digest, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn hashing_with_an_encoding_is_unsupported() {
        let request = CryptoRequest::from_name(Operation::Hash, "Base64", "x", None).unwrap();
        assert!(matches!(process(&request), Err(CryptoError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn encrypting_with_a_digest_is_unsupported() {
        for operation in [Operation::Encrypt, Operation::Decrypt] {
            let request = CryptoRequest::new(operation, DigestAlgorithm::Sha256, "x", Some("k".into()));
            assert!(matches!(process(&request), Err(CryptoError::UnsupportedAlgorithm(_))));
        }
    }

    #[test]
    fn unknown_names_fail_before_dispatch() {
        assert!(matches!(
            CryptoRequest::from_name(Operation::Encrypt, "Twofish", "x", None),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn key_is_ignored_for_hashing() {
        let with_key = process(&CryptoRequest::new(Operation::Hash, DigestAlgorithm::Sha1, "abc", Some("k".into()))).unwrap();
        let without = process(&CryptoRequest::new(Operation::Hash, DigestAlgorithm::Sha1, "abc", None)).unwrap();
        assert_eq!(with_key, without);
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = encrypt("x", CipherAlgorithm::Rabbit, None).unwrap_err();
        assert_eq!(err.to_string(), "Rabbit requires a non-empty key");
    }
}
