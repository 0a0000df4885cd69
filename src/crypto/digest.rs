// src/crypto/digest.rs
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak512;

use super::{CryptoError, DigestAlgorithm, Result};

fn digest_hex(digest: DigestAlgorithm, data: &[u8]) -> String {
    match digest {
        DigestAlgorithm::Md5 => hex::encode(Md5::digest(data)),
        DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(data)),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
        DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        // Keccak-512 with the pre-FIPS padding, as browser "SHA3" implementations compute it.
        DigestAlgorithm::Sha3 => hex::encode(Keccak512::digest(data)),
    }
}

/// Hex digest of a string's UTF-8 bytes. Empty text yields an empty string.
pub fn hash_text(text: &str, digest: DigestAlgorithm) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    if digest.is_legacy() {
        debug!("{} requested; it is not collision resistant", digest);
    }

    Ok(digest_hex(digest, text.as_bytes()))
}

/// Hex digest of raw bytes. Unlike [`hash_text`] the empty buffer is hashed.
pub fn hash_bytes(data: &[u8], digest: DigestAlgorithm) -> Result<String> {
    if !digest.supports_bytes() {
        return Err(CryptoError::UnsupportedAlgorithm(format!(
            "{} is not available for file hashing",
            digest
        )));
    }

    debug!("Hashing {} bytes with {}", data.len(), digest);
    Ok(digest_hex(digest, data))
}

/// Drain `reader` to the end and hash everything it produced.
pub fn hash_reader<R: Read>(mut reader: R, digest: DigestAlgorithm) -> Result<String> {
    // Reject before consuming the source.
    if !digest.supports_bytes() {
        return hash_bytes(&[], digest);
    }

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(|e| {
        warn!("Failed to read input for hashing: {}", e);
        CryptoError::ReadFailure(e)
    })?;

    hash_bytes(&buffer, digest)
}

/// Read the whole file at `path` and hash it.
pub async fn hash_file(path: impl AsRef<Path>, digest: DigestAlgorithm) -> Result<String> {
    if !digest.supports_bytes() {
        return hash_bytes(&[], digest);
    }

    let path = path.as_ref();
    let data = tokio::fs::read(path).await.map_err(|e| {
        warn!("Failed to read {}: {}", path.display(), e);
        CryptoError::ReadFailure(e)
    })?;

    hash_bytes(&data, digest)
}

/// Compare a known digest with a computed one, ignoring case and surrounding whitespace.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    let expected = expected.trim();
    !expected.is_empty() && expected.eq_ignore_ascii_case(actual.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};

    #[test]
    fn known_answer_vectors() {
        assert_eq!(
            hash_text("hello world", DigestAlgorithm::Md5).unwrap(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(
            hash_text("abc", DigestAlgorithm::Sha1).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hash_text("hello world", DigestAlgorithm::Sha256).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            hash_text("abc", DigestAlgorithm::Sha512).unwrap(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(
            hash_text("abc", DigestAlgorithm::Sha3).unwrap(),
            "18587dc2ea106b9a1563e32b3312421ca164c7f1f07bc922a9c83d77cea3a1e5\
             d0c69910739025372dc14ac9642629379540c17e2a65b19d77aa511a9d00bb96"
        );
    }

    #[test]
    fn sha3_is_keccak_not_fips_sha3() {
        let fips_sha3_512_abc = "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
                                 10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0";
        let digest = hash_text("abc", DigestAlgorithm::Sha3).unwrap();
        assert_ne!(digest, fips_sha3_512_abc);
        assert_eq!(digest.len(), 128);
    }

    #[test]
    fn hashing_is_deterministic() {
        for digest in DigestAlgorithm::ALL {
            let first = hash_text("same input", digest).unwrap();
            let second = hash_text("same input", digest).unwrap();
            assert_eq!(first, second);
            assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn empty_text_short_circuits() {
        for digest in DigestAlgorithm::ALL {
            assert_eq!(hash_text("", digest).unwrap(), "");
        }
    }

    #[test]
    fn empty_bytes_are_hashed() {
        assert_eq!(
            hash_bytes(b"", DigestAlgorithm::Md5).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            hash_bytes(b"", DigestAlgorithm::Sha256).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn text_and_bytes_agree() {
        for digest in [DigestAlgorithm::Md5, DigestAlgorithm::Sha1, DigestAlgorithm::Sha256, DigestAlgorithm::Sha512] {
            assert_eq!(
                hash_text("payload", digest).unwrap(),
                hash_bytes(b"payload", digest).unwrap()
            );
        }
    }

    #[test]
    fn sha3_is_rejected_for_bytes() {
        assert!(matches!(
            hash_bytes(b"data", DigestAlgorithm::Sha3),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            hash_reader(&b"data"[..], DigestAlgorithm::Sha3),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "source vanished"))
        }
    }

    #[test]
    fn reader_errors_become_read_failures() {
        assert!(matches!(
            hash_reader(BrokenReader, DigestAlgorithm::Sha256),
            Err(CryptoError::ReadFailure(_))
        ));
    }

    #[test]
    fn reader_hashes_whole_stream() {
        let data = vec![7u8; 100_000];
        assert_eq!(
            hash_reader(data.as_slice(), DigestAlgorithm::Sha1).unwrap(),
            hash_bytes(&data, DigestAlgorithm::Sha1).unwrap()
        );
    }

    #[tokio::test]
    async fn file_hash_matches_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();
        file.flush().unwrap();

        let from_file = hash_file(file.path(), DigestAlgorithm::Sha256).await.unwrap();
        assert_eq!(from_file, hash_bytes(b"file contents", DigestAlgorithm::Sha256).unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = hash_file(dir.path().join("absent.bin"), DigestAlgorithm::Md5).await;
        assert!(matches!(result, Err(CryptoError::ReadFailure(_))));
    }

    #[test]
    fn digest_comparison_ignores_case_and_whitespace() {
        assert!(digests_match("  D41D8CD98F00B204E9800998ECF8427E\n", "d41d8cd98f00b204e9800998ecf8427e"));
        assert!(!digests_match("d41d8cd98f00b204e9800998ecf8427f", "d41d8cd98f00b204e9800998ecf8427e"));
        assert!(!digests_match("", ""));
    }
}
