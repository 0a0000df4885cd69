// src/crypto/cipher.rs
//
// Keyed ciphers share one envelope: an 8-byte random salt, key and IV derived
// from the passphrase with EVP_BytesToKey (MD5, single round), and the output
// base64("Salted__" || salt || ciphertext), the container `openssl enc`
// writes. Block ciphers run in CBC mode with PKCS#7 padding.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{
    block_padding::Pkcs7, consts::U32, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    StreamCipher,
};
use des::{Des, TdesEde3};
use log::debug;
use md5::{Digest, Md5};
use rabbit::Rabbit;
use rand::RngCore;
use rc4::Rc4;

use super::{CipherAlgorithm, CryptoError, Result};

const SALT_HEADER: &[u8; 8] = b"Salted__";
const SALT_LEN: usize = 8;

// RC4-drop discards the first 192 keystream words.
const RC4_DROP_BYTES: usize = 192 * 4;

/// Encrypt `text` with `cipher`.
///
/// Empty input returns an empty string without touching the primitive. Keyed
/// ciphers fail with [`CryptoError::MissingKey`] when `key` is absent or empty.
pub fn encrypt(text: &str, cipher: CipherAlgorithm, key: Option<&str>) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    if cipher == CipherAlgorithm::Base64 {
        return Ok(STANDARD.encode(text.as_bytes()));
    }

    let passphrase = require_key(cipher, key)?;

    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let (derived_key, iv) = derive_key_iv(cipher, passphrase.as_bytes(), &salt);
    let ciphertext = apply_encrypt(cipher, &derived_key, &iv, text.as_bytes())?;

    debug!(
        "{} encrypted {} bytes into {} bytes",
        cipher,
        text.len(),
        ciphertext.len()
    );

    Ok(seal(&salt, &ciphertext))
}

/// Decrypt `text` previously produced by [`encrypt`] with the same cipher and key.
///
/// A wrong key is not guaranteed to be detected: stream ciphers will happily
/// produce different bytes. Those bytes are only returned if they form valid
/// UTF-8, otherwise the call fails with [`CryptoError::PrimitiveFailure`].
pub fn decrypt(text: &str, cipher: CipherAlgorithm, key: Option<&str>) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    if cipher == CipherAlgorithm::Base64 {
        let decoded = STANDARD
            .decode(text.trim())
            .map_err(|e| CryptoError::PrimitiveFailure(format!("Invalid Base64 input: {}", e)))?;
        return into_utf8(decoded);
    }

    let passphrase = require_key(cipher, key)?;

    let (salt, ciphertext) = open(text)?;
    let (derived_key, iv) = derive_key_iv(cipher, passphrase.as_bytes(), &salt);
    let plaintext = apply_decrypt(cipher, &derived_key, &iv, ciphertext)?;

    debug!("{} decrypted {} bytes", cipher, plaintext.len());

    into_utf8(plaintext)
}

fn require_key(cipher: CipherAlgorithm, key: Option<&str>) -> Result<&str> {
    match key {
        Some(k) if !k.is_empty() => Ok(k),
        _ => Err(CryptoError::MissingKey(cipher)),
    }
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| CryptoError::PrimitiveFailure("Decrypted data is not valid UTF-8".into()))
}

/// OpenSSL's EVP_BytesToKey with MD5 and a single iteration.
pub(crate) fn evp_bytes_to_key(
    passphrase: &[u8],
    salt: &[u8],
    key_len: usize,
    iv_len: usize,
) -> (Vec<u8>, Vec<u8>) {
    let mut derived = Vec::with_capacity(key_len + iv_len + 16);
    let mut block: Vec<u8> = Vec::new();

    while derived.len() < key_len + iv_len {
        let mut hasher = Md5::new();
        hasher.update(&block);
        hasher.update(passphrase);
        hasher.update(salt);
        block = hasher.finalize().to_vec();
        derived.extend_from_slice(&block);
    }

    let iv = derived[key_len..key_len + iv_len].to_vec();
    derived.truncate(key_len);
    (derived, iv)
}

fn derive_key_iv(cipher: CipherAlgorithm, passphrase: &[u8], salt: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let (key_len, iv_len) = cipher.key_iv_len();
    evp_bytes_to_key(passphrase, salt, key_len, iv_len)
}

fn seal(salt: &[u8], ciphertext: &[u8]) -> String {
    let mut envelope = Vec::with_capacity(SALT_HEADER.len() + salt.len() + ciphertext.len());
    envelope.extend_from_slice(SALT_HEADER);
    envelope.extend_from_slice(salt);
    envelope.extend_from_slice(ciphertext);
    STANDARD.encode(envelope)
}

fn open(text: &str) -> Result<([u8; SALT_LEN], Vec<u8>)> {
    let raw = STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::PrimitiveFailure(format!("Invalid ciphertext encoding: {}", e)))?;

    if raw.len() <= SALT_HEADER.len() + SALT_LEN || !raw.starts_with(SALT_HEADER) {
        return Err(CryptoError::PrimitiveFailure(
            "Ciphertext is not a salted envelope".into(),
        ));
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&raw[SALT_HEADER.len()..SALT_HEADER.len() + SALT_LEN]);
    let ciphertext = raw[SALT_HEADER.len() + SALT_LEN..].to_vec();

    Ok((salt, ciphertext))
}

fn primitive<E: std::fmt::Display>(e: E) -> CryptoError {
    CryptoError::PrimitiveFailure(e.to_string())
}

fn apply_encrypt(cipher: CipherAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    match cipher {
        CipherAlgorithm::Aes => Ok(cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(primitive)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        CipherAlgorithm::Des => Ok(cbc::Encryptor::<Des>::new_from_slices(key, iv)
            .map_err(primitive)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        CipherAlgorithm::TripleDes => Ok(cbc::Encryptor::<TdesEde3>::new_from_slices(key, iv)
            .map_err(primitive)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        CipherAlgorithm::Rabbit | CipherAlgorithm::Rc4 | CipherAlgorithm::Rc4Drop => {
            let mut buffer = data.to_vec();
            apply_keystream(cipher, key, iv, &mut buffer)?;
            Ok(buffer)
        }
        CipherAlgorithm::Base64 => Err(CryptoError::UnsupportedAlgorithm(
            "Base64 is an encoding, not a keyed cipher".into(),
        )),
    }
}

fn apply_decrypt(cipher: CipherAlgorithm, key: &[u8], iv: &[u8], data: Vec<u8>) -> Result<Vec<u8>> {
    match cipher {
        CipherAlgorithm::Aes => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(primitive)?
            .decrypt_padded_vec_mut::<Pkcs7>(&data)
            .map_err(|_| CryptoError::PrimitiveFailure("Bad padding, wrong key or corrupted data".into())),
        CipherAlgorithm::Des => cbc::Decryptor::<Des>::new_from_slices(key, iv)
            .map_err(primitive)?
            .decrypt_padded_vec_mut::<Pkcs7>(&data)
            .map_err(|_| CryptoError::PrimitiveFailure("Bad padding, wrong key or corrupted data".into())),
        CipherAlgorithm::TripleDes => cbc::Decryptor::<TdesEde3>::new_from_slices(key, iv)
            .map_err(primitive)?
            .decrypt_padded_vec_mut::<Pkcs7>(&data)
            .map_err(|_| CryptoError::PrimitiveFailure("Bad padding, wrong key or corrupted data".into())),
        CipherAlgorithm::Rabbit | CipherAlgorithm::Rc4 | CipherAlgorithm::Rc4Drop => {
            let mut buffer = data;
            apply_keystream(cipher, key, iv, &mut buffer)?;
            Ok(buffer)
        }
        CipherAlgorithm::Base64 => Err(CryptoError::UnsupportedAlgorithm(
            "Base64 is an encoding, not a keyed cipher".into(),
        )),
    }
}

// Stream ciphers are symmetric: the same call encrypts and decrypts.
fn apply_keystream(cipher: CipherAlgorithm, key: &[u8], iv: &[u8], buffer: &mut [u8]) -> Result<()> {
    match cipher {
        CipherAlgorithm::Rabbit => {
            let mut rabbit = <Rabbit as KeyIvInit>::new_from_slices(key, iv).map_err(primitive)?;
            rabbit.apply_keystream(buffer);
        }
        CipherAlgorithm::Rc4 | CipherAlgorithm::Rc4Drop => {
            let mut rc4 = <Rc4<U32> as KeyInit>::new_from_slice(key).map_err(primitive)?;
            if cipher == CipherAlgorithm::Rc4Drop {
                let mut discard = [0u8; RC4_DROP_BYTES];
                rc4.apply_keystream(&mut discard);
            }
            rc4.apply_keystream(buffer);
        }
        other => {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "{} is not a stream cipher",
                other
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYED: [CipherAlgorithm; 6] = [
        CipherAlgorithm::Aes,
        CipherAlgorithm::Des,
        CipherAlgorithm::TripleDes,
        CipherAlgorithm::Rabbit,
        CipherAlgorithm::Rc4,
        CipherAlgorithm::Rc4Drop,
    ];

    #[test]
    fn every_keyed_cipher_round_trips() {
        let samples = ["secret", "a", "The quick brown fox jumps over the lazy dog", "pässwörd ✓ 🔐"];
        for cipher in KEYED {
            for sample in samples {
                let sealed = encrypt(sample, cipher, Some("k1")).unwrap();
                assert_ne!(sealed, sample, "{} left plaintext unchanged", cipher);
                assert_eq!(decrypt(&sealed, cipher, Some("k1")).unwrap(), sample, "{}", cipher);
            }
        }
    }

    #[test]
    fn base64_round_trips_without_key() {
        let encoded = encrypt("hello world", CipherAlgorithm::Base64, None).unwrap();
        assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
        assert_eq!(decrypt(&encoded, CipherAlgorithm::Base64, None).unwrap(), "hello world");
    }

    #[test]
    fn base64_ignores_a_supplied_key() {
        let encoded = encrypt("hi", CipherAlgorithm::Base64, Some("ignored")).unwrap();
        assert_eq!(encoded, "aGk=");
    }

    #[test]
    fn empty_input_short_circuits() {
        for cipher in CipherAlgorithm::ALL {
            assert_eq!(encrypt("", cipher, Some("k")).unwrap(), "");
            assert_eq!(encrypt("", cipher, None).unwrap(), "");
            assert_eq!(decrypt("", cipher, Some("k")).unwrap(), "");
        }
    }

    #[test]
    fn keyed_ciphers_require_a_key() {
        for cipher in KEYED {
            assert!(matches!(encrypt("x", cipher, None), Err(CryptoError::MissingKey(c)) if c == cipher));
            assert!(matches!(encrypt("x", cipher, Some("")), Err(CryptoError::MissingKey(_))));
            assert!(matches!(decrypt("U2FsdGVkX1+AAAAAAAAAAA==", cipher, None), Err(CryptoError::MissingKey(_))));
        }
    }

    #[test]
    fn wrong_key_never_recovers_plaintext() {
        for cipher in KEYED {
            let sealed = encrypt("secret", cipher, Some("k1")).unwrap();
            match decrypt(&sealed, cipher, Some("k2")) {
                Ok(text) => assert_ne!(text, "secret", "{} decrypted with wrong key", cipher),
                Err(e) => assert!(matches!(e, CryptoError::PrimitiveFailure(_))),
            }
        }
    }

    #[test]
    fn salting_makes_ciphertexts_differ() {
        let first = encrypt("secret", CipherAlgorithm::Aes, Some("k1")).unwrap();
        let second = encrypt("secret", CipherAlgorithm::Aes, Some("k1")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn envelope_carries_openssl_header() {
        let sealed = encrypt("secret", CipherAlgorithm::Rc4, Some("k1")).unwrap();
        // base64 of "Salted__"
        assert!(sealed.starts_with("U2FsdGVkX1"));
        let raw = STANDARD.decode(&sealed).unwrap();
        assert_eq!(raw.len(), 8 + 8 + "secret".len());
    }

    #[test]
    fn block_ciphers_pad_to_block_size() {
        let aes = STANDARD.decode(encrypt("secret", CipherAlgorithm::Aes, Some("k")).unwrap()).unwrap();
        assert_eq!(aes.len() - 16, 16);
        let des = STANDARD.decode(encrypt("secret", CipherAlgorithm::Des, Some("k")).unwrap()).unwrap();
        assert_eq!(des.len() - 16, 8);
    }

    #[test]
    fn malformed_ciphertext_is_a_primitive_failure() {
        for input in ["not base64 !!", "aGVsbG8gd29ybGQ=", "U2FsdGVkX18="] {
            assert!(matches!(
                decrypt(input, CipherAlgorithm::Aes, Some("k")),
                Err(CryptoError::PrimitiveFailure(_))
            ));
        }
        assert!(matches!(
            decrypt("%%%", CipherAlgorithm::Base64, None),
            Err(CryptoError::PrimitiveFailure(_))
        ));
    }

    #[test]
    fn base64_rejects_non_utf8_payload() {
        // 0xff 0xfe
        assert!(matches!(
            decrypt("//4=", CipherAlgorithm::Base64, None),
            Err(CryptoError::PrimitiveFailure(_))
        ));
    }

    #[test]
    fn evp_bytes_to_key_chains_md5_blocks() {
        let salt = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let (key, iv) = evp_bytes_to_key(b"password", &salt, 32, 16);
        assert_eq!(key.len(), 32);
        assert_eq!(iv.len(), 16);

        // First block is MD5(password || salt).
        let mut hasher = Md5::new();
        hasher.update(b"password");
        hasher.update(salt);
        let first = hasher.finalize();
        assert_eq!(&key[..16], first.as_slice());

        // Second block chains the first.
        let mut hasher = Md5::new();
        hasher.update(first);
        hasher.update(b"password");
        hasher.update(salt);
        assert_eq!(&key[16..], hasher.finalize().as_slice());
    }

    #[test]
    fn evp_bytes_to_key_without_iv() {
        let (key, iv) = evp_bytes_to_key(b"k", b"saltsalt", 32, 0);
        assert_eq!(key.len(), 32);
        assert!(iv.is_empty());
    }
}
