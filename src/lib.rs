// src/lib.rs
//! CyberKit: client-side security utilities.
//!
//! Text ciphers and digests ([`crypto`]), password strength scoring
//! ([`strength`]), random password generation ([`generators`]) and
//! User-Agent fingerprinting ([`privacy`]), exposed through a CLI and an
//! actix-web JSON API.

pub mod api;
pub mod cli;
pub mod core;
pub mod crypto;
pub mod generators;
pub mod logging;
pub mod models;
pub mod privacy;
pub mod strength;

pub use crate::core::Config;
pub use crate::crypto::{
    decrypt, encrypt, hash_bytes, hash_file, hash_reader, hash_text, process, CipherAlgorithm,
    CryptoError, CryptoRequest, DigestAlgorithm, Operation,
};
pub use crate::generators::generate_password;
pub use crate::models::{PasswordGenerationOptions, UserAgentDetails};
pub use crate::privacy::parse_user_agent;
pub use crate::strength::{assess_password, StrengthAssessment, StrengthTier};
