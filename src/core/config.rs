// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use log::LevelFilter;

use crate::crypto::{CipherAlgorithm, DigestAlgorithm};

// Configuration for the toolkit
#[derive(Debug, Clone)]
pub struct Config {
    // Web Interface
    pub web_address: String,
    pub web_port: u16,
    pub max_upload_bytes: usize,

    // Algorithm selected when a request names none, one per mode
    pub default_cipher: CipherAlgorithm,
    pub default_digest: DigestAlgorithm,

    // Password Generation
    pub default_password_length: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Web Interface
            web_address: "127.0.0.1".to_string(),
            web_port: 5000,
            max_upload_bytes: 64 * 1024 * 1024,

            // Algorithms
            default_cipher: CipherAlgorithm::Aes,
            default_digest: DigestAlgorithm::Sha256,

            // Password Generation
            default_password_length: 16,

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

// Parse an env var. A value that doesn't parse keeps the default and is reported in `warnings`.
fn parse_var<T: FromStr>(name: &str, target: &mut T, warnings: &mut Vec<String>) {
    if let Ok(raw) = env::var(name) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warnings.push(format!("Ignoring invalid value '{}' for {}", raw, name)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Runs before the logger exists, so rejected values come back as messages
    /// for the caller to log once logging is initialised.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Web Interface
        if let Ok(address) = env::var("WEB_ADDRESS") {
            config.web_address = address;
        }
        parse_var("WEB_PORT", &mut config.web_port, &mut warnings);
        parse_var("MAX_UPLOAD_BYTES", &mut config.max_upload_bytes, &mut warnings);

        // Algorithms
        parse_var("DEFAULT_CIPHER", &mut config.default_cipher, &mut warnings);
        parse_var("DEFAULT_DIGEST", &mut config.default_digest, &mut warnings);

        // Password Generation
        parse_var("DEFAULT_PASSWORD_LENGTH", &mut config.default_password_length, &mut warnings);

        // Logging
        if let Ok(level) = env::var("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => warnings.push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        if let Ok(file) = env::var("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        (config, warnings)
    }

    // Address the API server binds to
    pub fn bind_address(&self) -> (String, u16) {
        (self.web_address.clone(), self.web_port)
    }
}
