// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::seq::{index, SliceRandom};
use thiserror::Error;

use crate::models::PasswordGenerationOptions;
use crate::strength::{self, StrengthAssessment};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+~`|}{[]:;?><,./-=";
const SIMILAR: &[u8] = b"il1Lo0O";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length must be between {min} and {max} characters (got {length})")]
    InvalidLength { length: usize, min: usize, max: usize },
}

pub struct PasswordGenerator;

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, options: &PasswordGenerationOptions) -> Result<String, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
            return Err(GeneratorError::InvalidLength {
                length: options.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        Ok(generate_password(options))
    }

    pub fn analyze_password_strength(&self, password: &str) -> StrengthAssessment {
        strength::assess_password(password)
    }
}

// One pool per selected class; lowercase + digits when nothing is selected.
fn character_pools(options: &PasswordGenerationOptions) -> Vec<Vec<u8>> {
    let mut pools: Vec<&[u8]> = Vec::new();

    if options.include_uppercase {
        pools.push(UPPERCASE);
    }
    if options.include_lowercase {
        pools.push(LOWERCASE);
    }
    if options.include_numbers {
        pools.push(NUMBERS);
    }
    if options.include_symbols {
        pools.push(SYMBOLS);
    }
    if pools.is_empty() {
        pools.push(LOWERCASE);
        pools.push(NUMBERS);
    }

    pools
        .into_iter()
        .map(|pool| {
            pool.iter()
                .copied()
                .filter(|c| !options.exclude_similar || !SIMILAR.contains(c))
                .collect::<Vec<u8>>()
        })
        .filter(|pool| !pool.is_empty())
        .collect()
}

/// Generate a random password from the selected character classes.
///
/// Every selected class appears at least once when the length allows it.
pub fn generate_password(options: &PasswordGenerationOptions) -> String {
    let mut rng = rand::thread_rng();
    let pools = character_pools(options);
    let chars: Vec<u8> = pools.concat();

    let dist = Uniform::from(0..chars.len());
    let mut password: Vec<u8> = (0..options.length)
        .map(|_| chars[dist.sample(&mut rng)])
        .collect();

    // Reserve a distinct position for each class so no class overwrites another.
    if options.length >= pools.len() {
        let positions = index::sample(&mut rng, options.length, pools.len());
        for (pool, pos) in pools.iter().zip(positions.iter()) {
            if let Some(&c) = pool.choose(&mut rng) {
                password[pos] = c;
            }
        }
    }

    password.into_iter().map(char::from).collect()
}
