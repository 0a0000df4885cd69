// src/generators/mod.rs
pub mod password;

pub use password::{generate_password, GeneratorError, PasswordGenerator, MAX_LENGTH, MIN_LENGTH};
