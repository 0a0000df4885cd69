// src/privacy/mod.rs
pub mod fingerprint;

pub use fingerprint::parse_user_agent;
