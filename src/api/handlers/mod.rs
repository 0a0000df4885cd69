// src/api/handlers/mod.rs
pub mod crypto;
pub mod generator;
pub mod tools;
