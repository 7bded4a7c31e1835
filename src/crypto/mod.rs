//! Cryptographic operations for MonkeyDB
//!
//! Password hashing with Argon2id. Hashes are stored in PHC string format,
//! which embeds the algorithm parameters and the salt, so verification needs
//! nothing but the stored value.

pub mod password;

pub use password::{hash_password, verify_password, verify_against_dummy};
