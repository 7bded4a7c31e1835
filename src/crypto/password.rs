//! Password hashing and verification

use std::sync::OnceLock;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use crate::error::{ManagerError, Result};

/// Hash a password with a fresh random salt
///
/// Returns the PHC string as bytes, ready for the `password_hash` column.
pub fn hash_password(password: &str) -> Result<Vec<u8>> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string().into_bytes())
}

/// Check a password against a stored hash
///
/// Returns `Ok(false)` on mismatch. A stored value that is not a valid PHC
/// string is an error, not a mismatch.
pub fn verify_password(password: &str, stored: &[u8]) -> Result<bool> {
    let stored = std::str::from_utf8(stored)
        .map_err(|_| ManagerError::Hash("stored password hash is not UTF-8".to_string()))?;
    let parsed = PasswordHash::new(stored)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Spend one verification on a fixed hash
///
/// Used when the username is unknown so that lookup misses cost as much as
/// a wrong password.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<Option<Vec<u8>>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("monkeydb-dummy-password").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
