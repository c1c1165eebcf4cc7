//! Salted one-way password hashing (Argon2id, PHC string format).
//!
//! Both functions are CPU-bound; async callers should run them on the
//! blocking pool.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// Hash `plain` with a fresh random salt.
pub fn hash_password(plain: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            UserError::PasswordHash(e.to_string())
        })
}

/// `true` iff `candidate` matches `hash`. A malformed hash never matches.
pub fn verify_password(hash: &str, candidate: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
