//! Argon2id password hashing.
//!
//! Salts come from `OsRng`; hashes are stored in PHC string format.
//! Verification against a fixed dummy hash is provided so the login path
//! does comparable work whether or not the account exists.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// PHC-format hash of an unguessable placeholder, verified against when a
/// login names an unknown account.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("showcase-dummy-credential-placeholder").expect("hash placeholder password")
});

/// Hash a password for storage using Argon2id with default parameters.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch. Errors only
/// when the stored hash itself is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);
    Ok(result.is_ok())
}

/// Burn a verification against the dummy hash, discarding the outcome.
pub fn verify_against_dummy(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}
