//! Password hashing using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::AuthError;

/// Symbols accepted as the "special character" of a strong password
pub const PASSWORD_SYMBOLS: &str = "#?!@$%^&*-";

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; a malformed stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AuthError::Hashing(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(format!("verify error: {e}"))),
    }
}

/// Check a candidate password: at least eight characters with an uppercase
/// letter, a lowercase letter, a digit and one of `PASSWORD_SYMBOLS`.
pub fn check_strength(password: &str) -> Result<(), String> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if long_enough && upper && lower && digit && symbol {
        Ok(())
    } else {
        Err(format!(
            "must be at least {} characters and contain an uppercase letter, a lowercase letter, a digit and one of {}",
            MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS
        ))
    }
}
