//! Password hashing and strength rules for admin credentials.
//!
//! Hashes are Argon2id in PHC string format, so the parameters travel with
//! each stored hash and older hashes keep verifying after a parameter change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use lazy_static::lazy_static;
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("{0}")]
    TooWeak(String),
}

// OWASP 2024 baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
const MEMORY_COST_KIB: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Invalid Argon2 params: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password with a fresh random salt.
///
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("Correct-Horse-1").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

lazy_static! {
    /// Hash with the current parameters, verified when no account matches.
    static ref UNKNOWN_ACCOUNT_HASH: Option<String> = hash_password("unknown-account-Pw1").ok();
}

/// Runs a full Argon2 verification against a throwaway hash so that a
/// lookup miss costs as much as a wrong password. Always returns false.
pub fn verify_unknown_account(password: &str) -> bool {
    if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}

/// Checks that a new password has at least 8 characters, an uppercase letter,
/// a lowercase letter and a digit.
pub fn validate_password_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooWeak(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let rules: [(fn(&char) -> bool, &str); 3] = [
        (char::is_ascii_uppercase, "Password must contain at least one uppercase letter"),
        (char::is_ascii_lowercase, "Password must contain at least one lowercase letter"),
        (char::is_ascii_digit, "Password must contain at least one digit"),
    ];

    for (check, message) in rules {
        if !password.chars().any(|c| check(&c)) {
            return Err(PasswordError::TooWeak(message.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("Portfolio1").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        assert_ne!(
            hash_password("Portfolio1").unwrap(),
            hash_password("Portfolio1").unwrap()
        );
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("Admin-Pass-9").unwrap();
        assert!(verify_password("Admin-Pass-9", &hash).unwrap());
        assert!(!verify_password("admin-pass-9", &hash).unwrap());
    }

    #[test]
    fn test_verify_unicode_password() {
        let hash = hash_password("Пароль-Blog-1").unwrap();
        assert!(verify_password("Пароль-Blog-1", &hash).unwrap());
    }

    #[test]
    fn test_unknown_account_check_uses_real_hash() {
        let hash = UNKNOWN_ACCOUNT_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains(&format!("m={},t={},p={}", MEMORY_COST_KIB, TIME_COST, PARALLELISM)));

        assert!(!verify_unknown_account("unknown-account-Pw1"));
        assert!(!verify_unknown_account("anything"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("whatever", "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_password_strength_accepts_strong() {
        assert!(validate_password_strength("Sup3rSecret").is_ok());
    }

    #[test]
    fn test_password_strength_rejects_short() {
        let err = validate_password_strength("Ab1").unwrap_err();
        assert!(err.to_string().contains("at least 8"));
    }

    #[test]
    fn test_password_strength_requires_character_classes() {
        assert!(validate_password_strength("alllowercase1").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1").is_err());
        assert!(validate_password_strength("NoDigitsHere").is_err());
    }
}
