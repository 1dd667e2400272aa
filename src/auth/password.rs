// src/auth/password.rs
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{error, warn};

use crate::errors::ServerError;

/// Argon2id with a fresh random salt, encoded as a PHC string
/// (`$argon2id$v=19$...`). The string carries its own parameters and salt.
pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("password hashing failed: {e}");
            ServerError::InternalError
        })
}

/// False for a wrong password and for a stored value that is not a PHC string.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("stored password hash unreadable: {e}");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_phc_string() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(verify_password("hunter22", &a));
        assert!(verify_password("hunter22", &b));
    }

    #[test]
    fn wrong_password_and_garbage_hash_fail() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("correct horsE", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
        assert!(!verify_password("correct horse", ""));
    }
}
