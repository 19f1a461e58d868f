//! Password hashing helpers.
//!
//! bcrypt embeds a per-hash random salt in the produced string, so only the
//! hash is ever stored. A hashing failure is an internal error, distinct from
//! a verification that cleanly returns `false`.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::{ServiceError, ServiceResult};

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> ServiceResult<bool> {
    verify(password, hashed)
        .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hashed = hash_password("pw123").unwrap();
        assert_ne!(hashed, "pw123");
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hashed = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hashed).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hashed = hash_password("pw123").unwrap();
        assert!(!verify_password("pw124", &hashed).unwrap());
    }
}
