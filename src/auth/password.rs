use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;

/// One-way salted hash of a raw password, PHC string format.
pub fn hash_password(raw: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Pbkdf2.hash_password(raw.as_bytes(), &salt)?.to_string())
}

/// Constant-time verification against a stored PHC hash. An unparsable
/// hash counts as a mismatch rather than an error.
pub fn verify_password(raw: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(hash) => Pbkdf2.verify_password(raw.as_bytes(), &hash).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per hash
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_password("hunter2", "plaintext-left-over-from-a-migration"));
    }
}
