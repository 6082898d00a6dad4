//! Password digests.
//!
//! Stored digests are a single unsalted SHA-256 over the raw password, hex
//! encoded. Equal passwords produce equal digests; existing stores depend on
//! this format.

use sha2::{Digest, Sha256};

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_password("admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }

    #[test]
    fn test_verify() {
        let digest = hash_password("secreto");
        assert!(verify_password("secreto", &digest));
        assert!(!verify_password("Secreto", &digest));
    }
}
