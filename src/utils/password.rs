//! Salted password digests stored as `salt$hex(sha256(salt || password))`.

use sha2::{Digest, Sha256};
use uuid::Uuid;

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

pub fn hash(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest(&salt, password);
    format!("{salt}${digest}")
}

pub fn verify(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    let actual = digest(salt, password);
    // Compare every byte so timing does not reveal the matching prefix.
    actual.len() == expected.len()
        && actual
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let stored = hash("correct-horse");
        assert!(verify("correct-horse", &stored));
        assert!(!verify("battery-staple", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash("same-password"), hash("same-password"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify("anything", "no-separator"));
        assert!(!verify("anything", ""));
    }
}
