//! Password credential hashing.
//!
//! The raw password is hashed with Argon2id and dropped; only the PHC hash
//! string ever reaches storage or logs.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| anyhow::anyhow!("failed to hash password"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{password_hash::PasswordHash, PasswordVerifier};

    #[test]
    fn hash_is_argon2id_phc() -> Result<()> {
        let hash = hash_password("Secret123")?;
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("Secret123"));
        Ok(())
    }

    #[test]
    fn hash_verifies_and_salts_differ() -> Result<()> {
        let first = hash_password("Secret123")?;
        let second = hash_password("Secret123")?;
        assert_ne!(first, second);

        let parsed = PasswordHash::new(&first)
            .map_err(|_| anyhow::anyhow!("failed to parse PHC string"))?;
        assert!(Argon2::default()
            .verify_password(b"Secret123", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"WrongPass1", &parsed)
            .is_err());
        Ok(())
    }
}
