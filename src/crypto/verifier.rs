//! One-way hashing and verification of user passwords.

use crate::config::{KdfParams, KeyConfig, USER_HASH_SALT_LENGTH};
use crate::error::{Error, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Version};
use rand::{CryptoRng, RngCore};

/// Password hashing with verification against a stored hash.
pub trait SecretVerifier: Send + Sync {
    /// Hash a secret with a fresh salt drawn from `rng`.
    fn hash<R: RngCore + CryptoRng + ?Sized>(&self, secret: &str, rng: &mut R) -> Result<String>;

    /// Check a secret against a hash produced by [`SecretVerifier::hash`].
    ///
    /// Malformed hashes never verify.
    fn verify(&self, secret: &str, hash: &str) -> bool;
}

/// Argon2id hashes in PHC string format.
///
/// The PHC string length grows with the digits of the cost parameters; see
/// [`KdfParams::phc_length`]. [`KeyConfig::validate`] rejects costs whose
/// hashes would not fit the dimension hash slot.
#[derive(Debug, Clone)]
pub struct Argon2Verifier {
    params: KdfParams,
}

impl Argon2Verifier {
    /// Create a verifier hashing with the given Argon2id cost.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }
}

impl Default for Argon2Verifier {
    fn default() -> Self {
        Self::new(KeyConfig::default().user_hash)
    }
}

impl SecretVerifier for Argon2Verifier {
    fn hash<R: RngCore + CryptoRng + ?Sized>(&self, secret: &str, rng: &mut R) -> Result<String> {
        let params = self.params.to_argon2(None).map_err(Error::InvalidConfig)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let mut salt_bytes = [0u8; USER_HASH_SALT_LENGTH];
        rng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::Encryption(e.to_string()))?;

        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| Error::Encryption(e.to_string()))?
            .to_string();

        Ok(hash)
    }

    fn verify(&self, secret: &str, hash: &str) -> bool {
        // Cost parameters are read back from the PHC string itself.
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
