//! Argon2id key derivation for password-based encryption.

use crate::config::{argon2_params, KdfParams};
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Version};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Key derivation using Argon2id.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: Vec<u8>,
    params: KdfParams,
}

impl KeyDerivation {
    /// Create a new KDF with a random salt.
    pub fn new<R: RngCore + CryptoRng + ?Sized>(params: KdfParams, rng: &mut R) -> Self {
        let mut salt = vec![0u8; argon2_params::SALT_LENGTH];
        rng.fill_bytes(&mut salt);
        Self { salt, params }
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: &[u8], params: KdfParams) -> Self {
        Self {
            salt: salt.to_vec(),
            params,
        }
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Derive a 256-bit key from a password.
    ///
    /// Fails on invalid cost parameters or a salt shorter than Argon2 allows.
    pub fn derive_key(&self, password: &str) -> Result<Zeroizing<[u8; 32]>> {
        let params = self
            .params
            .to_argon2(Some(argon2_params::OUTPUT_LENGTH))
            .map_err(Error::InvalidConfig)?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; 32]);
        argon2
            .hash_password_into(password.as_bytes(), &self.salt, key.as_mut_slice())
            .map_err(|e| Error::Encryption(e.to_string()))?;

        Ok(key)
    }
}
