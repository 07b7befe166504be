//! AES-256-GCM authenticated encryption keyed by a password.

use crate::config::{KdfParams, NONCE_LENGTH};
use crate::crypto::kdf::KeyDerivation;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::{CryptoRng, RngCore};

/// Authentication tag size (128 bits).
const TAG_SIZE: usize = 16;

/// Output of a password-based encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encryption {
    /// Salt for key derivation.
    pub salt: Vec<u8>,
    /// Initialization vector (the AES-GCM nonce).
    pub iv: Vec<u8>,
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

/// Password-based symmetric encryption.
pub trait CryptoService: Send + Sync {
    /// Encrypt `plaintext` under a key derived from `password` and a fresh
    /// salt, both salt and IV drawn from `rng`.
    fn encrypt<R: RngCore + CryptoRng + ?Sized>(
        &self,
        plaintext: &[u8],
        password: &str,
        rng: &mut R,
    ) -> Result<Encryption>;

    /// Decrypt `ciphertext` produced by [`CryptoService::encrypt`].
    ///
    /// Returns [`Error::InvalidKey`] when the password, salt or IV don't match.
    fn decrypt(&self, ciphertext: &[u8], password: &str, salt: &[u8], iv: &[u8]) -> Result<Vec<u8>>;
}

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Encrypt data with the given nonce.
    ///
    /// Returns: ciphertext || tag (16 bytes)
    pub fn encrypt(&self, nonce: &[u8; NONCE_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))
    }

    /// Decrypt data that was encrypted with `encrypt`.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != NONCE_LENGTH || ciphertext.len() < TAG_SIZE {
            return Err(Error::InvalidKey);
        }

        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::InvalidKey)
    }
}

/// Argon2id key derivation followed by AES-256-GCM.
#[derive(Debug, Clone, Default)]
pub struct AesGcmService {
    params: KdfParams,
}

impl AesGcmService {
    /// Create a service deriving keys with the given Argon2id cost.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }
}

impl CryptoService for AesGcmService {
    fn encrypt<R: RngCore + CryptoRng + ?Sized>(
        &self,
        plaintext: &[u8],
        password: &str,
        rng: &mut R,
    ) -> Result<Encryption> {
        let kdf = KeyDerivation::new(self.params, rng);
        let key = kdf.derive_key(password)?;

        let mut nonce = [0u8; NONCE_LENGTH];
        rng.fill_bytes(&mut nonce);
        let ciphertext = Cipher::new(&key).encrypt(&nonce, plaintext)?;

        Ok(Encryption {
            salt: kdf.salt().to_vec(),
            iv: nonce.to_vec(),
            ciphertext,
        })
    }

    fn decrypt(&self, ciphertext: &[u8], password: &str, salt: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let kdf = KeyDerivation::from_salt(salt, self.params);
        let key = kdf.derive_key(password)?;

        Cipher::new(&key).decrypt(iv, ciphertext)
    }
}
