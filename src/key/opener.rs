//! Merge key opening.

use super::{hash_segment_length, Key};
use crate::config::KeyConfig;
use crate::crypto::{AesGcmService, Argon2Verifier, CryptoService, SecretVerifier};
use crate::dimension::{extract, KeyOil};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;
use zeroize::Zeroizing;

/// Opens merge keys to retrieve their data.
///
/// Every failure is reported as [`Error::InvalidKey`]. Opening with the right
/// passwords but the wrong oil usually does not fail: it returns wrong data,
/// since nothing in the key records the oil.
#[derive(Debug, Clone)]
pub struct MergeKeyOpener<C = AesGcmService, V = Argon2Verifier> {
    crypto: C,
    verifier: V,
}

impl MergeKeyOpener {
    /// Create an opener with the configuration the keys were generated with.
    pub fn with_config(config: &KeyConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self::with_services(
            AesGcmService::new(config.owner_kdf),
            Argon2Verifier::new(config.user_hash),
        ))
    }
}

impl Default for MergeKeyOpener {
    fn default() -> Self {
        let config = KeyConfig::default();
        Self::with_services(
            AesGcmService::new(config.owner_kdf),
            Argon2Verifier::new(config.user_hash),
        )
    }
}

impl<C: CryptoService, V: SecretVerifier> MergeKeyOpener<C, V> {
    /// Create an opener from explicit crypto and verifier services.
    pub fn with_services(crypto: C, verifier: V) -> Self {
        Self { crypto, verifier }
    }

    /// Open a key with the owner password, the user password and the oil it
    /// was generated with.
    ///
    /// A public key opens with any user password.
    pub fn open(
        &self,
        key: &Key,
        owner_password: &str,
        user_password: &str,
        oil: KeyOil,
    ) -> Result<String> {
        self.try_open(key, owner_password, user_password, oil)
            .map_err(|_| {
                debug!("merge key did not open");
                Error::InvalidKey
            })
    }

    /// Open a public key.
    pub fn open_public(&self, key: &Key, owner_password: &str, oil: KeyOil) -> Result<String> {
        self.open(key, owner_password, "", oil)
    }

    fn try_open(
        &self,
        key: &Key,
        owner_password: &str,
        user_password: &str,
        oil: KeyOil,
    ) -> Result<String> {
        let ciphertext = BASE64
            .decode(key.encrypted_dimension())
            .map_err(|_| Error::InvalidKey)?;
        let plaintext = self
            .crypto
            .decrypt(&ciphertext, owner_password, key.salt(), key.iv())?;
        let full_dimension =
            Zeroizing::new(String::from_utf8(plaintext).map_err(|_| Error::InvalidKey)?);

        let user_password_oil = oil.user_password_oil();
        let segment_length = hash_segment_length(user_password_oil).ok_or(Error::InvalidKey)?;
        let split = full_dimension
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(full_dimension.len()))
            .nth(segment_length)
            .ok_or(Error::InvalidKey)?;
        let (hash_dimension, data_dimension) = full_dimension.split_at(split);

        let stored_hash = extract(hash_dimension, user_password_oil, true);
        self.check_user_password(stored_hash.trim(), user_password)?;

        debug!(
            negative_oil = oil.negative(),
            positive_oil = oil.positive(),
            dimension_length = segment_length + data_dimension.chars().count(),
            "opened merge key"
        );

        Ok(extract(data_dimension, oil, false))
    }

    fn check_user_password(&self, stored_hash: &str, user_password: &str) -> Result<()> {
        if stored_hash.is_empty() || self.verifier.verify(user_password, stored_hash) {
            Ok(())
        } else {
            Err(Error::InvalidKey)
        }
    }
}
