//! Merge key generation.

use super::Key;
use crate::alphabet::SymbolAlphabet;
use crate::config::{KeyConfig, DIMENSION_HASH_LENGTH, MAX_LENGTH_USER_PASSWORD};
use crate::crypto::{AesGcmService, Argon2Verifier, CryptoService, SecretVerifier};
use crate::dimension::{embed, KeyOil};
use crate::error::{Error, Result};
use crate::password;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Generates merge keys for short data such as passwords or messages.
///
/// A generator is immutable and can be shared between threads; every call
/// works on its own buffers.
#[derive(Debug, Clone)]
pub struct MergeKeyGenerator<C = AesGcmService, V = Argon2Verifier> {
    crypto: C,
    verifier: V,
    alphabet: SymbolAlphabet,
}

impl MergeKeyGenerator {
    /// Create a generator with the given configuration.
    pub fn with_config(config: &KeyConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self::with_services(
            AesGcmService::new(config.owner_kdf),
            Argon2Verifier::new(config.user_hash),
        ))
    }
}

impl Default for MergeKeyGenerator {
    fn default() -> Self {
        let config = KeyConfig::default();
        Self::with_services(
            AesGcmService::new(config.owner_kdf),
            Argon2Verifier::new(config.user_hash),
        )
    }
}

impl<C: CryptoService, V: SecretVerifier> MergeKeyGenerator<C, V> {
    /// Create a generator from explicit crypto and verifier services.
    pub fn with_services(crypto: C, verifier: V) -> Self {
        Self {
            crypto,
            verifier,
            alphabet: SymbolAlphabet::standard(),
        }
    }

    /// Generate a key openable with the owner password and the user password.
    ///
    /// Both passwords must be accepted by the password policy and the user
    /// password may be at most [`MAX_LENGTH_USER_PASSWORD`] characters. An
    /// empty user password is rejected; use
    /// [`generate_public`](Self::generate_public) for keys without one.
    pub fn generate(
        &self,
        data: &str,
        owner_password: &str,
        user_password: &str,
        oil: KeyOil,
    ) -> Result<Key> {
        self.generate_with_rng(
            data,
            owner_password,
            user_password,
            oil,
            &mut rand::thread_rng(),
            &mut OsRng,
        )
    }

    /// Generate a public key, openable with the owner password alone.
    pub fn generate_public(&self, data: &str, owner_password: &str, oil: KeyOil) -> Result<Key> {
        self.generate_public_with_rng(data, owner_password, oil, &mut rand::thread_rng(), &mut OsRng)
    }

    /// [`generate`](Self::generate) with explicit random sources: `filler_rng`
    /// for oil and `secure_rng` for the salts and IV.
    pub fn generate_with_rng<R, S>(
        &self,
        data: &str,
        owner_password: &str,
        user_password: &str,
        oil: KeyOil,
        filler_rng: &mut R,
        secure_rng: &mut S,
    ) -> Result<Key>
    where
        R: Rng + ?Sized,
        S: RngCore + CryptoRng + ?Sized,
    {
        validate_input(data, owner_password)?;
        if !password::is_accepted(user_password)
            || user_password.chars().count() > MAX_LENGTH_USER_PASSWORD
        {
            warn!("user password rejected");
            return Err(Error::RejectedPassword);
        }
        self.create_key(data, owner_password, user_password, oil, filler_rng, secure_rng)
    }

    /// [`generate_public`](Self::generate_public) with explicit random sources.
    pub fn generate_public_with_rng<R, S>(
        &self,
        data: &str,
        owner_password: &str,
        oil: KeyOil,
        filler_rng: &mut R,
        secure_rng: &mut S,
    ) -> Result<Key>
    where
        R: Rng + ?Sized,
        S: RngCore + CryptoRng + ?Sized,
    {
        validate_input(data, owner_password)?;
        self.create_key(data, owner_password, "", oil, filler_rng, secure_rng)
    }

    fn create_key<R, S>(
        &self,
        data: &str,
        owner_password: &str,
        user_password: &str,
        oil: KeyOil,
        filler_rng: &mut R,
        secure_rng: &mut S,
    ) -> Result<Key>
    where
        R: Rng + ?Sized,
        S: RngCore + CryptoRng + ?Sized,
    {
        let full_dimension = self.full_dimension(data, user_password, oil, filler_rng, secure_rng)?;
        let encryption = self
            .crypto
            .encrypt(full_dimension.as_bytes(), owner_password, secure_rng)?;

        debug!(
            public = user_password.is_empty(),
            negative_oil = oil.negative(),
            positive_oil = oil.positive(),
            dimension_length = full_dimension.chars().count(),
            "generated merge key"
        );

        Ok(Key::new(
            encryption.salt,
            encryption.iv,
            BASE64.encode(&encryption.ciphertext),
        ))
    }

    fn full_dimension<R, S>(
        &self,
        data: &str,
        user_password: &str,
        oil: KeyOil,
        rng: &mut R,
        secure_rng: &mut S,
    ) -> Result<Zeroizing<String>>
    where
        R: Rng + ?Sized,
        S: RngCore + CryptoRng + ?Sized,
    {
        let hashed_user_password = self.padded_user_hash(user_password, secure_rng)?;
        let mut full_dimension = Zeroizing::new(embed(
            &self.alphabet,
            &hashed_user_password,
            oil.user_password_oil(),
            true,
            rng,
        ));
        full_dimension.push_str(&Zeroizing::new(embed(&self.alphabet, data, oil, false, rng)));
        Ok(full_dimension)
    }

    /// Hash of the user password right-padded with spaces to
    /// [`DIMENSION_HASH_LENGTH`] characters. Blank for an empty password.
    fn padded_user_hash<S>(&self, user_password: &str, rng: &mut S) -> Result<String>
    where
        S: RngCore + CryptoRng + ?Sized,
    {
        let hash = if user_password.is_empty() {
            String::new()
        } else {
            self.verifier.hash(user_password, rng)?
        };

        let length = hash.chars().count();
        if length > DIMENSION_HASH_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "user password hash takes {length} characters, at most {DIMENSION_HASH_LENGTH} fit"
            )));
        }

        Ok(format!("{hash:<width$}", width = DIMENSION_HASH_LENGTH))
    }
}

fn validate_input(data: &str, owner_password: &str) -> Result<()> {
    if data.contains('\n') {
        return Err(Error::UnsupportedData);
    }
    if !password::is_accepted(owner_password) {
        warn!("owner password rejected");
        return Err(Error::RejectedPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KdfParams;
    use crate::dimension::extract;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const OWNER: &str = "owner-Passw0rd!";
    const USER: &str = "user-Secret#42";

    fn fast_params() -> KdfParams {
        KdfParams {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    fn generator() -> MergeKeyGenerator {
        MergeKeyGenerator::with_config(&KeyConfig::new(fast_params(), fast_params())).unwrap()
    }

    #[test]
    fn test_config_with_oversized_user_hash_rejected() {
        let heavy = KdfParams {
            mem_cost_kib: 1_000_000,
            time_cost: 100,
            parallelism: 16,
        };
        let result = MergeKeyGenerator::with_config(&KeyConfig::new(fast_params(), heavy));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_line_feed_unsupported() {
        let result = generator().generate_public("two\nlines", OWNER, KeyOil::none());
        assert!(matches!(result, Err(Error::UnsupportedData)));
    }

    #[test]
    fn test_weak_owner_password_rejected() {
        let result = generator().generate_public("data", "12345678", KeyOil::none());
        assert!(matches!(result, Err(Error::RejectedPassword)));

        let result = generator().generate("data", "short", USER, KeyOil::none());
        assert!(matches!(result, Err(Error::RejectedPassword)));
    }

    #[test]
    fn test_weak_user_password_rejected() {
        let result = generator().generate("data", OWNER, "password", KeyOil::none());
        assert!(matches!(result, Err(Error::RejectedPassword)));

        let result = generator().generate("data", OWNER, "", KeyOil::none());
        assert!(matches!(result, Err(Error::RejectedPassword)));
    }

    #[test]
    fn test_long_user_password_rejected() {
        let long_password: String = (0..MAX_LENGTH_USER_PASSWORD + 1)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        assert!(password::is_accepted(&long_password));

        let result = generator().generate("data", OWNER, &long_password, KeyOil::none());
        assert!(matches!(result, Err(Error::RejectedPassword)));
    }

    #[test]
    fn test_padded_hash_width() {
        let generator = generator();

        let blank = generator.padded_user_hash("", &mut OsRng).unwrap();
        assert_eq!(blank.len(), DIMENSION_HASH_LENGTH);
        assert!(blank.trim().is_empty());

        let padded = generator.padded_user_hash(USER, &mut OsRng).unwrap();
        assert_eq!(padded.chars().count(), DIMENSION_HASH_LENGTH);
        assert!(padded.ends_with(' '));
    }

    #[test]
    fn test_full_dimension_layout() {
        let generator = generator();
        let oil = KeyOil::new(50, 25);
        let user_oil = oil.user_password_oil();
        let mut rng = StdRng::seed_from_u64(3);

        let full = generator
            .full_dimension("payload", USER, oil, &mut rng, &mut OsRng)
            .unwrap();
        let chars: Vec<char> = full.chars().collect();
        let segment = DIMENSION_HASH_LENGTH * (1 + user_oil.negative() as usize + user_oil.positive() as usize);

        let hash_segment: String = chars[..segment].iter().collect();
        let data_segment: String = chars[segment..].iter().collect();
        let stored_hash = extract(&hash_segment, user_oil, true);

        assert!(stored_hash.trim().starts_with("$argon2id$"));
        assert_eq!(extract(&data_segment, oil, false), "payload");
    }

    #[test]
    fn test_key_size_independent_of_user_password() {
        let generator = generator();
        let oil = KeyOil::new(8, 8);

        let public = generator.generate_public("same data", OWNER, oil).unwrap();
        let private = generator.generate("same data", OWNER, USER, oil).unwrap();

        assert_eq!(public.encrypted_dimension().len(), private.encrypted_dimension().len());
    }
}
