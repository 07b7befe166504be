//! Configuration constants and types for merge keys.

use serde::{Deserialize, Serialize};

/// Minimum length of an accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length from which an accepted password is rated good.
pub const GOOD_PASSWORD_LENGTH: usize = 16;

/// Maximum share of the password a single run of repeated characters may take.
pub const MAX_CONSECUTIVE_REPETITION: f32 = 0.4;

/// Maximum supported user password length, in characters.
pub const MAX_LENGTH_USER_PASSWORD: usize = 50;

/// Width of the user password hash slot inside a dimension.
pub const DIMENSION_HASH_LENGTH: usize = 100;

/// Factor by which data oil shrinks after each embedded character.
pub const DIMENSION_REDUCTION_FACTOR: usize = 2;

/// Oil length from which the user password hash uses the reduced oil regime.
pub const HASHED_PASSWORD_SECURE_LEVEL_OIL: u32 = 5000;

/// AES-GCM nonce length in bytes (96 bits), stored as the key IV.
pub const NONCE_LENGTH: usize = 12;

/// Salt length in bytes for user password hashes.
pub const USER_HASH_SALT_LENGTH: usize = 16;

/// Argon2id parameters for key derivation.
pub mod argon2_params {
    /// Memory cost in KiB (64 MB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;

    /// Output length in bytes (256 bits).
    pub const OUTPUT_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 32;
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub mem_cost_kib: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism (lanes).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: argon2_params::MEMORY_COST,
            time_cost: argon2_params::TIME_COST,
            parallelism: argon2_params::PARALLELISM,
        }
    }
}

impl KdfParams {
    /// Build the Argon2 parameter set with the given output length.
    pub fn to_argon2(&self, output_len: Option<usize>) -> Result<argon2::Params, String> {
        argon2::Params::new(self.mem_cost_kib, self.time_cost, self.parallelism, output_len)
            .map_err(|e| e.to_string())
    }

    /// Length of the Argon2id PHC string hashed with these costs, a salt of
    /// `salt_length` bytes and the default output length.
    pub fn phc_length(&self, salt_length: usize) -> usize {
        let digits = |n: u32| n.to_string().len();
        let base64 = |bytes: usize| (bytes * 4 + 2) / 3;

        "$argon2id$v=19$m=,t=,p=$$".len()
            + digits(self.mem_cost_kib)
            + digits(self.time_cost)
            + digits(self.parallelism)
            + base64(salt_length)
            + base64(argon2::Params::DEFAULT_OUTPUT_LEN)
    }
}

/// Configuration shared by a generator and the opener of its keys.
///
/// Cost parameters are not stored in a serialized key, so a key only opens
/// with the configuration it was generated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Key derivation cost for the owner password.
    pub owner_kdf: KdfParams,

    /// Hashing cost for the user password.
    pub user_hash: KdfParams,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            owner_kdf: KdfParams::default(),
            user_hash: KdfParams {
                mem_cost_kib: argon2::Params::DEFAULT_M_COST,
                time_cost: argon2::Params::DEFAULT_T_COST,
                parallelism: argon2::Params::DEFAULT_P_COST,
            },
        }
    }
}

impl KeyConfig {
    /// Create a key configuration with custom Argon2 costs.
    pub fn new(owner_kdf: KdfParams, user_hash: KdfParams) -> Self {
        Self {
            owner_kdf,
            user_hash,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.owner_kdf
            .to_argon2(Some(argon2_params::OUTPUT_LENGTH))
            .map_err(|e| format!("owner key derivation: {e}"))?;
        self.user_hash
            .to_argon2(None)
            .map_err(|e| format!("user password hash: {e}"))?;

        let hash_length = self.user_hash.phc_length(USER_HASH_SALT_LENGTH);
        if hash_length > DIMENSION_HASH_LENGTH {
            return Err(format!(
                "user password hash: takes {hash_length} characters, at most {DIMENSION_HASH_LENGTH} fit"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(KeyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_time_cost_is_invalid() {
        let config = KeyConfig::new(
            KdfParams {
                mem_cost_kib: 1024,
                time_cost: 0,
                parallelism: 1,
            },
            KdfParams::default(),
        );

        let err = config.validate().unwrap_err();
        assert!(err.starts_with("owner key derivation"));
    }

    #[test]
    fn test_user_hash_too_long_for_slot_is_invalid() {
        let fast = KdfParams {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        };
        let heavy = KdfParams {
            mem_cost_kib: 1024 * 1024,
            time_cost: 10,
            parallelism: 16,
        };
        assert_eq!(heavy.phc_length(USER_HASH_SALT_LENGTH), 101);

        let err = KeyConfig::new(fast, heavy).validate().unwrap_err();
        assert!(err.starts_with("user password hash"));

        // Heavy costs are fine for the owner password, which is never stored.
        assert!(KeyConfig::new(heavy, fast).validate().is_ok());
    }

    #[test]
    fn test_default_user_hash_fits_slot() {
        let length = KeyConfig::default().user_hash.phc_length(USER_HASH_SALT_LENGTH);
        assert_eq!(length, 97);
        assert!(length <= DIMENSION_HASH_LENGTH);
    }

    #[test]
    fn test_config_survives_json() {
        let config = KeyConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: KeyConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.owner_kdf, config.owner_kdf);
        assert_eq!(parsed.user_hash, config.user_hash);
    }
}
