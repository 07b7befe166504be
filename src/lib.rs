//! Merge Key
//!
//! Password-protected keys for short data such as passwords or messages. The
//! data is woven into random filler ("oil"), prefixed with an optional user
//! password hash, and encrypted under the owner password.
//!
//! # Features
//!
//! - **Oil dimensions**: each character hidden between random symbols of the
//!   same character class, with filler amounts that shrink and reset
//! - **Two credential levels**: public keys open with the owner password,
//!   other keys also need the user password
//! - **AES-256-GCM Encryption**: Argon2id key derivation from the owner password
//! - **Password policy**: minimum length, weak password list, repetition check
//!
//! # Architecture
//!
//! ```text
//! user password → Argon2id hash → embed (reduced oil) ┐
//!                                                     ├→ concat → encrypt (AES-256-GCM) → Key
//! data ─────────────────────────→ embed (oil) ────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use merge_key::KeyOil;
//!
//! let oil = KeyOil::new(40, 25);
//! let key = merge_key::generate_key_with_oil(
//!     "my bank pin is 0000",
//!     "owner-Passw0rd!",
//!     "user-Secret#42",
//!     oil,
//! )
//! .unwrap();
//!
//! // Store it as three lines of text
//! let text = key.to_text();
//!
//! let key: merge_key::Key = text.parse().unwrap();
//! let data = merge_key::open_key_with_oil(&key, "owner-Passw0rd!", "user-Secret#42", oil).unwrap();
//! assert_eq!(data, "my bank pin is 0000");
//! ```

pub mod alphabet;
pub mod config;
pub mod crypto;
pub mod dimension;
pub mod error;
pub mod key;
pub mod password;

pub use config::KeyConfig;
pub use dimension::KeyOil;
pub use error::{Error, Result};
pub use key::{Key, MergeKeyGenerator, MergeKeyOpener};
pub use password::PasswordQuality;

/// Generate a key without oil, openable with both passwords.
pub fn generate_key(data: &str, owner_password: &str, user_password: &str) -> Result<Key> {
    generate_key_with_oil(data, owner_password, user_password, KeyOil::none())
}

/// Generate a key with oil, openable with both passwords.
pub fn generate_key_with_oil(
    data: &str,
    owner_password: &str,
    user_password: &str,
    oil: KeyOil,
) -> Result<Key> {
    MergeKeyGenerator::default().generate(data, owner_password, user_password, oil)
}

/// Generate a public key without oil, openable with the owner password.
pub fn generate_public_key(data: &str, owner_password: &str) -> Result<Key> {
    generate_public_key_with_oil(data, owner_password, KeyOil::none())
}

/// Generate a public key with oil, openable with the owner password.
pub fn generate_public_key_with_oil(data: &str, owner_password: &str, oil: KeyOil) -> Result<Key> {
    MergeKeyGenerator::default().generate_public(data, owner_password, oil)
}

/// Open a key generated without oil.
pub fn open_key(key: &Key, owner_password: &str, user_password: &str) -> Result<String> {
    open_key_with_oil(key, owner_password, user_password, KeyOil::none())
}

/// Open a key generated with `oil`.
///
/// With the right passwords but a different oil this usually returns wrong
/// data rather than an error.
pub fn open_key_with_oil(
    key: &Key,
    owner_password: &str,
    user_password: &str,
    oil: KeyOil,
) -> Result<String> {
    MergeKeyOpener::default().open(key, owner_password, user_password, oil)
}

/// Open a public key generated without oil.
pub fn open_public_key(key: &Key, owner_password: &str) -> Result<String> {
    open_public_key_with_oil(key, owner_password, KeyOil::none())
}

/// Open a public key generated with `oil`.
pub fn open_public_key_with_oil(key: &Key, owner_password: &str, oil: KeyOil) -> Result<String> {
    MergeKeyOpener::default().open_public(key, owner_password, oil)
}
