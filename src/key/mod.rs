//! Merge keys: generation, opening and the serialized key format.
//!
//! A key stores one encrypted *full dimension*: the user password hash
//! embedded with a reduced oil, followed by the data embedded with the
//! caller's oil.
//!
//! ```text
//! data ─┐
//!       ├─ embed ×2 → hash dimension ‖ data dimension → AES-256-GCM → Key
//! hash ─┘
//! ```
//!
//! Serialized, a key is three lines of UTF-8 text:
//!
//! ```text
//! <base64 salt>
//! <base64 iv>
//! <base64 ciphertext>
//! ```

mod generator;
mod opener;

pub use generator::MergeKeyGenerator;
pub use opener::MergeKeyOpener;

use crate::config::DIMENSION_HASH_LENGTH;
use crate::dimension::KeyOil;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// An encrypted merge key.
///
/// Only produced by [`MergeKeyGenerator`] or parsed from its serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    salt: Vec<u8>,
    iv: Vec<u8>,
    encrypted_dimension: String,
}

impl Key {
    pub(crate) fn new(salt: Vec<u8>, iv: Vec<u8>, encrypted_dimension: String) -> Self {
        Self {
            salt,
            iv,
            encrypted_dimension,
        }
    }

    /// Salt of the owner password key derivation.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Initialization vector of the encryption.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Base64 ciphertext of the full dimension.
    pub fn encrypted_dimension(&self) -> &str {
        &self.encrypted_dimension
    }

    /// Serialize to the three-line text form.
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}",
            BASE64.encode(&self.salt),
            BASE64.encode(&self.iv),
            self.encrypted_dimension
        )
    }

    /// Parse the three-line text form.
    ///
    /// Fails with [`Error::InvalidKey`] when a line is missing, the salt or IV
    /// is not base64, or anything follows the third line.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let salt = lines.next().ok_or(Error::InvalidKey)?;
        let iv = lines.next().ok_or(Error::InvalidKey)?;
        let encrypted_dimension = lines.next().ok_or(Error::InvalidKey)?;
        if lines.next().is_some() {
            return Err(Error::InvalidKey);
        }

        Ok(Self {
            salt: BASE64.decode(salt).map_err(|_| Error::InvalidKey)?,
            iv: BASE64.decode(iv).map_err(|_| Error::InvalidKey)?,
            encrypted_dimension: encrypted_dimension.to_string(),
        })
    }

    /// Write the serialized key.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.to_text().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read a serialized key until the end of the stream.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes).map_err(|_| Error::InvalidKey)?;
        Self::from_text(&text)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

/// Number of characters the padded user password hash takes in a full
/// dimension embedded with `user_password_oil`.
fn hash_segment_length(user_password_oil: KeyOil) -> Option<usize> {
    let per_char = 1usize
        .checked_add(user_password_oil.negative() as usize)?
        .checked_add(user_password_oil.positive() as usize)?;
    DIMENSION_HASH_LENGTH.checked_mul(per_char)
}
