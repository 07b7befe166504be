//! Cryptographic services for merge keys.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption keyed by Argon2id
//! - Argon2id password hashing for the user password check

mod cipher;
mod kdf;
mod verifier;

pub use cipher::{AesGcmService, Cipher, CryptoService, Encryption};
pub use kdf::KeyDerivation;
pub use verifier::{Argon2Verifier, SecretVerifier};
