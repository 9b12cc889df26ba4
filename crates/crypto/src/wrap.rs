//! Symmetric key wrapping
//!
//! Private key material is sealed with AES-256-GCM under a 32-byte key
//! encryption key. The wrapped form is `nonce (12) || ciphertext || tag (16)`.

use crate::helpers::{create_aes_cipher, generate_nonce};
use crate::types::{KeyError, WrappingKey, NONCE_LEN, WRAPPING_KEY_LEN};
use aes_gcm::{aead::Aead, Nonce};
use thiserror::Error;
use zeroize::Zeroizing;

/// Length of the GCM authentication tag appended to the ciphertext
pub const TAG_LEN: usize = 16;

/// Key wrapping errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    #[error("Invalid wrapping key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Key wrapping failed: {0}")]
    EncryptionFailure(String),

    #[error("Key unwrapping failed: {0}")]
    DecryptionFailure(String),
}

impl From<KeyError> for WrapError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidLength { expected, got } => {
                WrapError::InvalidKeyLength { expected, got }
            }
        }
    }
}

/// Wrap `plaintext` under raw key bytes, which must be exactly 32 bytes
pub fn wrap_key(plaintext: &[u8], wrapping_key: &[u8]) -> Result<Vec<u8>, WrapError> {
    let key = WrappingKey::from_slice(wrapping_key)?;
    wrap_key_with(plaintext, &key)
}

/// Wrap `plaintext` with a fresh random nonce
pub fn wrap_key_with(plaintext: &[u8], key: &WrappingKey) -> Result<Vec<u8>, WrapError> {
    let cipher = create_aes_cipher(key);
    let nonce = generate_nonce();

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce.as_slice()), plaintext)
        .map_err(|e| WrapError::EncryptionFailure(e.to_string()))?;

    let mut wrapped = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    wrapped.extend_from_slice(nonce.as_slice());
    wrapped.extend_from_slice(&ciphertext);
    Ok(wrapped)
}

/// Recover the plaintext sealed by [`wrap_key`]
pub fn unwrap_key(wrapped: &[u8], wrapping_key: &[u8]) -> Result<Zeroizing<Vec<u8>>, WrapError> {
    let key = WrappingKey::from_slice(wrapping_key)?;
    unwrap_key_with(wrapped, &key)
}

pub fn unwrap_key_with(wrapped: &[u8], key: &WrappingKey) -> Result<Zeroizing<Vec<u8>>, WrapError> {
    if wrapped.len() < NONCE_LEN + TAG_LEN {
        return Err(WrapError::DecryptionFailure(format!(
            "wrapped key too short: {} bytes",
            wrapped.len()
        )));
    }
    let (nonce, ciphertext) = wrapped.split_at(NONCE_LEN);

    let cipher = create_aes_cipher(key);
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|e| WrapError::DecryptionFailure(e.to_string()))
}

/// Length check used before any expensive work is done with a key
pub fn check_key_length(wrapping_key: &[u8]) -> Result<(), WrapError> {
    if wrapping_key.len() != WRAPPING_KEY_LEN {
        return Err(WrapError::InvalidKeyLength {
            expected: WRAPPING_KEY_LEN,
            got: wrapping_key.len(),
        });
    }
    Ok(())
}
