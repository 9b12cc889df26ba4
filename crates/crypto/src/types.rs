//! Zeroizing key types
//!
//! Wrapping keys and nonces clear their memory on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of an AES-256 wrapping key in bytes
pub const WRAPPING_KEY_LEN: usize = 32;

/// Size of an AES-GCM nonce in bytes
pub const NONCE_LEN: usize = 12;

/// AES-256 key encryption key (32 bytes) that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WrappingKey(pub(crate) [u8; WRAPPING_KEY_LEN]);

impl WrappingKey {
    /// Create a wrapping key from a 32-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != WRAPPING_KEY_LEN {
            return Err(KeyError::InvalidLength {
                expected: WRAPPING_KEY_LEN,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; WRAPPING_KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(WrappingKey(key))
    }

    /// Get a reference to the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for WrappingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WrappingKey(<redacted>)")
    }
}

/// 96-bit nonce (12 bytes) that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop, Default)]
pub struct Nonce96(pub(crate) [u8; NONCE_LEN]);

impl Nonce96 {
    /// Get a reference to the nonce bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Get a mutable reference to the nonce bytes
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// Key-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
