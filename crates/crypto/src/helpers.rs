//! Cryptographic helper functions
//!
//! Cipher initialization, nonce generation and key fingerprints.

use crate::types::{Nonce96, WrappingKey};
use aes_gcm::{Aes256Gcm, Key, KeyInit};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Create an AES-256-GCM cipher from a wrapping key
pub fn create_aes_cipher(key: &WrappingKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()))
}

/// Generate a random 96-bit nonce for AES-GCM
pub fn generate_nonce() -> Nonce96 {
    let mut nonce = Nonce96::default();
    OsRng.fill_bytes(nonce.as_mut_slice());
    nonce
}

/// Hex SHA-256 of a DER-encoded public key, safe to log
pub fn fingerprint(public_key_der: &[u8]) -> String {
    hex::encode(Sha256::digest(public_key_der))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_nonce() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        // Nonces should be different (with overwhelming probability)
        assert_ne!(nonce1.as_slice(), nonce2.as_slice());
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let fp = fingerprint(b"der");
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, fingerprint(b"der"));
        assert_ne!(fp, fingerprint(b"other"));
    }
}
