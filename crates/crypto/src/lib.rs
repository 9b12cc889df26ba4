//! OpenTDF key management cryptography
//!
//! Everything the key lifecycle needs from the crypto layer:
//! - Fresh RSA and EC key pair generation as PEM ([`keypair`])
//! - Public key PEM validation against a declared algorithm ([`validate`])
//! - AES-256-GCM wrapping of private key material ([`wrap`])
//!
//! Key encryption keys and generated private keys are held in zeroizing
//! containers and never appear in `Debug` output.
//!
//! # Example
//!
//! ```
//! use opentdf_keys_crypto::{generate, validate_public_key, wrap_key, unwrap_key};
//! use opentdf_keys_protocol::Algorithm;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = generate(Algorithm::EcP256)?;
//! validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::EcP256)?;
//!
//! let kek = [0u8; 32];
//! let wrapped = wrap_key(pair.private_key_pem().as_bytes(), &kek)?;
//! let recovered = unwrap_key(&wrapped, &kek)?;
//! assert_eq!(recovered.as_slice(), pair.private_key_pem().as_bytes());
//! # Ok(())
//! # }
//! ```

pub mod helpers;
pub mod keypair;
pub mod types;
pub mod validate;
pub mod wrap;

pub use helpers::{create_aes_cipher, fingerprint, generate_nonce};
pub use keypair::{generate, GenerationError, KeyPairPem, PublicKey};
pub use types::{KeyError, Nonce96, WrappingKey, NONCE_LEN, WRAPPING_KEY_LEN};
pub use validate::{parse_public_key_pem, validate_key_pair, validate_public_key, ValidationError};
pub use wrap::{
    check_key_length, unwrap_key, unwrap_key_with, wrap_key, wrap_key_with, WrapError, TAG_LEN,
};
