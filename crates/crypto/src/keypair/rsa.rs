//! RSA key pairs
//!
//! Private keys are emitted as PKCS#8, public keys as SubjectPublicKeyInfo.
//! PKCS#1 encodings are accepted on input for keys produced by older tooling.

use super::{GenerationError, KeyPairPem};
use pkcs8::LineEnding;
use rand::rngs::OsRng;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
    traits::PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};

/// Generate an RSA key pair with the given modulus length
pub(super) fn generate(bits: usize) -> Result<KeyPairPem, GenerationError> {
    let private_key = RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| {
        GenerationError::KeyGeneration(format!("RSA-{} key generation failed: {}", bits, e))
    })?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_key_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;
    let public_key_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;

    Ok(KeyPairPem::new(private_key_pem, public_key_pem))
}

pub(super) fn public_from_spki(der: &[u8]) -> Option<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).ok()
}

pub(super) fn public_from_pkcs1(der: &[u8]) -> Option<RsaPublicKey> {
    RsaPublicKey::from_pkcs1_der(der).ok()
}

/// Public half of a PKCS#8 (`pkcs8 == true`) or PKCS#1 private key
pub(super) fn public_from_private(der: &[u8], pkcs8: bool) -> Option<RsaPublicKey> {
    let private_key = if pkcs8 {
        RsaPrivateKey::from_pkcs8_der(der).ok()?
    } else {
        RsaPrivateKey::from_pkcs1_der(der).ok()?
    };
    Some(RsaPublicKey::from(&private_key))
}

pub(super) fn modulus_bits(key: &RsaPublicKey) -> u32 {
    key.n().bits() as u32
}

pub(super) fn to_spki_der(key: &RsaPublicKey) -> Result<Vec<u8>, pkcs8::spki::Error> {
    Ok(key.to_public_key_der()?.as_bytes().to_vec())
}
