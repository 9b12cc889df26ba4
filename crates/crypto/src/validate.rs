//! Public key validation
//!
//! Checks that supplied PEM text holds a public key whose family and size
//! match a declared [`Algorithm`], and that a private key belongs to a given
//! public key.

use crate::keypair::PublicKey;
use opentdf_keys_protocol::{Algorithm, KeySize};
use thiserror::Error;
use zeroize::Zeroizing;

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Malformed public key PEM: {0}")]
    MalformedPem(String),

    #[error("Malformed private key PEM: {0}")]
    MalformedPrivateKey(String),

    #[error("Algorithm mismatch: expected {expected}, key is {found}")]
    AlgorithmMismatch { expected: Algorithm, found: KeySize },

    #[error("Private key does not belong to the supplied public key")]
    KeyPairMismatch,
}

/// Decode public key PEM text into a [`PublicKey`]
///
/// Accepts a `PUBLIC KEY` (SubjectPublicKeyInfo) block, or an
/// `RSA PUBLIC KEY` (PKCS#1) block.
pub fn parse_public_key_pem(pem_bytes: &[u8]) -> Result<PublicKey, ValidationError> {
    let parsed = pem::parse(pem_bytes).map_err(|e| ValidationError::MalformedPem(e.to_string()))?;

    let key = match parsed.tag() {
        PUBLIC_KEY_LABEL => PublicKey::from_spki_der(parsed.contents()),
        RSA_PUBLIC_KEY_LABEL => PublicKey::from_pkcs1_der(parsed.contents()),
        other => {
            return Err(ValidationError::MalformedPem(format!(
                "unexpected PEM label '{}'",
                other
            )))
        }
    };

    key.ok_or_else(|| {
        ValidationError::MalformedPem("not a supported RSA or EC public key".to_string())
    })
}

/// Check that `pem_bytes` holds a public key matching `algorithm`
///
/// Returns the decoded key so callers can fingerprint it.
pub fn validate_public_key(
    pem_bytes: &[u8],
    algorithm: Algorithm,
) -> Result<PublicKey, ValidationError> {
    let key = parse_public_key_pem(pem_bytes)?;
    let found = key.key_size();
    if algorithm.key_size() != Some(found) {
        return Err(ValidationError::AlgorithmMismatch {
            expected: algorithm,
            found,
        });
    }
    Ok(key)
}

/// Check that a private key PEM block is the private half of `public_key`
pub fn validate_key_pair(
    private_key_pem: &[u8],
    public_key: &PublicKey,
) -> Result<(), ValidationError> {
    let parsed = pem::parse(private_key_pem)
        .map_err(|e| ValidationError::MalformedPrivateKey(e.to_string()))?;
    let tag = parsed.tag().to_string();
    let der = Zeroizing::new(parsed.into_contents());

    let derived = PublicKey::from_private_key_der(&tag, &der).ok_or_else(|| {
        ValidationError::MalformedPrivateKey(format!("cannot decode '{}' block", tag))
    })?;

    if derived.same_key(public_key) {
        Ok(())
    } else {
        Err(ValidationError::KeyPairMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::generate;

    #[test]
    fn test_validate_generated_keys() {
        for algorithm in [Algorithm::EcP256, Algorithm::EcP384, Algorithm::EcP521] {
            let pair = generate(algorithm).unwrap();
            let key = validate_public_key(pair.public_key_pem().as_bytes(), algorithm).unwrap();
            assert_eq!(Some(key.key_size()), algorithm.key_size());
        }
    }

    #[test]
    fn test_validate_rsa() {
        let pair = generate(Algorithm::Rsa2048).unwrap();
        assert!(validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::Rsa2048).is_ok());
        assert_eq!(
            validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::Rsa4096).unwrap_err(),
            ValidationError::AlgorithmMismatch {
                expected: Algorithm::Rsa4096,
                found: KeySize::rsa(2048),
            }
        );
    }

    #[test]
    fn test_curve_mismatch() {
        let pair = generate(Algorithm::EcP256).unwrap();
        let err = validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::EcP384).unwrap_err();
        assert!(matches!(err, ValidationError::AlgorithmMismatch { .. }));
        let err = validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::Rsa2048).unwrap_err();
        assert!(matches!(err, ValidationError::AlgorithmMismatch { .. }));
    }

    #[test]
    fn test_unspecified_never_matches() {
        let pair = generate(Algorithm::EcP256).unwrap();
        let err = validate_public_key(pair.public_key_pem().as_bytes(), Algorithm::Unspecified)
            .unwrap_err();
        assert!(matches!(err, ValidationError::AlgorithmMismatch { .. }));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let inputs: [&[u8]; 3] = [
            b"",
            b"not a pem",
            b"-----BEGIN PUBLIC KEY-----\n-----END PUBLIC KEY-----\n",
        ];
        for input in inputs {
            assert!(matches!(
                validate_public_key(input, Algorithm::EcP256),
                Err(ValidationError::MalformedPem(_))
            ));
        }
    }

    #[test]
    fn test_private_key_label_is_rejected() {
        let pair = generate(Algorithm::EcP256).unwrap();
        let err = validate_public_key(pair.private_key_pem().as_bytes(), Algorithm::EcP256).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedPem(_)));
    }

    #[test]
    fn test_single_byte_mutation_is_rejected() {
        let pair = generate(Algorithm::EcP256).unwrap();
        let original = pair.public_key_pem().as_bytes().to_vec();
        let body_start = original.iter().position(|&b| b == b'\n').unwrap() + 1;
        let body_end = original.len() - "-----END PUBLIC KEY-----\n".len();

        for i in body_start..body_end {
            if original[i] == b'\n' {
                continue;
            }
            let mut mutated = original.clone();
            mutated[i] = if original[i] == b'A' { b'B' } else { b'A' };
            if mutated == original {
                continue;
            }
            assert!(
                validate_public_key(&mutated, Algorithm::EcP256).is_err(),
                "mutation at byte {} was accepted",
                i
            );
        }

        let mut header = original.clone();
        header[11] = b'X';
        assert!(validate_public_key(&header, Algorithm::EcP256).is_err());
    }

    #[test]
    fn test_validate_key_pair() {
        let pair = generate(Algorithm::EcP256).unwrap();
        let other = generate(Algorithm::EcP256).unwrap();
        let public = parse_public_key_pem(pair.public_key_pem().as_bytes()).unwrap();

        assert!(validate_key_pair(pair.private_key_pem().as_bytes(), &public).is_ok());
        assert_eq!(
            validate_key_pair(other.private_key_pem().as_bytes(), &public).unwrap_err(),
            ValidationError::KeyPairMismatch
        );
        assert!(matches!(
            validate_key_pair(b"junk", &public),
            Err(ValidationError::MalformedPrivateKey(_))
        ));
    }
}
