//! Elliptic curve key pairs over the NIST prime curves

use super::{GenerationError, KeyPairPem};
use elliptic_curve::{
    pkcs8::{
        der::oid::AssociatedOid, DecodePrivateKey, DecodePublicKey, EncodePrivateKey,
        EncodePublicKey, LineEnding,
    },
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey, SecretKey,
};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand::rngs::OsRng;

/// Generate an EC key pair on the curve with the given field size
pub(super) fn generate(bits: u32) -> Result<KeyPairPem, GenerationError> {
    match bits {
        256 => generate_on::<NistP256>(),
        384 => generate_on::<NistP384>(),
        521 => generate_on::<NistP521>(),
        other => Err(GenerationError::KeyGeneration(format!(
            "no named curve with {} bits",
            other
        ))),
    }
}

fn generate_on<C>() -> Result<KeyPairPem, GenerationError>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret_key = SecretKey::<C>::random(&mut OsRng);

    let private_key_pem = secret_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;
    let public_key_pem = secret_key
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;

    Ok(KeyPairPem::new(private_key_pem, public_key_pem))
}

/// Decode an SPKI public key; the curve OID in the document must match `C`
pub(super) fn public_from_spki<C>(der: &[u8]) -> Option<PublicKey<C>>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    PublicKey::<C>::from_public_key_der(der).ok()
}

/// Public half of a PKCS#8 (`pkcs8 == true`) or SEC1 private key
pub(super) fn public_from_private<C>(der: &[u8], pkcs8: bool) -> Option<PublicKey<C>>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret_key = if pkcs8 {
        SecretKey::<C>::from_pkcs8_der(der).ok()?
    } else {
        SecretKey::<C>::from_sec1_der(der).ok()?
    };
    Some(secret_key.public_key())
}

pub(super) fn to_spki_der<C>(key: &PublicKey<C>) -> Result<Vec<u8>, pkcs8::spki::Error>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    Ok(key.to_public_key_der()?.as_bytes().to_vec())
}
