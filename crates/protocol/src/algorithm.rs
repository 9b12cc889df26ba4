//! Asymmetric key algorithms managed by the KAS key registry
//!
//! The registry stores the algorithm as a numeric enumerant; administrators
//! and the registry's JSON surface use the string forms below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// RSA with a 2048-bit modulus
pub const RSA_2048: &str = "rsa:2048";
/// RSA with a 4096-bit modulus
pub const RSA_4096: &str = "rsa:4096";
/// EC over NIST P-256
pub const EC_P256: &str = "ec:secp256r1";
/// EC over NIST P-384
pub const EC_P384: &str = "ec:secp384r1";
/// EC over NIST P-521
pub const EC_P521: &str = "ec:secp521r1";

/// Key algorithm enumerant
///
/// `Unspecified` exists only because the registry's enum has a zero value.
/// It is never produced by [`Algorithm::parse`] and is rejected everywhere
/// key material is generated or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Unspecified,
    Rsa2048,
    Rsa4096,
    EcP256,
    EcP384,
    EcP521,
}

/// Key family implied by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Ec,
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFamily::Rsa => f.write_str("rsa"),
            KeyFamily::Ec => f.write_str("ec"),
        }
    }
}

/// Family plus modulus length (RSA) or curve size (EC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySize {
    pub family: KeyFamily,
    pub bits: u32,
}

impl KeySize {
    pub const fn rsa(bits: u32) -> Self {
        Self {
            family: KeyFamily::Rsa,
            bits,
        }
    }

    pub const fn ec(bits: u32) -> Self {
        Self {
            family: KeyFamily::Ec,
            bits,
        }
    }

    /// SEC 2 name of the curve, for EC sizes the registry supports
    pub fn curve_name(&self) -> Option<&'static str> {
        match (self.family, self.bits) {
            (KeyFamily::Ec, 256) => Some("secp256r1"),
            (KeyFamily::Ec, 384) => Some("secp384r1"),
            (KeyFamily::Ec, 521) => Some("secp521r1"),
            _ => None,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.curve_name() {
            Some(curve) => write!(f, "{}:{}", self.family, curve),
            None => write!(f, "{}:{}", self.family, self.bits),
        }
    }
}

impl Algorithm {
    /// The five algorithms that can be generated, imported or validated
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Rsa2048,
        Algorithm::Rsa4096,
        Algorithm::EcP256,
        Algorithm::EcP384,
        Algorithm::EcP521,
    ];

    /// Parse the string form (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            RSA_2048 => Ok(Algorithm::Rsa2048),
            RSA_4096 => Ok(Algorithm::Rsa4096),
            EC_P256 => Ok(Algorithm::EcP256),
            EC_P384 => Ok(Algorithm::EcP384),
            EC_P521 => Ok(Algorithm::EcP521),
            _ => Err(ParseError::UnknownAlgorithm(s.to_string())),
        }
    }

    /// String form used on the wire; fails for `Unspecified`
    pub fn as_str(&self) -> Result<&'static str, ParseError> {
        match self {
            Algorithm::Rsa2048 => Ok(RSA_2048),
            Algorithm::Rsa4096 => Ok(RSA_4096),
            Algorithm::EcP256 => Ok(EC_P256),
            Algorithm::EcP384 => Ok(EC_P384),
            Algorithm::EcP521 => Ok(EC_P521),
            Algorithm::Unspecified => Err(ParseError::UnknownAlgorithm("unspecified".to_string())),
        }
    }

    /// Generation and validation parameters for this algorithm
    pub fn key_size(&self) -> Option<KeySize> {
        match self {
            Algorithm::Rsa2048 => Some(KeySize::rsa(2048)),
            Algorithm::Rsa4096 => Some(KeySize::rsa(4096)),
            Algorithm::EcP256 => Some(KeySize::ec(256)),
            Algorithm::EcP384 => Some(KeySize::ec(384)),
            Algorithm::EcP521 => Some(KeySize::ec(521)),
            Algorithm::Unspecified => None,
        }
    }

    pub fn family(&self) -> Option<KeyFamily> {
        self.key_size().map(|size| size.family)
    }

    /// Inverse of [`Algorithm::key_size`]
    pub fn from_key_size(size: KeySize) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.key_size() == Some(size))
    }

    /// Registry enum value
    pub fn to_i32(self) -> i32 {
        match self {
            Algorithm::Unspecified => 0,
            Algorithm::Rsa2048 => 1,
            Algorithm::Rsa4096 => 2,
            Algorithm::EcP256 => 3,
            Algorithm::EcP384 => 4,
            Algorithm::EcP521 => 5,
        }
    }

    /// Convert a registry enum value; zero and unknown values are rejected
    pub fn from_i32(value: i32) -> Result<Self, ParseError> {
        match value {
            1 => Ok(Algorithm::Rsa2048),
            2 => Ok(Algorithm::Rsa4096),
            3 => Ok(Algorithm::EcP256),
            4 => Ok(Algorithm::EcP384),
            5 => Ok(Algorithm::EcP521),
            other => Err(ParseError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::parse(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unspecified"))
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self.as_str().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Algorithm::parse(&s).map_err(serde::de::Error::custom)
    }
}
