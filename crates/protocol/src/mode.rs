//! Key modes and key statuses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

pub const MODE_LOCAL: &str = "local";
pub const MODE_PROVIDER: &str = "provider";
pub const MODE_REMOTE: &str = "remote";
pub const MODE_PUBLIC_KEY: &str = "public_key";

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ROTATED: &str = "rotated";

/// Where a key's private half lives and who is responsible for wrapping it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyMode {
    #[default]
    Unspecified,
    /// Generated by the client and wrapped under a configured root key
    LocalRoot,
    /// Supplied by the caller, wrapped by an external provider
    ProviderRoot,
    /// Private half stays in a remote KMS; only the public key is registered
    Remote,
    /// Public key only, no private material anywhere in the registry
    PublicKeyOnly,
}

impl KeyMode {
    pub const ALL: [KeyMode; 4] = [
        KeyMode::LocalRoot,
        KeyMode::ProviderRoot,
        KeyMode::Remote,
        KeyMode::PublicKeyOnly,
    ];

    /// Parse the string form (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            MODE_LOCAL => Ok(KeyMode::LocalRoot),
            MODE_PROVIDER => Ok(KeyMode::ProviderRoot),
            MODE_REMOTE => Ok(KeyMode::Remote),
            MODE_PUBLIC_KEY => Ok(KeyMode::PublicKeyOnly),
            _ => Err(ParseError::InvalidMode(s.to_string())),
        }
    }

    pub fn as_str(&self) -> Result<&'static str, ParseError> {
        match self {
            KeyMode::LocalRoot => Ok(MODE_LOCAL),
            KeyMode::ProviderRoot => Ok(MODE_PROVIDER),
            KeyMode::Remote => Ok(MODE_REMOTE),
            KeyMode::PublicKeyOnly => Ok(MODE_PUBLIC_KEY),
            KeyMode::Unspecified => Err(ParseError::InvalidMode("unspecified".to_string())),
        }
    }

    /// Whether registering a key in this mode needs a wrapping key id
    pub fn requires_wrapping_key_id(&self) -> bool {
        !matches!(self, KeyMode::PublicKeyOnly)
    }

    /// Whether registering a key in this mode needs a provider configuration
    pub fn requires_provider_config(&self) -> bool {
        matches!(self, KeyMode::ProviderRoot | KeyMode::Remote)
    }

    pub fn to_i32(self) -> i32 {
        match self {
            KeyMode::Unspecified => 0,
            KeyMode::LocalRoot => 1,
            KeyMode::ProviderRoot => 2,
            KeyMode::Remote => 3,
            KeyMode::PublicKeyOnly => 4,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self, ParseError> {
        match value {
            1 => Ok(KeyMode::LocalRoot),
            2 => Ok(KeyMode::ProviderRoot),
            3 => Ok(KeyMode::Remote),
            4 => Ok(KeyMode::PublicKeyOnly),
            other => Err(ParseError::InvalidMode(other.to_string())),
        }
    }
}

impl FromStr for KeyMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyMode::parse(s)
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unspecified"))
    }
}

impl Serialize for KeyMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str().map_err(serde::ser::Error::custom)?)
    }
}

impl<'de> Deserialize<'de> for KeyMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyMode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Server-side key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStatus {
    #[default]
    Unspecified,
    Active,
    Rotated,
}

impl KeyStatus {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            STATUS_ACTIVE => Ok(KeyStatus::Active),
            STATUS_ROTATED => Ok(KeyStatus::Rotated),
            _ => Err(ParseError::InvalidStatus(s.to_string())),
        }
    }

    pub fn as_str(&self) -> Result<&'static str, ParseError> {
        match self {
            KeyStatus::Active => Ok(STATUS_ACTIVE),
            KeyStatus::Rotated => Ok(STATUS_ROTATED),
            KeyStatus::Unspecified => Err(ParseError::InvalidStatus("unspecified".to_string())),
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unspecified"))
    }
}

impl Serialize for KeyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str().map_err(serde::ser::Error::custom)?)
    }
}

impl<'de> Deserialize<'de> for KeyStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyStatus::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in KeyMode::ALL {
            assert_eq!(KeyMode::parse(mode.as_str().unwrap()).unwrap(), mode);
            assert_eq!(KeyMode::from_i32(mode.to_i32()).unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_wire_strings() {
        assert_eq!(KeyMode::parse("local").unwrap(), KeyMode::LocalRoot);
        assert_eq!(KeyMode::parse("Provider").unwrap(), KeyMode::ProviderRoot);
        assert_eq!(KeyMode::parse("REMOTE").unwrap(), KeyMode::Remote);
        assert_eq!(KeyMode::parse("public_key").unwrap(), KeyMode::PublicKeyOnly);
    }

    #[test]
    fn test_invalid_modes_rejected() {
        assert_eq!(
            KeyMode::parse("hsm").unwrap_err(),
            ParseError::InvalidMode("hsm".to_string())
        );
        assert!(KeyMode::parse("").is_err());
        assert!(KeyMode::Unspecified.as_str().is_err());
        assert!(KeyMode::from_i32(0).is_err());
    }

    #[test]
    fn test_mode_requirements() {
        assert!(KeyMode::LocalRoot.requires_wrapping_key_id());
        assert!(KeyMode::Remote.requires_wrapping_key_id());
        assert!(!KeyMode::PublicKeyOnly.requires_wrapping_key_id());
        assert!(KeyMode::ProviderRoot.requires_provider_config());
        assert!(KeyMode::Remote.requires_provider_config());
        assert!(!KeyMode::LocalRoot.requires_provider_config());
    }

    #[test]
    fn test_status_conversion() {
        assert_eq!(KeyStatus::parse("active").unwrap(), KeyStatus::Active);
        assert_eq!(KeyStatus::Rotated.as_str().unwrap(), "rotated");
        assert!(KeyStatus::Unspecified.as_str().is_err());
        assert!(KeyStatus::parse("retired").is_err());
    }
}
