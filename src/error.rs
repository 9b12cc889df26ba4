//! Unified error type for key management operations
//!
//! The crypto and protocol crates keep their own error enums. This type
//! collects them under one taxonomy so callers can branch on the kind of
//! failure instead of matching message text.
//!
//! # Example
//!
//! ```no_run
//! use opentdf_keys::KeyManagementError;
//!
//! fn report(err: &KeyManagementError) {
//!     if err.is_local() {
//!         eprintln!("fix input ({}): {}", err.error_code(), err);
//!     }
//! }
//! ```

use opentdf_keys_crypto::{GenerationError, ValidationError, WrapError};
use opentdf_keys_protocol::KeyMode;
use thiserror::Error;

/// Error returned by a [`KeyRegistry`](crate::KeyRegistry) implementation
pub type RegistryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors for all key management operations
///
/// Every variant except [`KeyManagementError::RegistryCallFailed`] and
/// [`KeyManagementError::NoBaseKey`] is raised locally, before any registry
/// call is made.
#[derive(Debug, Error)]
pub enum KeyManagementError {
    /// Identifier could not be classified as a UUID, URI or name
    #[error("Invalid {argument} identifier: '{input}'")]
    InvalidIdentifier {
        argument: &'static str,
        input: String,
    },

    #[error("Unknown algorithm '{0}': expected one of rsa:2048, rsa:4096, ec:secp256r1, ec:secp384r1, ec:secp521r1")]
    UnknownAlgorithm(String),

    #[error("Invalid key mode '{0}': expected one of local, provider, remote, public_key")]
    InvalidMode(String),

    #[error("wrapping-key-id is required for mode {mode}")]
    MissingWrappingKeyId { mode: KeyMode },

    /// Mode-specific required field is absent
    #[error("{field} is required for mode {mode}")]
    MissingField { field: &'static str, mode: KeyMode },

    /// Operation argument that no mode can do without
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// A hex or base64 field failed to decode
    #[error("{field} could not be decoded: {reason}")]
    DecodeError { field: &'static str, reason: String },

    #[error("Invalid label '{0}': expected key=value")]
    InvalidLabel(String),

    #[error("Key generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Key wrapping failed: {0}")]
    Wrap(#[from] WrapError),

    #[error("Key validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The registry answered but holds no base key
    #[error("No base key is set")]
    NoBaseKey,

    /// Unsafe operation was declined at the confirmation step
    #[error("{operation} aborted: not confirmed")]
    Aborted { operation: &'static str },

    /// The registry collaborator failed; the transport error is kept as source
    #[error("Registry call {operation} failed: {source}")]
    RegistryCallFailed {
        operation: &'static str,
        #[source]
        source: RegistryError,
    },
}

impl KeyManagementError {
    pub(crate) fn registry(operation: &'static str) -> impl FnOnce(RegistryError) -> Self {
        move |source| KeyManagementError::RegistryCallFailed { operation, source }
    }

    /// Returns true if the error is potentially retryable
    ///
    /// No retry happens at this layer; registry failures are forwarded
    /// unmodified and the transport decides.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns true if the error was detected without contacting the registry
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::RegistryCallFailed { .. } | Self::NoBaseKey)
    }

    /// Returns a suggestion for resolving this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::InvalidIdentifier { .. } => {
                Some("Pass a KAS id (UUID), a URI with scheme and host, or a registered name")
            }
            Self::UnknownAlgorithm(_) => {
                Some("Use one of rsa:2048, rsa:4096, ec:secp256r1, ec:secp384r1, ec:secp521r1")
            }
            Self::InvalidMode(_) => Some("Use one of local, provider, remote, public_key"),
            Self::MissingWrappingKeyId { .. } => {
                Some("Set wrapping-key-id to the id of the key encryption key")
            }
            Self::DecodeError { .. } => {
                Some("wrapping-key must be hex; PEM arguments must be base64 of the PEM text")
            }
            Self::Wrap(WrapError::InvalidKeyLength { .. }) => {
                Some("The wrapping key must be 32 bytes (64 hex characters)")
            }
            Self::Validation(ValidationError::AlgorithmMismatch { .. }) => {
                Some("Check that the algorithm argument matches the supplied public key")
            }
            Self::Validation(ValidationError::KeyPairMismatch) => {
                Some("The private key must be the private half of the supplied public key")
            }
            Self::InvalidLabel(_) => Some("Labels are written as key=value"),
            Self::Aborted { .. } => Some("Confirm the operation or pass force"),
            Self::NoBaseKey => Some("Set a base key with set_base_key"),
            _ => None,
        }
    }

    /// Returns an error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            Self::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            Self::InvalidMode(_) => "INVALID_MODE",
            Self::MissingWrappingKeyId { .. } => "MISSING_WRAPPING_KEY_ID",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::MissingArgument(_) => "MISSING_ARGUMENT",
            Self::DecodeError { .. } => "DECODE_ERROR",
            Self::InvalidLabel(_) => "INVALID_LABEL",
            Self::Generation(_) => "GENERATION_ERROR",
            Self::Wrap(WrapError::InvalidKeyLength { .. }) => "INVALID_KEY_LENGTH",
            Self::Wrap(_) => "WRAP_ERROR",
            Self::Validation(ValidationError::AlgorithmMismatch { .. }) => "ALGORITHM_MISMATCH",
            Self::Validation(ValidationError::KeyPairMismatch) => "KEY_PAIR_MISMATCH",
            Self::Validation(_) => "MALFORMED_PEM",
            Self::NoBaseKey => "NO_BASE_KEY",
            Self::Aborted { .. } => "ABORTED",
            Self::RegistryCallFailed { .. } => "REGISTRY_CALL_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_field_names_field_and_mode() {
        let err = KeyManagementError::MissingField {
            field: "provider-config-id",
            mode: KeyMode::Remote,
        };
        assert_eq!(err.to_string(), "provider-config-id is required for mode remote");
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_missing_wrapping_key_id_message() {
        let err = KeyManagementError::MissingWrappingKeyId {
            mode: KeyMode::LocalRoot,
        };
        assert_eq!(err.to_string(), "wrapping-key-id is required for mode local");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_registry_error_keeps_source() {
        let transport = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = KeyManagementError::registry("create_key")(Box::new(transport));
        assert!(!err.is_local());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "REGISTRY_CALL_FAILED");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_crypto_errors_convert() {
        let err: KeyManagementError = WrapError::InvalidKeyLength {
            expected: 32,
            got: 16,
        }
        .into();
        assert!(err.is_local());
        assert_eq!(err.error_code(), "INVALID_KEY_LENGTH");

        let err: KeyManagementError = ValidationError::KeyPairMismatch.into();
        assert_eq!(err.error_code(), "KEY_PAIR_MISMATCH");
    }

    #[test]
    fn test_missing_base_key_is_not_local() {
        let err = KeyManagementError::NoBaseKey;
        assert!(!err.is_local());
        assert_eq!(err.error_code(), "NO_BASE_KEY");
        assert!(err.suggestion().is_some());
    }
}
