//! Errors raised while converting wire values into protocol types

use thiserror::Error;

/// Conversion errors for algorithm, mode and status enumerants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown algorithm '{0}': expected one of rsa:2048, rsa:4096, ec:secp256r1, ec:secp384r1, ec:secp521r1")]
    UnknownAlgorithm(String),

    #[error("invalid key mode '{0}': expected one of local, provider, remote, public_key")]
    InvalidMode(String),

    #[error("invalid key status '{0}': expected one of active, rotated")]
    InvalidStatus(String),
}
