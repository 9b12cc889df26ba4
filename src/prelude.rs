//! Commonly used types and traits
//!
//! ```rust
//! use opentdf_keys::prelude::*;
//!
//! let flags = KeyFlags::new().with_public_key_pem("cGVt");
//! assert_eq!(classify("https://kas.example.com"), IdentifierKind::Uri);
//! # let _ = flags;
//! ```

pub use crate::error::{KeyManagementError, RegistryError};
pub use crate::flags::KeyFlags;
pub use crate::identifier::{classify, resolve_kas, resolve_key, IdentifierKind};
pub use crate::lifecycle::KeyManager;
pub use crate::material::{prepare, prepare_import, PreparedKey};
pub use crate::options::{
    CreateKeyOptions, ImportKeyOptions, ListKeyMappingsOptions, ListKeysOptions, RotateKeyOptions,
    UnsafeDeleteOptions, UpdateKeyOptions,
};
pub use crate::registry::{Confirm, KeyRegistry};

pub use opentdf_keys_crypto::{
    generate, unwrap_key, validate_public_key, wrap_key, GenerationError, ValidationError,
    WrapError,
};
pub use opentdf_keys_protocol::{
    Algorithm, CreateKeyRequest, KasIdentifier, KasKey, KeyIdentifier, KeyMaterialRequest,
    KeyMode, KeyStatus, PrivateKeyCtx, PublicKeyCtx, RotateKeyRequest, RotateKeyResult,
};
