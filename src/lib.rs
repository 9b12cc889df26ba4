//! OpenTDF KAS key management
//!
//! Prepares, validates and submits asymmetric keys held by a Key Access
//! Server registry:
//! - [`KeyManager`] runs the key lifecycle (create, import, rotate, update,
//!   unsafe delete, base key) against any [`KeyRegistry`] implementation
//! - [`prepare`] builds the key contexts for each [`KeyMode`]
//! - [`classify`] and [`resolve_kas`] turn free-form identifiers into typed
//!   lookups
//!
//! Key generation, validation and wrapping live in `opentdf-keys-crypto`;
//! wire types live in `opentdf-keys-protocol`.
//!
//! # Example
//!
//! ```
//! use opentdf_keys::{prepare, Algorithm, KeyFlags, KeyMode};
//!
//! # fn example() -> Result<(), opentdf_keys::KeyManagementError> {
//! let flags = KeyFlags::new()
//!     .with_wrapping_key("00".repeat(32))
//!     .with_wrapping_key_id("kek-1");
//! let prepared = prepare(KeyMode::LocalRoot, Algorithm::EcP256, &flags)?;
//! assert!(prepared.private_key_ctx.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod flags;
pub mod identifier;
pub mod lifecycle;
pub mod material;
pub mod options;
pub mod prelude;
pub mod registry;

pub use error::{KeyManagementError, RegistryError};
pub use flags::KeyFlags;
pub use identifier::{classify, resolve_kas, resolve_key, IdentifierKind};
pub use lifecycle::KeyManager;
pub use material::{prepare, prepare_import, PreparedKey};
pub use options::{
    parse_labels, CreateKeyOptions, ImportKeyOptions, ListKeyMappingsOptions, ListKeysOptions,
    RotateKeyOptions, UnsafeDeleteOptions, UpdateKeyOptions,
};
pub use registry::{Confirm, KeyRegistry};

pub use opentdf_keys_protocol::{
    Algorithm, KasIdentifier, KasKey, KeyFamily, KeyIdentifier, KeyMode, KeySize, KeyStatus,
    MetadataUpdateBehavior,
};
