//! OpenTDF Key Management Protocol Types
//!
//! This crate contains the data structures exchanged with the KAS key
//! registry:
//! - Algorithm, key mode and key status enumerants with their wire forms
//! - KAS and key identifiers
//! - Create/import/rotate/update/delete requests and the key records returned
//! - Base key get/set payloads
//!
//! This crate contains NO cryptographic operations and NO I/O.

pub mod algorithm;
pub mod error;
pub mod identifier;
pub mod kas;
pub mod mode;

pub use algorithm::{Algorithm, KeyFamily, KeySize};
pub use error::ParseError;
pub use identifier::{KasIdentifier, KeyIdentifier};
pub use kas::{
    AsymmetricKey, CreateKeyRequest, GetKeyRequest, KasKey, KeyAccessServer, KeyMapping,
    KeyMaterialRequest, ListKeyMappingsRequest, ListKeyMappingsResponse, ListKeysRequest,
    ListKeysResponse, Mapping, Metadata, MetadataMutable, MetadataUpdateBehavior, PageRequest,
    PageResponse, PrivateKeyCtx, ProviderConfig, PublicKeyCtx, RotateKeyRequest,
    RotateKeyResult, RotatedResources, SetBaseKeyRequest, SetBaseKeyResponse, SimpleKasKey,
    SimplePublicKey, UnsafeDeleteKeyRequest, UpdateKeyRequest,
};
pub use mode::{KeyMode, KeyStatus};
