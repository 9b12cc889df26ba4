//! Key registry collaborator
//!
//! The registry stores keys and KAS entries. Its transport is not part of
//! this crate: implement [`KeyRegistry`] over whatever client reaches the
//! policy service. Errors are passed back to callers unchanged inside
//! [`KeyManagementError::RegistryCallFailed`](crate::KeyManagementError).

use crate::error::RegistryError;
use async_trait::async_trait;
use opentdf_keys_protocol::{
    CreateKeyRequest, GetKeyRequest, KasIdentifier, KasKey, KeyAccessServer,
    ListKeyMappingsRequest, ListKeyMappingsResponse, ListKeysRequest, ListKeysResponse,
    RotateKeyRequest, RotateKeyResult, SetBaseKeyRequest, SetBaseKeyResponse, SimpleKasKey,
    UnsafeDeleteKeyRequest, UpdateKeyRequest,
};

/// Calls the lifecycle operations make against the key registry
#[async_trait]
pub trait KeyRegistry: Send + Sync {
    /// Look up a KAS registry entry by id, URI or name
    async fn get_kas(&self, identifier: &KasIdentifier) -> Result<KeyAccessServer, RegistryError>;

    async fn create_key(&self, request: CreateKeyRequest) -> Result<KasKey, RegistryError>;

    async fn get_key(&self, request: GetKeyRequest) -> Result<KasKey, RegistryError>;

    async fn list_keys(&self, request: ListKeysRequest) -> Result<ListKeysResponse, RegistryError>;

    async fn list_key_mappings(
        &self,
        request: ListKeyMappingsRequest,
    ) -> Result<ListKeyMappingsResponse, RegistryError>;

    /// Replace the active key and move its mappings onto the new key
    async fn rotate_key(&self, request: RotateKeyRequest) -> Result<RotateKeyResult, RegistryError>;

    /// Change the labels of a stored key
    async fn update_key(&self, request: UpdateKeyRequest) -> Result<KasKey, RegistryError>;

    /// Remove a key irreversibly; returns the deleted key
    async fn unsafe_delete_key(
        &self,
        request: UnsafeDeleteKeyRequest,
    ) -> Result<KasKey, RegistryError>;

    /// The current base key; `None` when none is set
    async fn get_base_key(&self) -> Result<Option<SimpleKasKey>, RegistryError>;

    async fn set_base_key(
        &self,
        request: SetBaseKeyRequest,
    ) -> Result<SetBaseKeyResponse, RegistryError>;
}

/// Confirmation step for destructive operations
pub trait Confirm {
    /// Return true to go ahead
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
