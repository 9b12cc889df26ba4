//! KAS key registry request and record types
//!
//! These are the payloads exchanged with the key registry service. Building
//! them is the job of the key management crate; transporting them is the job
//! of whatever implements the registry client.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::Algorithm;
use crate::identifier::{KasIdentifier, KeyIdentifier};
use crate::mode::{KeyMode, KeyStatus};

/// Public half of a key as registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyCtx {
    /// Base64 of the PEM text
    pub pem: String,
}

/// Private half of a key as registered
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyCtx {
    /// Id of the key that wrapped `wrapped_key`
    #[serde(rename = "keyId")]
    pub wrapping_key_id: String,
    /// Base64 of the wrapped private key; absent for remote keys
    #[serde(rename = "wrappedKey", skip_serializing_if = "Option::is_none", default)]
    pub wrapped_key: Option<String>,
}

impl fmt::Debug for PrivateKeyCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyCtx")
            .field("wrapping_key_id", &self.wrapping_key_id)
            .field(
                "wrapped_key",
                &self.wrapped_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Labels attached on create/update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataMutable {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl MetadataMutable {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Metadata as returned by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Key material for a create, import or rotate request
///
/// Assembled once per operation and handed to the registry client as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterialRequest {
    #[serde(rename = "keyId")]
    pub key_id: String,
    #[serde(rename = "keyAlgorithm")]
    pub algorithm: Algorithm,
    #[serde(rename = "keyMode")]
    pub mode: KeyMode,
    #[serde(rename = "publicKeyCtx")]
    pub public_key_ctx: PublicKeyCtx,
    #[serde(rename = "privateKeyCtx", skip_serializing_if = "Option::is_none", default)]
    pub private_key_ctx: Option<PrivateKeyCtx>,
    #[serde(rename = "providerConfigId", skip_serializing_if = "Option::is_none", default)]
    pub provider_config_id: Option<String>,
    #[serde(default)]
    pub legacy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKeyRequest {
    #[serde(rename = "kasId")]
    pub kas_id: Uuid,
    #[serde(flatten)]
    pub key: KeyMaterialRequest,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<MetadataMutable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetKeyRequest {
    pub identifier: KeyIdentifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "currentOffset")]
    pub current_offset: u32,
    #[serde(rename = "nextOffset")]
    pub next_offset: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeysRequest {
    pub pagination: PageRequest,
    #[serde(rename = "keyAlgorithm", skip_serializing_if = "Option::is_none", default)]
    pub key_algorithm: Option<Algorithm>,
    #[serde(rename = "kasFilter")]
    pub kas_filter: KasIdentifier,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legacy: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeysResponse {
    #[serde(rename = "kasKeys")]
    pub kas_keys: Vec<KasKey>,
    pub pagination: PageResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeyMappingsRequest {
    pub pagination: PageRequest,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<KeyIdentifier>,
}

/// Policy object a key is mapped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub id: String,
    pub fqn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapping {
    pub kid: String,
    #[serde(rename = "kasUri")]
    pub kas_uri: String,
    #[serde(rename = "namespaceMappings", default)]
    pub namespace_mappings: Vec<Mapping>,
    #[serde(rename = "attributeMappings", default)]
    pub attribute_mappings: Vec<Mapping>,
    #[serde(rename = "valueMappings", default)]
    pub value_mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeyMappingsResponse {
    #[serde(rename = "keyMappings")]
    pub key_mappings: Vec<KeyMapping>,
    pub pagination: PageResponse,
}

/// Rotation: the currently active key plus the material replacing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateKeyRequest {
    #[serde(rename = "activeKey")]
    pub active_key: KeyIdentifier,
    #[serde(rename = "newKey")]
    pub new_key: KeyMaterialRequest,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<MetadataMutable>,
}

/// Policy objects moved from the rotated-out key to the new one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatedResources {
    #[serde(rename = "rotatedOutKey", skip_serializing_if = "Option::is_none", default)]
    pub rotated_out_key: Option<KasKey>,
    #[serde(rename = "attributeDefinitionMappings", default)]
    pub attribute_definition_mappings: Vec<Mapping>,
    #[serde(rename = "attributeValueMappings", default)]
    pub attribute_value_mappings: Vec<Mapping>,
    #[serde(rename = "namespaceMappings", default)]
    pub namespace_mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateKeyResult {
    #[serde(rename = "kasKey")]
    pub kas_key: KasKey,
    #[serde(rename = "rotatedResources")]
    pub rotated_resources: RotatedResources,
}

/// Irreversible delete; every field must match the stored key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsafeDeleteKeyRequest {
    pub id: Uuid,
    pub kid: String,
    #[serde(rename = "kasUri")]
    pub kas_uri: String,
}

/// How labels on an update combine with the labels already stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataUpdateBehavior {
    /// Add or overwrite the given labels, keep the rest
    #[default]
    Append,
    /// Drop every stored label and keep only the given ones
    Replace,
}

impl fmt::Display for MetadataUpdateBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataUpdateBehavior::Append => write!(f, "append"),
            MetadataUpdateBehavior::Replace => write!(f, "replace"),
        }
    }
}

/// Metadata update for a stored key; key material is immutable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateKeyRequest {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<MetadataMutable>,
    #[serde(rename = "metadataUpdateBehavior", default)]
    pub behavior: MetadataUpdateBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePublicKey {
    pub algorithm: Algorithm,
    pub kid: String,
    /// Base64 of the PEM text
    pub pem: String,
}

/// Public view of a key, as reported for the base key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleKasKey {
    #[serde(rename = "kasId")]
    pub kas_id: Uuid,
    #[serde(rename = "kasUri")]
    pub kas_uri: String,
    #[serde(rename = "publicKey")]
    pub public_key: SimplePublicKey,
}

/// Make an existing key the default key for new encryptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBaseKeyRequest {
    #[serde(rename = "activeKey")]
    pub active_key: KeyIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBaseKeyResponse {
    #[serde(rename = "newBaseKey")]
    pub new_base_key: SimpleKasKey,
    #[serde(rename = "previousBaseKey", skip_serializing_if = "Option::is_none", default)]
    pub previous_base_key: Option<SimpleKasKey>,
}

/// KAS registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAccessServer {
    pub id: Uuid,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub name: String,
}

/// A key as stored by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsymmetricKey {
    pub id: Uuid,
    #[serde(rename = "keyId")]
    pub key_id: String,
    #[serde(rename = "keyAlgorithm")]
    pub key_algorithm: Algorithm,
    #[serde(rename = "keyStatus")]
    pub key_status: KeyStatus,
    #[serde(rename = "keyMode")]
    pub key_mode: KeyMode,
    #[serde(rename = "publicKeyCtx")]
    pub public_key_ctx: PublicKeyCtx,
    #[serde(rename = "privateKeyCtx", skip_serializing_if = "Option::is_none", default)]
    pub private_key_ctx: Option<PrivateKeyCtx>,
    #[serde(rename = "providerConfig", skip_serializing_if = "Option::is_none", default)]
    pub provider_config: Option<ProviderConfig>,
    #[serde(default)]
    pub legacy: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<Metadata>,
}

/// Key together with the KAS that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KasKey {
    #[serde(rename = "kasId")]
    pub kas_id: Uuid,
    #[serde(rename = "kasUri")]
    pub kas_uri: String,
    pub key: AsymmetricKey,
}
