//! Common test utilities for opentdf-keys integration tests
//!
//! Provides an in-memory key registry that records every call, plus key
//! fixtures shared across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use opentdf_keys::{KeyRegistry, RegistryError};
use opentdf_keys_crypto::generate;
use opentdf_keys_protocol::{
    Algorithm, AsymmetricKey, CreateKeyRequest, GetKeyRequest, KasIdentifier, KasKey,
    KeyAccessServer, KeyIdentifier, KeyMapping, KeyMaterialRequest, KeyStatus,
    ListKeyMappingsRequest, ListKeyMappingsResponse, ListKeysRequest, ListKeysResponse, Mapping,
    Metadata, MetadataMutable, PageResponse, ProviderConfig, RotateKeyRequest, RotateKeyResult,
    RotatedResources, SetBaseKeyRequest, SetBaseKeyResponse, SimpleKasKey, SimplePublicKey,
    UnsafeDeleteKeyRequest, UpdateKeyRequest,
};
use std::sync::Mutex;
use uuid::Uuid;

pub const KAS_ID: Uuid = Uuid::from_u128(0x6f1c_2a8e_41d3_4b7a_9c55_0d3e_7f21_a9b4);
pub const KAS_URI: &str = "https://kas.example.com";
pub const KAS_NAME: &str = "primary";

/// 32 zero bytes, hex encoded
pub fn zero_wrapping_key_hex() -> String {
    "00".repeat(32)
}

/// Base64 of a freshly generated public key PEM
pub fn public_key_b64(algorithm: Algorithm) -> String {
    let pair = generate(algorithm).unwrap();
    BASE64.encode(pair.public_key_pem())
}

/// Base64 of both halves of a freshly generated key pair: `(public, private)`
pub fn key_pair_b64(algorithm: Algorithm) -> (String, String) {
    let pair = generate(algorithm).unwrap();
    (
        BASE64.encode(pair.public_key_pem()),
        BASE64.encode(pair.private_key_pem()),
    )
}

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A call received by [`MockRegistry`]
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryCall {
    GetKas(KasIdentifier),
    CreateKey(CreateKeyRequest),
    GetKey(GetKeyRequest),
    ListKeys(ListKeysRequest),
    ListKeyMappings(ListKeyMappingsRequest),
    RotateKey(RotateKeyRequest),
    UpdateKey(UpdateKeyRequest),
    UnsafeDeleteKey(UnsafeDeleteKeyRequest),
    GetBaseKey,
    SetBaseKey(SetBaseKeyRequest),
}

/// In-memory registry with a single KAS
pub struct MockRegistry {
    kas: KeyAccessServer,
    calls: Mutex<Vec<RegistryCall>>,
    base_key: Mutex<Option<SimpleKasKey>>,
    failure: Option<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            kas: KeyAccessServer {
                id: KAS_ID,
                uri: KAS_URI.to_string(),
                name: Some(KAS_NAME.to_string()),
            },
            calls: Mutex::new(Vec::new()),
            base_key: Mutex::new(None),
            failure: None,
        }
    }

    /// A registry whose every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single create request received, if any
    pub fn created(&self) -> Option<CreateKeyRequest> {
        self.calls().into_iter().find_map(|call| match call {
            RegistryCall::CreateKey(request) => Some(request),
            _ => None,
        })
    }

    /// Current base key, as a test would see it in the registry
    pub fn base_key(&self) -> Option<SimpleKasKey> {
        self.base_key.lock().unwrap().clone()
    }

    fn simple_key(&self, kid: &str) -> SimpleKasKey {
        SimpleKasKey {
            kas_id: self.kas.id,
            kas_uri: self.kas.uri.clone(),
            public_key: SimplePublicKey {
                algorithm: Algorithm::EcP256,
                kid: kid.to_string(),
                pem: "c3RvcmVk".to_string(),
            },
        }
    }

    fn record(&self, call: RegistryCall) -> Result<(), RegistryError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }

    fn kas_key(&self, material: &KeyMaterialRequest, metadata: Option<&MetadataMutable>) -> KasKey {
        KasKey {
            kas_id: self.kas.id,
            kas_uri: self.kas.uri.clone(),
            key: AsymmetricKey {
                id: Uuid::new_v4(),
                key_id: material.key_id.clone(),
                key_algorithm: material.algorithm,
                key_status: KeyStatus::Active,
                key_mode: material.mode,
                public_key_ctx: material.public_key_ctx.clone(),
                private_key_ctx: material.private_key_ctx.clone(),
                provider_config: material.provider_config_id.clone().map(|id| ProviderConfig {
                    id,
                    name: "test-provider".to_string(),
                }),
                legacy: material.legacy,
                metadata: metadata.map(|m| Metadata {
                    labels: m.labels.clone(),
                    ..Metadata::default()
                }),
            },
        }
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn mapping(fqn: &str) -> Mapping {
    Mapping {
        id: Uuid::new_v4().to_string(),
        fqn: fqn.to_string(),
    }
}

#[async_trait]
impl KeyRegistry for MockRegistry {
    async fn get_kas(&self, identifier: &KasIdentifier) -> Result<KeyAccessServer, RegistryError> {
        self.record(RegistryCall::GetKas(identifier.clone()))?;
        let found = match identifier {
            KasIdentifier::Id(id) => *id == self.kas.id,
            KasIdentifier::Uri(uri) => *uri == self.kas.uri,
            KasIdentifier::Name(name) => self.kas.name.as_deref() == Some(name.as_str()),
            KasIdentifier::Any => false,
        };
        if found {
            Ok(self.kas.clone())
        } else {
            Err(format!("kas {} not found", identifier).into())
        }
    }

    async fn create_key(&self, request: CreateKeyRequest) -> Result<KasKey, RegistryError> {
        self.record(RegistryCall::CreateKey(request.clone()))?;
        Ok(self.kas_key(&request.key, request.metadata.as_ref()))
    }

    async fn get_key(&self, request: GetKeyRequest) -> Result<KasKey, RegistryError> {
        self.record(RegistryCall::GetKey(request.clone()))?;
        let (id, key_id) = match request.identifier {
            KeyIdentifier::Id(id) => (id, "stored".to_string()),
            KeyIdentifier::Kid { kid, .. } => (Uuid::new_v4(), kid),
        };
        let mut key = self.kas_key(&stored_material(&key_id), None);
        key.key.id = id;
        Ok(key)
    }

    async fn list_keys(&self, request: ListKeysRequest) -> Result<ListKeysResponse, RegistryError> {
        self.record(RegistryCall::ListKeys(request.clone()))?;
        let kas_keys: Vec<KasKey> = ["k1", "k2"]
            .into_iter()
            .map(|kid| self.kas_key(&stored_material(kid), None))
            .filter(|key| {
                request
                    .key_algorithm
                    .map_or(true, |alg| key.key.key_algorithm == alg)
            })
            .collect();
        let total = kas_keys.len() as u32;
        Ok(ListKeysResponse {
            kas_keys,
            pagination: PageResponse {
                current_offset: request.pagination.offset,
                next_offset: 0,
                total,
            },
        })
    }

    async fn list_key_mappings(
        &self,
        request: ListKeyMappingsRequest,
    ) -> Result<ListKeyMappingsResponse, RegistryError> {
        self.record(RegistryCall::ListKeyMappings(request.clone()))?;
        Ok(ListKeyMappingsResponse {
            key_mappings: vec![KeyMapping {
                kid: "k1".to_string(),
                kas_uri: self.kas.uri.clone(),
                namespace_mappings: vec![mapping("https://example.com")],
                attribute_mappings: vec![mapping("https://example.com/attr/clearance")],
                value_mappings: vec![],
            }],
            pagination: PageResponse {
                current_offset: request.pagination.offset,
                next_offset: 0,
                total: 1,
            },
        })
    }

    async fn rotate_key(&self, request: RotateKeyRequest) -> Result<RotateKeyResult, RegistryError> {
        self.record(RegistryCall::RotateKey(request.clone()))?;
        let old_kid = match &request.active_key {
            KeyIdentifier::Id(id) => id.to_string(),
            KeyIdentifier::Kid { kid, .. } => kid.clone(),
        };
        let mut rotated_out = self.kas_key(&stored_material(&old_kid), None);
        rotated_out.key.key_status = KeyStatus::Rotated;

        Ok(RotateKeyResult {
            kas_key: self.kas_key(&request.new_key, request.metadata.as_ref()),
            rotated_resources: RotatedResources {
                rotated_out_key: Some(rotated_out),
                attribute_definition_mappings: vec![mapping("https://example.com/attr/clearance")],
                attribute_value_mappings: vec![mapping(
                    "https://example.com/attr/clearance/value/secret",
                )],
                namespace_mappings: vec![],
            },
        })
    }

    async fn update_key(&self, request: UpdateKeyRequest) -> Result<KasKey, RegistryError> {
        self.record(RegistryCall::UpdateKey(request.clone()))?;
        let mut key = self.kas_key(&stored_material("stored"), request.metadata.as_ref());
        key.key.id = request.id;
        Ok(key)
    }

    async fn get_base_key(&self) -> Result<Option<SimpleKasKey>, RegistryError> {
        self.record(RegistryCall::GetBaseKey)?;
        Ok(self.base_key())
    }

    async fn set_base_key(
        &self,
        request: SetBaseKeyRequest,
    ) -> Result<SetBaseKeyResponse, RegistryError> {
        self.record(RegistryCall::SetBaseKey(request.clone()))?;
        let kid = match &request.active_key {
            KeyIdentifier::Id(id) => id.to_string(),
            KeyIdentifier::Kid { kid, .. } => kid.clone(),
        };
        let new_base_key = self.simple_key(&kid);
        let previous_base_key = self.base_key.lock().unwrap().replace(new_base_key.clone());
        Ok(SetBaseKeyResponse {
            new_base_key,
            previous_base_key,
        })
    }

    async fn unsafe_delete_key(
        &self,
        request: UnsafeDeleteKeyRequest,
    ) -> Result<KasKey, RegistryError> {
        self.record(RegistryCall::UnsafeDeleteKey(request.clone()))?;
        let mut key = self.kas_key(&stored_material(&request.kid), None);
        key.key.id = request.id;
        Ok(key)
    }
}

/// Material of a key already held by the registry
fn stored_material(kid: &str) -> KeyMaterialRequest {
    KeyMaterialRequest {
        key_id: kid.to_string(),
        algorithm: Algorithm::EcP256,
        mode: opentdf_keys_protocol::KeyMode::PublicKeyOnly,
        public_key_ctx: opentdf_keys_protocol::PublicKeyCtx {
            pem: "c3RvcmVk".to_string(),
        },
        private_key_ctx: None,
        provider_config_id: None,
        legacy: false,
    }
}
