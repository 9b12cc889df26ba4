//! Key lifecycle operations
//!
//! [`KeyManager`] composes identifier resolution and key material
//! preparation into single registry calls. Every local check runs before
//! the first registry call, so invalid input never produces a partial
//! submission.

use crate::error::KeyManagementError;
use crate::identifier::{resolve_kas, resolve_key};
use crate::material::{prepare, prepare_import, PreparedKey};
use crate::options::{
    parse_labels, CreateKeyOptions, ImportKeyOptions, ListKeyMappingsOptions, ListKeysOptions,
    RotateKeyOptions, UnsafeDeleteOptions, UpdateKeyOptions,
};
use crate::registry::{Confirm, KeyRegistry};
use opentdf_keys_protocol::{
    Algorithm, CreateKeyRequest, GetKeyRequest, KasIdentifier, KasKey, KeyIdentifier,
    KeyMaterialRequest, KeyMode, ListKeyMappingsRequest, ListKeyMappingsResponse, ListKeysRequest,
    ListKeysResponse, PageRequest, ParseError, RotateKeyRequest, RotateKeyResult,
    SetBaseKeyRequest, SetBaseKeyResponse, SimpleKasKey, UnsafeDeleteKeyRequest,
    UpdateKeyRequest,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Administrative client for KAS keys
pub struct KeyManager<R> {
    registry: R,
}

impl<R: KeyRegistry> KeyManager<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Canonical id of a KAS
    ///
    /// A UUID is returned as is. A URI or name is looked up in the registry.
    pub async fn resolve_kas_id(&self, kas: &KasIdentifier) -> Result<Uuid, KeyManagementError> {
        match kas {
            KasIdentifier::Id(id) => Ok(*id),
            KasIdentifier::Any => Err(KeyManagementError::MissingArgument("kas")),
            other => {
                debug!(kind = other.kind(), kas = %other, "Looking up KAS registry entry");
                let entry = self
                    .registry
                    .get_kas(other)
                    .await
                    .map_err(KeyManagementError::registry("get_kas"))?;
                Ok(entry.id)
            }
        }
    }

    /// Register a new key with a KAS
    pub async fn create_key(&self, options: &CreateKeyOptions) -> Result<KasKey, KeyManagementError> {
        let key_id = required_argument(&options.key_id, "key-id")?;
        let algorithm = parse_algorithm(&options.algorithm)?;
        let mode = parse_mode(&options.mode)?;
        let metadata = parse_labels(&options.labels)?;
        let kas = required_kas(&options.kas)?;
        let prepared = prepare(mode, algorithm, &options.flags)?;

        let kas_id = self.resolve_kas_id(&kas).await?;
        let request = CreateKeyRequest {
            kas_id,
            key: material_request(key_id, algorithm, mode, prepared, options.legacy),
            metadata,
        };

        info!(%kas_id, key_id, %algorithm, %mode, "Creating KAS key");
        self.registry
            .create_key(request)
            .await
            .map_err(KeyManagementError::registry("create_key"))
    }

    /// Register an existing key pair with a KAS
    ///
    /// The private key is re-wrapped under the supplied wrapping key and
    /// submitted as a `local` key.
    pub async fn import_key(&self, options: &ImportKeyOptions) -> Result<KasKey, KeyManagementError> {
        let key_id = required_argument(&options.key_id, "key-id")?;
        let algorithm = parse_algorithm(&options.algorithm)?;
        let metadata = parse_labels(&options.labels)?;
        let kas = required_kas(&options.kas)?;
        let prepared = prepare_import(algorithm, &options.flags)?;

        let kas_id = self.resolve_kas_id(&kas).await?;
        let request = CreateKeyRequest {
            kas_id,
            key: material_request(key_id, algorithm, KeyMode::LocalRoot, prepared, options.legacy),
            metadata,
        };

        info!(%kas_id, key_id, %algorithm, "Importing KAS key");
        self.registry
            .create_key(request)
            .await
            .map_err(KeyManagementError::registry("create_key"))
    }

    /// Replace an active key with newly prepared key material
    ///
    /// The old key is only referenced; its private material is never read.
    pub async fn rotate_key(
        &self,
        options: &RotateKeyOptions,
    ) -> Result<RotateKeyResult, KeyManagementError> {
        let active_key = resolve_key(&options.key, &options.kas)?;
        let new_key_id = required_argument(&options.new_key_id, "new-key-id")?;
        let algorithm = parse_algorithm(&options.algorithm)?;
        let mode = parse_mode(&options.mode)?;
        let metadata = parse_labels(&options.labels)?;
        let prepared = prepare(mode, algorithm, &options.flags)?;

        info!(active_key = %active_key, new_key_id, %algorithm, %mode, "Rotating KAS key");
        let request = RotateKeyRequest {
            active_key,
            new_key: material_request(new_key_id, algorithm, mode, prepared, options.legacy),
            metadata,
        };

        let result = self
            .registry
            .rotate_key(request)
            .await
            .map_err(KeyManagementError::registry("rotate_key"))?;

        let resources = &result.rotated_resources;
        debug!(
            attribute_definitions = resources.attribute_definition_mappings.len(),
            attribute_values = resources.attribute_value_mappings.len(),
            namespaces = resources.namespace_mappings.len(),
            "Mappings moved to rotated key"
        );
        Ok(result)
    }

    /// Delete a key irreversibly
    ///
    /// Asks `confirm` first unless `options.force` is set.
    pub async fn unsafe_delete_key(
        &self,
        options: &UnsafeDeleteOptions,
        confirm: &dyn Confirm,
    ) -> Result<KasKey, KeyManagementError> {
        let id = required_uuid(&options.id, "id")?;
        let kid = required_argument(&options.kid, "kid")?;
        let kas_uri = required_argument(&options.kas_uri, "kas-uri")?;

        if !options.force {
            let prompt = format!(
                "Delete key '{}' ({}) from {}? This cannot be undone",
                kid, id, kas_uri
            );
            if !confirm.confirm(&prompt) {
                return Err(KeyManagementError::Aborted {
                    operation: "unsafe delete",
                });
            }
        }

        warn!(%id, kid, kas_uri, "Unsafe delete of KAS key");
        self.registry
            .unsafe_delete_key(UnsafeDeleteKeyRequest {
                id,
                kid: kid.to_string(),
                kas_uri: kas_uri.to_string(),
            })
            .await
            .map_err(KeyManagementError::registry("unsafe_delete_key"))
    }

    /// Change the labels of a stored key and return the key as now stored
    pub async fn update_key(&self, options: &UpdateKeyOptions) -> Result<KasKey, KeyManagementError> {
        let id = required_uuid(&options.id, "id")?;
        let metadata = parse_labels(&options.labels)?;

        info!(%id, behavior = %options.behavior, "Updating KAS key metadata");
        let updated = self
            .registry
            .update_key(UpdateKeyRequest {
                id,
                metadata,
                behavior: options.behavior,
            })
            .await
            .map_err(KeyManagementError::registry("update_key"))?;

        self.registry
            .get_key(GetKeyRequest {
                identifier: KeyIdentifier::Id(updated.key.id),
            })
            .await
            .map_err(KeyManagementError::registry("get_key"))
    }

    pub async fn get_base_key(&self) -> Result<SimpleKasKey, KeyManagementError> {
        self.registry
            .get_base_key()
            .await
            .map_err(KeyManagementError::registry("get_base_key"))?
            .ok_or(KeyManagementError::NoBaseKey)
    }

    /// Make a key the base key
    ///
    /// `key` is a system id, or a key id together with `kas`.
    pub async fn set_base_key(
        &self,
        key: &str,
        kas: &str,
    ) -> Result<SetBaseKeyResponse, KeyManagementError> {
        let active_key = resolve_key(key, kas)?;

        info!(key = %active_key, "Setting base key");
        let response = self
            .registry
            .set_base_key(SetBaseKeyRequest { active_key })
            .await
            .map_err(KeyManagementError::registry("set_base_key"))?;

        if let Some(previous) = &response.previous_base_key {
            debug!(previous_kid = %previous.public_key.kid, "Replaced base key");
        }
        Ok(response)
    }

    /// Fetch one key by system id, or by key id within a KAS
    pub async fn get_key(&self, key: &str, kas: &str) -> Result<KasKey, KeyManagementError> {
        let identifier = resolve_key(key, kas)?;
        debug!(key = %identifier, "Getting KAS key");
        self.registry
            .get_key(GetKeyRequest { identifier })
            .await
            .map_err(KeyManagementError::registry("get_key"))
    }

    pub async fn list_keys(
        &self,
        options: &ListKeysOptions,
    ) -> Result<ListKeysResponse, KeyManagementError> {
        let key_algorithm = match options.algorithm.as_deref().map(str::trim) {
            Some(alg) if !alg.is_empty() => Some(parse_algorithm(alg)?),
            _ => None,
        };
        let kas_filter = resolve_kas(&options.kas)?;

        let request = ListKeysRequest {
            pagination: PageRequest {
                limit: options.limit,
                offset: options.offset,
            },
            key_algorithm,
            kas_filter,
            legacy: options.legacy,
        };
        debug!(kas = %request.kas_filter, limit = options.limit, offset = options.offset, "Listing KAS keys");
        self.registry
            .list_keys(request)
            .await
            .map_err(KeyManagementError::registry("list_keys"))
    }

    pub async fn list_key_mappings(
        &self,
        options: &ListKeyMappingsOptions,
    ) -> Result<ListKeyMappingsResponse, KeyManagementError> {
        let key = if options.key.trim().is_empty() {
            None
        } else {
            Some(resolve_key(&options.key, &options.kas)?)
        };

        let request = ListKeyMappingsRequest {
            pagination: PageRequest {
                limit: options.limit,
                offset: options.offset,
            },
            key,
        };
        self.registry
            .list_key_mappings(request)
            .await
            .map_err(KeyManagementError::registry("list_key_mappings"))
    }
}

fn material_request(
    key_id: &str,
    algorithm: Algorithm,
    mode: KeyMode,
    prepared: PreparedKey,
    legacy: bool,
) -> KeyMaterialRequest {
    KeyMaterialRequest {
        key_id: key_id.to_string(),
        algorithm,
        mode,
        public_key_ctx: prepared.public_key_ctx,
        private_key_ctx: prepared.private_key_ctx,
        provider_config_id: prepared.provider_config_id,
        legacy,
    }
}

fn required_argument<'a>(value: &'a str, name: &'static str) -> Result<&'a str, KeyManagementError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(KeyManagementError::MissingArgument(name));
    }
    Ok(value)
}

fn required_uuid(value: &str, name: &'static str) -> Result<Uuid, KeyManagementError> {
    let trimmed = required_argument(value, name)?;
    Uuid::parse_str(trimmed).map_err(|_| KeyManagementError::InvalidIdentifier {
        argument: name,
        input: value.to_string(),
    })
}

fn required_kas(kas: &str) -> Result<KasIdentifier, KeyManagementError> {
    let kas = resolve_kas(kas)?;
    if kas.is_any() {
        return Err(KeyManagementError::MissingArgument("kas"));
    }
    Ok(kas)
}

fn parse_algorithm(value: &str) -> Result<Algorithm, KeyManagementError> {
    Algorithm::parse(value).map_err(|err| match err {
        ParseError::UnknownAlgorithm(s) => KeyManagementError::UnknownAlgorithm(s),
        other => KeyManagementError::UnknownAlgorithm(other.to_string()),
    })
}

fn parse_mode(value: &str) -> Result<KeyMode, KeyManagementError> {
    KeyMode::parse(value).map_err(|err| match err {
        ParseError::InvalidMode(s) => KeyManagementError::InvalidMode(s),
        other => KeyManagementError::InvalidMode(other.to_string()),
    })
}
