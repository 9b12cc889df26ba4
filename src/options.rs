//! Per-operation options
//!
//! Each lifecycle call takes one of these by reference. Algorithm and mode
//! stay in their string form here and are parsed by the operation itself.

use crate::error::KeyManagementError;
use crate::flags::KeyFlags;
use opentdf_keys_protocol::{MetadataMutable, MetadataUpdateBehavior, PageRequest};
use std::collections::BTreeMap;

/// Options for [`KeyManager::create_key`](crate::KeyManager::create_key)
#[derive(Debug, Clone, Default)]
pub struct CreateKeyOptions {
    /// KAS that will own the key: id, URI or name
    pub kas: String,
    /// Human-readable key id, unique within the KAS
    pub key_id: String,
    pub algorithm: String,
    pub mode: String,
    pub flags: KeyFlags,
    pub legacy: bool,
    /// Metadata labels as `key=value`
    pub labels: Vec<String>,
}

/// Options for [`KeyManager::import_key`](crate::KeyManager::import_key)
///
/// `flags` must carry the wrapping key, its id, and both PEM halves.
#[derive(Debug, Clone, Default)]
pub struct ImportKeyOptions {
    pub kas: String,
    pub key_id: String,
    pub algorithm: String,
    pub flags: KeyFlags,
    pub legacy: bool,
    pub labels: Vec<String>,
}

/// Options for [`KeyManager::rotate_key`](crate::KeyManager::rotate_key)
#[derive(Debug, Clone, Default)]
pub struct RotateKeyOptions {
    /// Key being rotated out: system id, or key id together with `kas`
    pub key: String,
    pub kas: String,
    pub new_key_id: String,
    pub algorithm: String,
    pub mode: String,
    pub flags: KeyFlags,
    pub legacy: bool,
    pub labels: Vec<String>,
}

/// Options for [`KeyManager::unsafe_delete_key`](crate::KeyManager::unsafe_delete_key)
#[derive(Debug, Clone, Default)]
pub struct UnsafeDeleteOptions {
    pub id: String,
    pub kid: String,
    pub kas_uri: String,
    /// Skip the confirmation step
    pub force: bool,
}

/// Options for [`KeyManager::update_key`](crate::KeyManager::update_key)
#[derive(Debug, Clone, Default)]
pub struct UpdateKeyOptions {
    /// System id (UUID) of the key
    pub id: String,
    pub labels: Vec<String>,
    pub behavior: MetadataUpdateBehavior,
}

#[derive(Debug, Clone)]
pub struct ListKeysOptions {
    pub limit: u32,
    pub offset: u32,
    pub algorithm: Option<String>,
    /// Empty means keys of every KAS
    pub kas: String,
    pub legacy: Option<bool>,
}

impl Default for ListKeysOptions {
    fn default() -> Self {
        let page = PageRequest::default();
        Self {
            limit: page.limit,
            offset: page.offset,
            algorithm: None,
            kas: String::new(),
            legacy: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListKeyMappingsOptions {
    pub limit: u32,
    pub offset: u32,
    /// Empty lists mappings of every key
    pub key: String,
    pub kas: String,
}

impl Default for ListKeyMappingsOptions {
    fn default() -> Self {
        let page = PageRequest::default();
        Self {
            limit: page.limit,
            offset: page.offset,
            key: String::new(),
            kas: String::new(),
        }
    }
}

/// Parse `key=value` labels into request metadata
///
/// Returns `None` when there are no labels so the request omits metadata.
pub fn parse_labels(labels: &[String]) -> Result<Option<MetadataMutable>, KeyManagementError> {
    if labels.is_empty() {
        return Ok(None);
    }

    let mut parsed = BTreeMap::new();
    for label in labels {
        let (key, value) = label
            .split_once('=')
            .ok_or_else(|| KeyManagementError::InvalidLabel(label.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(KeyManagementError::InvalidLabel(label.clone()));
        }
        parsed.insert(key.to_string(), value.trim().to_string());
    }

    Ok(Some(MetadataMutable { labels: parsed }))
}
