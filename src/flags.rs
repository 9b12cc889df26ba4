//! Key material input flags
//!
//! [`KeyFlags`] is the per-operation bundle of key material arguments. It is
//! built once per call, either through the `with_*` builders or by
//! deserializing a document whose field names match the command-line flags.
//!
//! ```
//! use opentdf_keys::KeyFlags;
//!
//! let flags: KeyFlags = serde_json::from_str(
//!     r#"{"wrapping-key-id": "kek-1", "wrapping-key": "00112233"}"#,
//! ).unwrap();
//! assert_eq!(flags.wrapping_key_id(), Some("kek-1"));
//! ```

use serde::Deserialize;
use zeroize::Zeroize;

pub const FLAG_WRAPPING_KEY: &str = "wrapping-key";
pub const FLAG_WRAPPING_KEY_ID: &str = "wrapping-key-id";
pub const FLAG_PROVIDER_CONFIG_ID: &str = "provider-config-id";
pub const FLAG_PUBLIC_KEY_PEM: &str = "public-key-pem";
pub const FLAG_PRIVATE_KEY_PEM: &str = "private-key-pem";

/// Key material arguments for create, import and rotate
///
/// Empty strings are treated the same as absent values. The wrapping key
/// and private key are cleared from memory when the flags are dropped.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeyFlags {
    /// Key encryption key, hex encoded
    wrapping_key: Option<String>,
    wrapping_key_id: Option<String>,
    provider_config_id: Option<String>,
    /// Base64 of the public key PEM text
    public_key_pem: Option<String>,
    /// Base64 of the private key PEM text
    private_key_pem: Option<String>,
}

impl KeyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wrapping_key(mut self, hex_key: impl Into<String>) -> Self {
        self.wrapping_key = Some(hex_key.into());
        self
    }

    pub fn with_wrapping_key_id(mut self, id: impl Into<String>) -> Self {
        self.wrapping_key_id = Some(id.into());
        self
    }

    pub fn with_provider_config_id(mut self, id: impl Into<String>) -> Self {
        self.provider_config_id = Some(id.into());
        self
    }

    /// Set the public key from its base64-encoded PEM text
    pub fn with_public_key_pem(mut self, base64_pem: impl Into<String>) -> Self {
        self.public_key_pem = Some(base64_pem.into());
        self
    }

    /// Set the private key from its base64-encoded PEM text
    pub fn with_private_key_pem(mut self, base64_pem: impl Into<String>) -> Self {
        self.private_key_pem = Some(base64_pem.into());
        self
    }

    pub fn wrapping_key(&self) -> Option<&str> {
        present(&self.wrapping_key)
    }

    pub fn wrapping_key_id(&self) -> Option<&str> {
        present(&self.wrapping_key_id)
    }

    pub fn provider_config_id(&self) -> Option<&str> {
        present(&self.provider_config_id)
    }

    pub fn public_key_pem(&self) -> Option<&str> {
        present(&self.public_key_pem)
    }

    pub fn private_key_pem(&self) -> Option<&str> {
        present(&self.private_key_pem)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Drop for KeyFlags {
    fn drop(&mut self) {
        self.wrapping_key.zeroize();
        self.private_key_pem.zeroize();
    }
}

impl std::fmt::Debug for KeyFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: Option<&str>| v.map(|_| "<redacted>");
        f.debug_struct("KeyFlags")
            .field("wrapping_key", &redacted(self.wrapping_key()))
            .field("wrapping_key_id", &self.wrapping_key_id())
            .field("provider_config_id", &self.provider_config_id())
            .field("public_key_pem", &self.public_key_pem().map(|_| "<set>"))
            .field("private_key_pem", &redacted(self.private_key_pem()))
            .finish()
    }
}
