//! Key material preparation
//!
//! Turns a key mode, an algorithm and a set of [`KeyFlags`] into the public
//! and private key contexts the registry expects.
//!
//! | Mode | Needs | Private key context |
//! |---|---|---|
//! | `local` | wrapping key, wrapping key id | freshly generated, wrapped |
//! | `provider` | provider config, wrapping key id, public and private PEM | passed through |
//! | `remote` | provider config, wrapping key id, public PEM | wrapping key id only |
//! | `public_key` | public PEM | none |
//!
//! All checks happen in a fixed order: mode, wrapping key id, mode-specific
//! fields, decoding, wrapping key length, algorithm, public key. Nothing in
//! this module performs I/O.

use crate::error::KeyManagementError;
use crate::flags::{
    KeyFlags, FLAG_PRIVATE_KEY_PEM, FLAG_PROVIDER_CONFIG_ID, FLAG_PUBLIC_KEY_PEM,
    FLAG_WRAPPING_KEY,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use opentdf_keys_crypto::{
    check_key_length, generate, parse_public_key_pem, validate_key_pair, validate_public_key,
    wrap_key, PublicKey,
};
use opentdf_keys_protocol::{Algorithm, KeyMode, PrivateKeyCtx, PublicKeyCtx};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Contexts ready to be placed in a registry request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedKey {
    pub public_key_ctx: PublicKeyCtx,
    pub private_key_ctx: Option<PrivateKeyCtx>,
    pub provider_config_id: Option<String>,
}

/// Public key argument, kept both as supplied and decoded
struct SuppliedPublicKey {
    encoded: String,
    pem: Vec<u8>,
}

/// The inputs of each key mode
///
/// A value can only be built with every field its mode requires, so the
/// generation and validation steps never see missing input.
enum KeyMaterialSource {
    LocalRoot {
        wrapping_key: Zeroizing<Vec<u8>>,
        wrapping_key_id: String,
    },
    ProviderRoot {
        provider_config_id: String,
        wrapping_key_id: String,
        public_key: SuppliedPublicKey,
        private_key: String,
    },
    Remote {
        provider_config_id: String,
        wrapping_key_id: String,
        public_key: SuppliedPublicKey,
    },
    PublicKeyOnly {
        public_key: SuppliedPublicKey,
    },
}

impl KeyMaterialSource {
    fn from_flags(mode: KeyMode, flags: &KeyFlags) -> Result<Self, KeyManagementError> {
        if mode == KeyMode::Unspecified {
            return Err(KeyManagementError::InvalidMode(mode.to_string()));
        }

        let wrapping_key_id = match flags.wrapping_key_id() {
            Some(id) => Some(id.to_string()),
            None if mode.requires_wrapping_key_id() => {
                return Err(KeyManagementError::MissingWrappingKeyId { mode })
            }
            None => None,
        };
        let wrapping_key_id = wrapping_key_id.unwrap_or_default();

        match mode {
            KeyMode::LocalRoot => {
                let hex_key = required(flags.wrapping_key(), FLAG_WRAPPING_KEY, mode)?;
                let wrapping_key = decode_hex(hex_key, FLAG_WRAPPING_KEY)?;
                check_key_length(&wrapping_key)?;
                Ok(KeyMaterialSource::LocalRoot {
                    wrapping_key,
                    wrapping_key_id,
                })
            }
            KeyMode::ProviderRoot => {
                let provider_config_id =
                    required(flags.provider_config_id(), FLAG_PROVIDER_CONFIG_ID, mode)?;
                let public_pem = required(flags.public_key_pem(), FLAG_PUBLIC_KEY_PEM, mode)?;
                let private_pem = required(flags.private_key_pem(), FLAG_PRIVATE_KEY_PEM, mode)?;
                let public_key = SuppliedPublicKey::decode(public_pem)?;
                decode_base64(private_pem, FLAG_PRIVATE_KEY_PEM)?;
                Ok(KeyMaterialSource::ProviderRoot {
                    provider_config_id: provider_config_id.to_string(),
                    wrapping_key_id,
                    public_key,
                    private_key: private_pem.to_string(),
                })
            }
            KeyMode::Remote => {
                let provider_config_id =
                    required(flags.provider_config_id(), FLAG_PROVIDER_CONFIG_ID, mode)?;
                let public_pem = required(flags.public_key_pem(), FLAG_PUBLIC_KEY_PEM, mode)?;
                Ok(KeyMaterialSource::Remote {
                    provider_config_id: provider_config_id.to_string(),
                    wrapping_key_id,
                    public_key: SuppliedPublicKey::decode(public_pem)?,
                })
            }
            KeyMode::PublicKeyOnly => {
                let public_pem = required(flags.public_key_pem(), FLAG_PUBLIC_KEY_PEM, mode)?;
                Ok(KeyMaterialSource::PublicKeyOnly {
                    public_key: SuppliedPublicKey::decode(public_pem)?,
                })
            }
            KeyMode::Unspecified => Err(KeyManagementError::InvalidMode(mode.to_string())),
        }
    }

    fn into_prepared(self, algorithm: Algorithm) -> Result<PreparedKey, KeyManagementError> {
        match self {
            KeyMaterialSource::LocalRoot {
                wrapping_key,
                wrapping_key_id,
            } => {
                let pair = generate(algorithm)?;
                let public_key = parse_public_key_pem(pair.public_key_pem().as_bytes())?;
                log_public_key("Generated key pair", &public_key);

                let wrapped = wrap_key(pair.private_key_pem().as_bytes(), &wrapping_key)?;
                Ok(PreparedKey {
                    public_key_ctx: PublicKeyCtx {
                        pem: BASE64.encode(pair.public_key_pem()),
                    },
                    private_key_ctx: Some(PrivateKeyCtx {
                        wrapping_key_id,
                        wrapped_key: Some(BASE64.encode(wrapped)),
                    }),
                    provider_config_id: None,
                })
            }
            KeyMaterialSource::ProviderRoot {
                provider_config_id,
                wrapping_key_id,
                public_key,
                private_key,
            } => {
                let public_key_ctx = public_key.validate(algorithm)?;
                Ok(PreparedKey {
                    public_key_ctx,
                    private_key_ctx: Some(PrivateKeyCtx {
                        wrapping_key_id,
                        wrapped_key: Some(private_key),
                    }),
                    provider_config_id: Some(provider_config_id),
                })
            }
            KeyMaterialSource::Remote {
                provider_config_id,
                wrapping_key_id,
                public_key,
            } => {
                let public_key_ctx = public_key.validate(algorithm)?;
                Ok(PreparedKey {
                    public_key_ctx,
                    private_key_ctx: Some(PrivateKeyCtx {
                        wrapping_key_id,
                        wrapped_key: None,
                    }),
                    provider_config_id: Some(provider_config_id),
                })
            }
            KeyMaterialSource::PublicKeyOnly { public_key } => Ok(PreparedKey {
                public_key_ctx: public_key.validate(algorithm)?,
                private_key_ctx: None,
                provider_config_id: None,
            }),
        }
    }
}

impl SuppliedPublicKey {
    fn decode(encoded: &str) -> Result<Self, KeyManagementError> {
        let pem = decode_base64(encoded, FLAG_PUBLIC_KEY_PEM)?;
        Ok(Self {
            encoded: encoded.to_string(),
            pem: pem.to_vec(),
        })
    }

    fn validate(self, algorithm: Algorithm) -> Result<PublicKeyCtx, KeyManagementError> {
        let public_key = validate_public_key(&self.pem, algorithm)?;
        log_public_key("Validated supplied public key", &public_key);
        Ok(PublicKeyCtx { pem: self.encoded })
    }
}

/// Build the key contexts for `mode`
///
/// Fails without generating anything when a required field is missing or
/// cannot be decoded.
pub fn prepare(
    mode: KeyMode,
    algorithm: Algorithm,
    flags: &KeyFlags,
) -> Result<PreparedKey, KeyManagementError> {
    debug!(%mode, %algorithm, "Preparing key material");
    let source = KeyMaterialSource::from_flags(mode, flags)?;
    ensure_algorithm(algorithm)?;
    source.into_prepared(algorithm)
}

/// Build the key contexts for an imported key pair
///
/// The caller's private key is checked against the public key and then
/// wrapped under the supplied wrapping key, so the submitted key is always
/// a `local` key whose wrapping key id matches its ciphertext.
pub fn prepare_import(
    algorithm: Algorithm,
    flags: &KeyFlags,
) -> Result<PreparedKey, KeyManagementError> {
    let mode = KeyMode::LocalRoot;
    debug!(%algorithm, "Preparing imported key material");

    let wrapping_key_id = flags
        .wrapping_key_id()
        .ok_or(KeyManagementError::MissingWrappingKeyId { mode })?
        .to_string();
    let hex_key = required(flags.wrapping_key(), FLAG_WRAPPING_KEY, mode)?;
    let public_pem = required(flags.public_key_pem(), FLAG_PUBLIC_KEY_PEM, mode)?;
    let private_pem = required(flags.private_key_pem(), FLAG_PRIVATE_KEY_PEM, mode)?;

    let wrapping_key = decode_hex(hex_key, FLAG_WRAPPING_KEY)?;
    let public_key = SuppliedPublicKey::decode(public_pem)?;
    let private_key = decode_base64(private_pem, FLAG_PRIVATE_KEY_PEM)?;
    check_key_length(&wrapping_key)?;
    ensure_algorithm(algorithm)?;

    let parsed = validate_public_key(&public_key.pem, algorithm)?;
    validate_key_pair(&private_key, &parsed)?;
    log_public_key("Validated imported key pair", &parsed);

    let wrapped = wrap_key(&private_key, &wrapping_key)?;
    Ok(PreparedKey {
        public_key_ctx: PublicKeyCtx {
            pem: public_key.encoded,
        },
        private_key_ctx: Some(PrivateKeyCtx {
            wrapping_key_id,
            wrapped_key: Some(BASE64.encode(wrapped)),
        }),
        provider_config_id: None,
    })
}

fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    mode: KeyMode,
) -> Result<&'a str, KeyManagementError> {
    value.ok_or(KeyManagementError::MissingField { field, mode })
}

fn ensure_algorithm(algorithm: Algorithm) -> Result<(), KeyManagementError> {
    if algorithm.key_size().is_none() {
        return Err(KeyManagementError::UnknownAlgorithm(algorithm.to_string()));
    }
    Ok(())
}

fn decode_hex(value: &str, field: &'static str) -> Result<Zeroizing<Vec<u8>>, KeyManagementError> {
    hex::decode(value)
        .map(Zeroizing::new)
        .map_err(|e| KeyManagementError::DecodeError {
            field,
            reason: e.to_string(),
        })
}

fn decode_base64(
    value: &str,
    field: &'static str,
) -> Result<Zeroizing<Vec<u8>>, KeyManagementError> {
    BASE64
        .decode(value)
        .map(Zeroizing::new)
        .map_err(|e| KeyManagementError::DecodeError {
            field,
            reason: e.to_string(),
        })
}

fn log_public_key(message: &str, key: &PublicKey) {
    match key.fingerprint() {
        Ok(fingerprint) => info!(key_size = %key.key_size(), %fingerprint, "{}", message),
        Err(_) => info!(key_size = %key.key_size(), "{}", message),
    }
}
