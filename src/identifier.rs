//! Identifier classification
//!
//! Free-form identifiers given for a KAS or a key are classified as a UUID,
//! an absolute URI or a plain name, in that order of preference.

use crate::error::KeyManagementError;
use opentdf_keys_protocol::{KasIdentifier, KeyIdentifier};
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// Form of a free-form identifier string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Uuid,
    Uri,
    Name,
    /// Empty or blank input
    Unknown,
}

/// Classify an identifier string
///
/// Input is trimmed first. A URI needs a scheme followed by `//` and a
/// host, so `kas-name`, `urn:x` and `https:kas` are names while
/// `https://kas.example.com` is a URI.
pub fn classify(input: &str) -> IdentifierKind {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return IdentifierKind::Unknown;
    }

    if Uuid::parse_str(trimmed).is_ok() {
        return IdentifierKind::Uuid;
    }

    if has_authority(trimmed) {
        if let Ok(url) = Url::parse(trimmed) {
            if !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()) {
                return IdentifierKind::Uri;
            }
        }
    }

    IdentifierKind::Name
}

/// `scheme://...`; the url crate would otherwise take a host out of
/// opaque forms like `https:foo`
fn has_authority(input: &str) -> bool {
    input
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with("//"))
}

/// Resolve a KAS identifier string into a typed lookup value
///
/// An empty string means "any KAS" and resolves to [`KasIdentifier::Any`].
pub fn resolve_kas(input: &str) -> Result<KasIdentifier, KeyManagementError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(KasIdentifier::Any);
    }

    let identifier = match classify(trimmed) {
        IdentifierKind::Uuid => Uuid::parse_str(trimmed)
            .map(KasIdentifier::Id)
            .map_err(|_| invalid("kas", input))?,
        IdentifierKind::Uri => KasIdentifier::Uri(trimmed.to_string()),
        IdentifierKind::Name => KasIdentifier::Name(trimmed.to_string()),
        IdentifierKind::Unknown => return Err(invalid("kas", input)),
    };

    debug!(kind = identifier.kind(), "Classified KAS identifier");
    Ok(identifier)
}

/// Resolve a key reference
///
/// A UUID refers to the key by system id. Anything else is a key id that
/// only has meaning together with the KAS that owns it.
pub fn resolve_key(key: &str, kas: &str) -> Result<KeyIdentifier, KeyManagementError> {
    let trimmed = key.trim();
    match classify(trimmed) {
        IdentifierKind::Unknown => Err(KeyManagementError::MissingArgument("key")),
        IdentifierKind::Uuid => Uuid::parse_str(trimmed)
            .map(KeyIdentifier::Id)
            .map_err(|_| invalid("key", key)),
        IdentifierKind::Uri | IdentifierKind::Name => {
            let kas = resolve_kas(kas)?;
            if kas.is_any() {
                return Err(KeyManagementError::MissingArgument("kas"));
            }
            Ok(KeyIdentifier::Kid {
                kas,
                kid: trimmed.to_string(),
            })
        }
    }
}

fn invalid(argument: &'static str, input: &str) -> KeyManagementError {
    KeyManagementError::InvalidIdentifier {
        argument,
        input: input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_uuid() {
        assert_eq!(
            classify("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            IdentifierKind::Uuid
        );
        assert_eq!(
            classify("  3FA85F64-5717-4562-B3FC-2C963F66AFA6 "),
            IdentifierKind::Uuid
        );
        let generated = Uuid::new_v4().to_string();
        assert_eq!(classify(&generated), IdentifierKind::Uuid);
    }

    #[test]
    fn test_classify_uri() {
        assert_eq!(classify("https://kas.example.com"), IdentifierKind::Uri);
        assert_eq!(classify("http://localhost:8080/kas"), IdentifierKind::Uri);
    }

    #[test]
    fn test_classify_name() {
        assert_eq!(classify("kas-name"), IdentifierKind::Name);
        assert_eq!(classify("urn:opentdf:kas"), IdentifierKind::Name);
        assert_eq!(classify("kas.example.com"), IdentifierKind::Name);
        assert_eq!(classify("3fa85f64-5717"), IdentifierKind::Name);
    }

    #[test]
    fn test_classify_opaque_special_scheme_is_name() {
        assert_eq!(classify("https:foo"), IdentifierKind::Name);
        assert_eq!(classify("ftp:foo"), IdentifierKind::Name);
        assert_eq!(classify("https:/kas.example.com"), IdentifierKind::Name);
        assert_eq!(
            resolve_kas("https:foo").unwrap(),
            KasIdentifier::Name("https:foo".to_string())
        );
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(""), IdentifierKind::Unknown);
        assert_eq!(classify("   "), IdentifierKind::Unknown);
    }

    #[test]
    fn test_resolve_kas() {
        assert_eq!(resolve_kas("").unwrap(), KasIdentifier::Any);
        assert_eq!(
            resolve_kas("https://kas.example.com").unwrap(),
            KasIdentifier::Uri("https://kas.example.com".to_string())
        );
        assert_eq!(
            resolve_kas(" primary ").unwrap(),
            KasIdentifier::Name("primary".to_string())
        );
        let id = Uuid::new_v4();
        assert_eq!(resolve_kas(&id.to_string()).unwrap(), KasIdentifier::Id(id));
    }

    #[test]
    fn test_resolve_key() {
        let id = Uuid::new_v4();
        assert_eq!(
            resolve_key(&id.to_string(), "").unwrap(),
            KeyIdentifier::Id(id)
        );
        assert_eq!(
            resolve_key("r1", "primary").unwrap(),
            KeyIdentifier::Kid {
                kas: KasIdentifier::Name("primary".to_string()),
                kid: "r1".to_string(),
            }
        );
        assert!(matches!(
            resolve_key("r1", ""),
            Err(KeyManagementError::MissingArgument("kas"))
        ));
        assert!(matches!(
            resolve_key("", "primary"),
            Err(KeyManagementError::MissingArgument("key"))
        ));
    }
}
