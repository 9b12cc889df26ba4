//! References to KAS registry entries and keys

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a Key Access Server
///
/// Holds at most one of the three lookup forms. `Any` is the empty
/// filter used by list operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KasIdentifier {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "kasId")]
    Id(Uuid),
    #[serde(rename = "uri")]
    Uri(String),
    #[serde(rename = "name")]
    Name(String),
}

impl KasIdentifier {
    pub fn is_any(&self) -> bool {
        matches!(self, KasIdentifier::Any)
    }

    /// The system id, when the identifier already is one
    pub fn id(&self) -> Option<Uuid> {
        match self {
            KasIdentifier::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Lookup form, for log lines and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            KasIdentifier::Any => "any",
            KasIdentifier::Id(_) => "id",
            KasIdentifier::Uri(_) => "uri",
            KasIdentifier::Name(_) => "name",
        }
    }
}

impl fmt::Display for KasIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KasIdentifier::Any => f.write_str("*"),
            KasIdentifier::Id(id) => write!(f, "{}", id),
            KasIdentifier::Uri(uri) => f.write_str(uri),
            KasIdentifier::Name(name) => f.write_str(name),
        }
    }
}

/// Reference to a single KAS key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyIdentifier {
    /// System id of the key
    #[serde(rename = "id")]
    Id(Uuid),
    /// Human-readable key id scoped to a KAS
    #[serde(rename = "key")]
    Kid { kas: KasIdentifier, kid: String },
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyIdentifier::Id(id) => write!(f, "{}", id),
            KeyIdentifier::Kid { kas, kid } => write!(f, "{}@{}", kid, kas),
        }
    }
}
