use serde::{Deserialize, Serialize};

/// An immutable point-in-time snapshot of a plugin's identity.
///
/// Built by resolving an identifier against the live registry, falling
/// back to a request-scoped cached snapshot when the registry entry is
/// already gone, and finally to a bare identifier-only record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl PluginRecord {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Snapshot with no metadata available anywhere.
    pub fn bare(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: String::new(),
            version: String::new(),
        }
    }

    /// Placeholder used when the plugin's files are already gone.
    pub fn placeholder(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: identifier.to_string(),
            version: "unknown".to_string(),
        }
    }

    pub fn from_metadata(identifier: &str, metadata: &PluginMetadata) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: metadata.name.clone(),
            version: metadata.version.clone(),
        }
    }
}

/// Name/version pair as the host registry reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl PluginMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.version.is_empty()
    }
}
