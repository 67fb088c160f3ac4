use serde::{Deserialize, Serialize};

use pluginsync_core::{EditRequest, InstallerReport, OperationDetails};

/// Every host signal the relay subscribes to. An embedding registers a
/// handler for each of these names with the host's hook system.
pub const SIGNAL_NAMES: &[&str] = &[
    "plugin-activated",
    "plugin-deactivated",
    "plugin-about-to-delete",
    "plugin-deleted",
    "pre-install",
    "post-operation-complete",
    "admin-ajax-edit-request",
];

/// A host lifecycle signal with its typed payload.
///
/// This is the boundary between the host's name-based hook dispatch and
/// the relay's typed handlers: hosts that dispatch dynamically go
/// through [`HostSignal::from_named`], everything past this point is
/// statically typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "signal")]
pub enum HostSignal {
    #[serde(rename = "plugin-activated")]
    Activated {
        identifier: String,
        #[serde(default)]
        network_wide: bool,
    },
    #[serde(rename = "plugin-deactivated")]
    Deactivated {
        identifier: String,
        #[serde(default)]
        network_wide: bool,
    },
    #[serde(rename = "plugin-about-to-delete")]
    AboutToDelete { identifier: String },
    #[serde(rename = "plugin-deleted")]
    Deleted { identifier: String, success: bool },
    #[serde(rename = "pre-install")]
    PreInstall { identifier: String },
    #[serde(rename = "post-operation-complete")]
    OperationComplete {
        details: OperationDetails,
        #[serde(default)]
        report: InstallerReport,
    },
    #[serde(rename = "admin-ajax-edit-request")]
    EditRequest(EditRequest),
}

impl HostSignal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activated { .. } => "plugin-activated",
            Self::Deactivated { .. } => "plugin-deactivated",
            Self::AboutToDelete { .. } => "plugin-about-to-delete",
            Self::Deleted { .. } => "plugin-deleted",
            Self::PreInstall { .. } => "pre-install",
            Self::OperationComplete { .. } => "post-operation-complete",
            Self::EditRequest(_) => "admin-ajax-edit-request",
        }
    }

    /// Adapter for hosts that invoke handlers by string name with a JSON
    /// argument object. Unknown names and malformed payloads yield
    /// `None`; the caller drops those without dispatching.
    pub fn from_named(name: &str, payload: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(mut fields) = payload else {
            return None;
        };
        fields.insert(
            "signal".to_string(),
            serde_json::Value::String(name.to_string()),
        );
        serde_json::from_value(serde_json::Value::Object(fields)).ok()
    }
}
