use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operation::ErrorDetail;
use crate::record::{PluginMetadata, PluginRecord};

/// A normalized lifecycle event emitted to the downstream sync pipeline.
///
/// Each logical host operation maps to exactly one of these, no matter
/// how many raw signals contributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum RelayEvent {
    /// One install signal, however many packages it placed.
    PluginInstalled { records: Vec<PluginRecord> },
    /// Emitted once per affected plugin when a bulk update fails.
    PluginUpdateFailed {
        record: PluginRecord,
        code: String,
        message: String,
        is_autoupdate: bool,
    },
    /// The aggregated batch, emitted once per cycle by the deferred flush.
    PluginsUpdated {
        records: Vec<PluginRecord>,
        is_autoupdate: bool,
    },
    PluginEdited {
        identifier: String,
        metadata: PluginMetadata,
    },
    PluginActivated {
        identifier: String,
        network_wide: bool,
        metadata: PluginMetadata,
    },
    PluginDeactivated {
        identifier: String,
        network_wide: bool,
        metadata: PluginMetadata,
    },
    PluginDeleted {
        identifier: String,
        success: bool,
        record: PluginRecord,
    },
}

impl RelayEvent {
    /// Stable event name used by downstream consumers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PluginInstalled { .. } => "plugin-installed",
            Self::PluginUpdateFailed { .. } => "plugin-update-failed",
            Self::PluginsUpdated { .. } => "plugins-updated",
            Self::PluginEdited { .. } => "plugin-edited",
            Self::PluginActivated { .. } => "plugin-activated",
            Self::PluginDeactivated { .. } => "plugin-deactivated",
            Self::PluginDeleted { .. } => "plugin-deleted",
        }
    }

    /// Shorthand for a failed-update event built from a classified error.
    pub fn update_failed(record: PluginRecord, detail: &ErrorDetail, is_autoupdate: bool) -> Self {
        Self::PluginUpdateFailed {
            record,
            code: detail.code.clone(),
            message: detail.message.clone(),
            is_autoupdate,
        }
    }
}

impl std::fmt::Display for RelayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outbound wrapper: every emitted event carries a unique id and the
/// moment it left the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: RelayEvent,
}

impl EventEnvelope {
    pub fn new(event: RelayEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}
