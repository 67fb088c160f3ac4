use serde::{Deserialize, Serialize};

/// What kind of resource a completed installer operation touched.
/// The relay only reacts to plugin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationTarget {
    Plugin,
    Theme,
    Core,
    Translation,
}

/// The action the installer performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationAction {
    Install,
    Update,
}

/// Contextual details carried by the host's "operation complete" signal.
///
/// A bulk action fills `plugins`; a single-item action fills `plugin`.
/// Signals with no action tag are ignored by the relay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationDetails {
    pub target: Option<OperationTarget>,
    #[serde(default)]
    pub action: Option<OperationAction>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub plugin: Option<String>,
}

/// A structured failure as reported by the host installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Terminal state of the installer report's `result` field.
///
/// `Empty` means the host recorded a result slot but never filled it in,
/// which the classifier treats as an unexplained failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportResult {
    Ok,
    Failure(ErrorDetail),
    Empty,
}

/// The installer's completion report ("skin"), reduced to the closed set
/// of error shapes the relay accepts: a structured top-level error, an
/// error carried inside the `result` field, or nothing at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallerReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReportResult>,
    /// Identifier reported by install-style skins for the package they placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<String>,
}

/// An admin-ajax request to edit a plugin file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub identifier: String,
    /// Target file, relative to the plugin's own directory.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_result_failure_roundtrip() {
        let result = ReportResult::Failure(ErrorDetail::new("fs", "could not copy file"));
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ReportResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_operation_details_defaults() {
        let details: OperationDetails = serde_json::from_str(r#"{"target": "plugin"}"#).unwrap();
        assert_eq!(details.target, Some(OperationTarget::Plugin));
        assert!(details.action.is_none());
        assert!(details.plugins.is_empty());
        assert!(details.plugin.is_none());
    }

    #[test]
    fn test_installer_report_default_is_success_shape() {
        let report = InstallerReport::default();
        assert!(report.error.is_none());
        assert!(report.result.is_none());
        assert!(report.installed.is_none());
    }
}
