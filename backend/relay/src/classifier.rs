use pluginsync_core::{ErrorDetail, InstallerReport, ReportResult};

/// Sentinel code for a failure the host recorded no detail for.
pub const UNKNOWN_FAILURE_CODE: &str = "unknown";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown Plugin Update Failure";

/// Normalize the installer's heterogeneous failure shapes into one
/// `(code, message)` pair, or `None` when the operation succeeded.
///
/// Precedence: a structured top-level error with a non-empty code wins,
/// then an error carried inside the `result` field, then the
/// unknown-failure sentinel for a result slot that was never filled in.
/// No result slot and no error means success.
pub fn classify(report: &InstallerReport) -> Option<ErrorDetail> {
    if let Some(error) = &report.error {
        if !error.code.is_empty() {
            return Some(error.clone());
        }
    }
    match &report.result {
        Some(ReportResult::Failure(detail)) => Some(detail.clone()),
        Some(ReportResult::Empty) => Some(ErrorDetail::new(
            UNKNOWN_FAILURE_CODE,
            UNKNOWN_FAILURE_MESSAGE,
        )),
        Some(ReportResult::Ok) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_error_wins_over_result_error() {
        let report = InstallerReport {
            error: Some(ErrorDetail::new("download_failed", "Download failed.")),
            result: Some(ReportResult::Failure(ErrorDetail::new(
                "fs",
                "Could not copy file.",
            ))),
            installed: None,
        };
        let detail = classify(&report).unwrap();
        assert_eq!(detail.code, "download_failed");
    }

    #[test]
    fn test_result_error_used_when_no_top_level_error() {
        let report = InstallerReport {
            error: None,
            result: Some(ReportResult::Failure(ErrorDetail::new(
                "fs",
                "Could not copy file.",
            ))),
            installed: None,
        };
        let detail = classify(&report).unwrap();
        assert_eq!(detail.code, "fs");
    }

    #[test]
    fn test_empty_code_does_not_count_as_error() {
        let report = InstallerReport {
            error: Some(ErrorDetail::new("", "")),
            result: Some(ReportResult::Ok),
            installed: None,
        };
        assert!(classify(&report).is_none());
    }

    #[test]
    fn test_empty_result_yields_unknown_sentinel() {
        let report = InstallerReport {
            error: None,
            result: Some(ReportResult::Empty),
            installed: None,
        };
        let detail = classify(&report).unwrap();
        assert_eq!(detail.code, UNKNOWN_FAILURE_CODE);
        assert_eq!(detail.message, UNKNOWN_FAILURE_MESSAGE);
    }

    #[test]
    fn test_absent_result_means_success() {
        assert!(classify(&InstallerReport::default()).is_none());
    }

    #[test]
    fn test_ok_result_means_success() {
        let report = InstallerReport {
            error: None,
            result: Some(ReportResult::Ok),
            installed: None,
        };
        assert!(classify(&report).is_none());
    }
}
