pub mod critical;
pub mod detailed;
pub mod json;

use crate::types::report::{IssueReport, ReportPolicy};
use crate::types::sarif::SarifDocument;

pub const DEFAULT_TITLE: &str = "Security Scan Results";

/// Builds the issue title and body. Pure: same input, same bytes out.
pub fn format_report(document: &SarifDocument, policy: ReportPolicy) -> IssueReport {
    match policy {
        ReportPolicy::IncludeAll => detailed::format(document),
        ReportPolicy::ErrorsOnly => critical::format(document),
    }
}
