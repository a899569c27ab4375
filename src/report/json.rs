use crate::types::report::IssueReport;

pub fn to_json(report: &IssueReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
