use super::DEFAULT_TITLE;
use crate::types::report::IssueReport;
use crate::types::sarif::SarifDocument;

pub const HEADER: &str = "### Critical Security Issues Found\n\n";
pub const EMPTY_BODY: &str = "No Critical Security Issues Found";

/// One bullet per `error`-level result; everything else is dropped.
pub fn format(document: &SarifDocument) -> IssueReport {
    let bullets: Vec<String> = document
        .results()
        .filter(|result| result.is_error())
        .map(|result| format!("- **{}**: {}\n", result.rule_id, result.message.text))
        .collect();

    if bullets.is_empty() {
        return IssueReport::new(DEFAULT_TITLE, EMPTY_BODY);
    }

    let mut body = String::from(HEADER);
    for bullet in &bullets {
        body.push_str(bullet);
    }
    IssueReport::new(DEFAULT_TITLE, body)
}
