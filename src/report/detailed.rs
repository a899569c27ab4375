use super::DEFAULT_TITLE;
use crate::input::render_json;
use crate::types::report::IssueReport;
use crate::types::sarif::{SarifDocument, SarifResult};
use serde_json::Value;

pub const MULTIPLE_TITLE: &str = "Multiple Issues Found";
pub const EMPTY_BODY: &str = "No specific security issues found.";
pub const NO_FIXES: &str = "No fixes provided.";

pub fn format(document: &SarifDocument) -> IssueReport {
    let mut body = String::new();
    let mut results_found = false;

    for result in document.results() {
        results_found = true;
        body.push_str(&result_block(result));
    }

    if !results_found {
        return IssueReport::new(DEFAULT_TITLE, EMPTY_BODY);
    }

    // Only the first run decides the title, even when a later run has results.
    // Kept as-is pending product-owner confirmation.
    let first_run_has_results = document
        .runs
        .first()
        .is_some_and(|run| !run.results.is_empty());
    let title = if first_run_has_results {
        MULTIPLE_TITLE
    } else {
        DEFAULT_TITLE
    };

    IssueReport::new(title, body)
}

fn result_block(result: &SarifResult) -> String {
    let locations = render_json(result.locations.as_ref().unwrap_or(&Value::Null));
    let fixes = result
        .fixes
        .as_ref()
        .map(render_json)
        .unwrap_or_else(|| NO_FIXES.to_string());

    format!(
        "### Rule ID: {}\n#### Message: {}\n```json\n\"locations\": {}\n```\n```json\n\"fixes\": {}\n```\n\n",
        result.rule_id, result.message.text, locations, fixes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> SarifDocument {
        serde_json::from_str(json).expect("document should parse")
    }

    #[test]
    fn no_results_yields_fixed_title_and_body() {
        for json in [r#"{"runs": []}"#, r#"{"runs": [{"results": []}, {}]}"#, "{}"] {
            let report = format(&document(json));
            assert_eq!(report.title, "Security Scan Results");
            assert_eq!(report.body, "No specific security issues found.");
        }
    }

    #[test]
    fn single_result_renders_exact_block() {
        let report = format(&document(
            r#"{"runs": [{"results": [
                {"ruleId": "js/sqli", "message": {"text": "SQL injection"},
                 "locations": [{"line": 4}]}
            ]}]}"#,
        ));

        assert_eq!(report.title, "Multiple Issues Found");
        assert_eq!(
            report.body,
            "### Rule ID: js/sqli\n\
             #### Message: SQL injection\n\
             ```json\n\"locations\": [\n    {\n        \"line\": 4\n    }\n]\n```\n\
             ```json\n\"fixes\": No fixes provided.\n```\n\n"
        );
    }

    #[test]
    fn absent_locations_render_as_null_and_fixes_are_pretty_printed() {
        let report = format(&document(
            r#"{"runs": [{"results": [
                {"ruleId": "r1", "message": {"text": "m"}, "fixes": [{"description": "d"}]}
            ]}]}"#,
        ));

        assert!(report.body.contains("\"locations\": null\n"));
        assert!(report
            .body
            .contains("\"fixes\": [\n    {\n        \"description\": \"d\"\n    }\n]\n"));
        assert!(!report.body.contains(NO_FIXES));
    }

    #[test]
    fn null_fixes_render_as_null_not_placeholder() {
        let report = format(&document(
            r#"{"runs":[{"results":[{"ruleId":"r","message":{"text":"m"},"fixes":null}]}]}"#,
        ));

        assert!(report.body.contains("\"fixes\": null\n"));
        assert!(!report.body.contains(NO_FIXES));
    }

    #[test]
    fn blocks_follow_document_order_across_runs() {
        let report = format(&document(
            r#"{"runs": [
                {"results": [{"ruleId": "first", "message": {"text": "one"}}]},
                {"results": [
                    {"ruleId": "second", "message": {"text": "two"}},
                    {"ruleId": "third", "message": {"text": "three"}}
                ]}
            ]}"#,
        ));

        let first = report.body.find("### Rule ID: first").expect("first block");
        let second = report.body.find("### Rule ID: second").expect("second block");
        let third = report.body.find("### Rule ID: third").expect("third block");
        assert!(first < second && second < third);
        assert_eq!(report.body.matches("### Rule ID:").count(), 3);
        assert!(report.body.contains("#### Message: two\n"));
    }

    #[test]
    fn title_only_checks_first_run_for_results() {
        let report = format(&document(
            r#"{"runs": [
                {"results": []},
                {"results": [{"ruleId": "late", "message": {"text": "found later"}}]}
            ]}"#,
        ));

        assert_eq!(report.title, "Security Scan Results");
        assert!(report.body.contains("### Rule ID: late"));
        assert_ne!(report.body, EMPTY_BODY);
    }
}
