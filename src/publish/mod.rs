pub mod transport;

use crate::error::Result;
use crate::types::config::IssueTarget;
use crate::types::report::IssueReport;
use serde_json::{json, Value};
use tracing::{info, warn};
use transport::{HttpRequest, Transport};

pub const ACCEPT: &str = "application/vnd.github.v3+json";
pub const CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created { html_url: Option<String> },
    Rejected { status: u16, body: String },
}

impl PublishOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, PublishOutcome::Created { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            PublishOutcome::Created { html_url: Some(url) } => {
                format!("Issue created successfully: {url}")
            }
            PublishOutcome::Created { html_url: None } => "Issue created successfully".to_string(),
            PublishOutcome::Rejected { status, body } => {
                format!("Failed to create issue. Status: {status} Response: {body}")
            }
        }
    }
}

/// Files exactly one issue per call; no retries.
pub struct IssuePublisher<T: Transport> {
    target: IssueTarget,
    transport: T,
}

impl<T: Transport> IssuePublisher<T> {
    pub fn new(target: IssueTarget, transport: T) -> Self {
        Self { target, transport }
    }

    pub fn publish(&self, report: &IssueReport, token: &str) -> Result<PublishOutcome> {
        let request = self.issue_request(report, token);
        let response = self.transport.post_json(&request)?;

        if response.status != CREATED {
            warn!(status = response.status, "issue creation rejected");
            return Ok(PublishOutcome::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        let html_url = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| body.get("html_url")?.as_str().map(str::to_string));
        info!(url = ?html_url, "issue created");
        Ok(PublishOutcome::Created { html_url })
    }

    fn issue_request(&self, report: &IssueReport, token: &str) -> HttpRequest {
        HttpRequest {
            url: self.target.issues_url(),
            headers: vec![
                ("Authorization".to_string(), format!("token {token}")),
                ("Accept".to_string(), ACCEPT.to_string()),
                (
                    "User-Agent".to_string(),
                    format!("sarif-issue/{}", env!("CARGO_PKG_VERSION")),
                ),
            ],
            body: json!({ "title": report.title, "body": report.body }),
        }
    }
}
