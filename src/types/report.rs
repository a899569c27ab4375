use serde::{Deserialize, Serialize};

/// Which findings end up in the issue body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPolicy {
    /// Every result, with locations and fixes.
    #[default]
    IncludeAll,
    /// Only `level = "error"` results, one bullet each.
    ErrorsOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub title: String,
    pub body: String,
}

impl IssueReport {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
