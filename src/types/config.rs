use crate::error::ToolError;
use crate::types::report::ReportPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_SARIF_PATH: &str = "snyk_output.sarif";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolConfig {
    pub target: Option<TargetConfig>,
    pub report: Option<ReportConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    pub api_url: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    pub sarif_path: Option<PathBuf>,
    pub policy: Option<ReportPolicy>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub fail_on_reject: bool,
}

/// Destination repository for the created issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTarget {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
}

impl IssueTarget {
    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

impl ToolConfig {
    pub fn sarif_path(&self) -> PathBuf {
        self.report
            .as_ref()
            .and_then(|report| report.sarif_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SARIF_PATH))
    }

    pub fn policy(&self) -> ReportPolicy {
        self.report
            .as_ref()
            .and_then(|report| report.policy)
            .unwrap_or_default()
    }

    pub fn strict(&self) -> bool {
        self.report.as_ref().is_some_and(|report| report.strict)
    }

    pub fn token_env(&self) -> &str {
        self.target
            .as_ref()
            .and_then(|target| target.token_env.as_deref())
            .unwrap_or(DEFAULT_TOKEN_ENV)
    }

    pub fn timeout(&self) -> Duration {
        let secs = self
            .http
            .as_ref()
            .and_then(|http| http.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn fail_on_reject(&self) -> bool {
        self.http.as_ref().is_some_and(|http| http.fail_on_reject)
    }

    /// Resolves the issue destination; owner and repo have no defaults.
    pub fn issue_target(&self) -> Result<IssueTarget, ToolError> {
        let target = self.target.clone().unwrap_or_default();
        let owner = target
            .owner
            .filter(|owner| !owner.trim().is_empty())
            .ok_or_else(|| ToolError::ConfigMissing("target.owner".to_string()))?;
        let repo = target
            .repo
            .filter(|repo| !repo.trim().is_empty())
            .ok_or_else(|| ToolError::ConfigMissing("target.repo".to_string()))?;
        Ok(IssueTarget {
            api_url: target
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            owner,
            repo,
        })
    }
}
