use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("malformed SARIF input {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
