use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The subset of a SARIF log this tool reads. Missing collections default to
/// empty so structurally incomplete documents read as "no findings".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SarifDocument {
    #[serde(default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default)]
    pub rule_id: String,
    #[serde(default)]
    pub message: Message,
    pub level: Option<String>,
    pub locations: Option<Value>,
    /// `Some(Value::Null)` when the key is present with a null value.
    #[serde(default, deserialize_with = "present")]
    pub fixes: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: String,
}

impl SarifDocument {
    pub fn result_count(&self) -> usize {
        self.runs.iter().map(|run| run.results.len()).sum()
    }

    pub fn results(&self) -> impl Iterator<Item = &SarifResult> {
        self.runs.iter().flat_map(|run| run.results.iter())
    }
}

impl SarifResult {
    pub fn is_error(&self) -> bool {
        self.level.as_deref() == Some("error")
    }
}
