use crate::error::{Result, ToolError};
use crate::types::sarif::SarifDocument;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;
use std::io;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Missing `runs`/`results` read as empty.
    #[default]
    Lenient,
    /// Every run needs `results`, every result needs `ruleId` and `message.text`.
    Strict,
}

/// Reads and parses the file as JSON only; typed validation is a separate step
/// so the raw document can be dumped first.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| malformed(path, e.to_string()))
}

pub fn validate(path: &Path, raw: &Value, strictness: Strictness) -> Result<SarifDocument> {
    if !raw.is_object() {
        return Err(malformed(path, "/: expected an object".to_string()));
    }
    if strictness == Strictness::Strict {
        check_required_fields(raw).map_err(|reason| malformed(path, reason))?;
    }
    let document = SarifDocument::deserialize(raw).map_err(|e| malformed(path, e.to_string()))?;
    debug!(
        runs = document.runs.len(),
        results = document.result_count(),
        "sarif document loaded"
    );
    Ok(document)
}

/// Four-space indented JSON, keys in document order, non-ASCII escaped as `\uXXXX`.
pub fn render_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(
        &mut out,
        AsciiPretty(PrettyFormatter::with_indent(b"    ")),
    );
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Pretty printer that writes every character outside printable ASCII as a
/// lowercase `\uXXXX` escape, using surrogate pairs above the BMP.
struct AsciiPretty<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiPretty<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\x7f' {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn check_required_fields(raw: &Value) -> std::result::Result<(), String> {
    let runs = raw
        .get("runs")
        .and_then(Value::as_array)
        .ok_or_else(|| "/runs: expected an array".to_string())?;
    for (run_idx, run) in runs.iter().enumerate() {
        let results = run
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| format!("/runs/{run_idx}/results: expected an array"))?;
        for (result_idx, result) in results.iter().enumerate() {
            let pointer = format!("/runs/{run_idx}/results/{result_idx}");
            if result.get("ruleId").and_then(Value::as_str).is_none() {
                return Err(format!("{pointer}/ruleId: expected a string"));
            }
            if result.pointer("/message/text").and_then(Value::as_str).is_none() {
                return Err(format!("{pointer}/message/text: expected a string"));
            }
        }
    }
    Ok(())
}

fn malformed(path: &Path, reason: String) -> ToolError {
    ToolError::MalformedInput {
        path: path.display().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_sarif(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("scan.sarif");
        fs::write(&path, content).expect("sarif should write");
        path
    }

    fn load_document(path: &Path, strictness: Strictness) -> Result<(Value, SarifDocument)> {
        let raw = read_json(path)?;
        let document = validate(path, &raw, strictness)?;
        Ok((raw, document))
    }

    #[test]
    fn load_document_rejects_invalid_json() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_sarif(&dir, "{not json");
        let result = load_document(&path, Strictness::Lenient);
        assert!(matches!(result, Err(ToolError::MalformedInput { .. })));
    }

    #[test]
    fn load_document_missing_file_is_io_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let result = load_document(&dir.path().join("absent.sarif"), Strictness::Lenient);
        assert!(matches!(result, Err(ToolError::Io(_))));
    }

    #[test]
    fn lenient_mode_treats_missing_runs_as_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_sarif(&dir, r#"{"version": "2.1.0"}"#);
        let (raw, document) =
            load_document(&path, Strictness::Lenient).expect("lenient load should succeed");
        assert!(document.runs.is_empty());
        assert_eq!(raw["version"], "2.1.0");
    }

    #[test]
    fn strict_mode_rejects_missing_runs() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_sarif(&dir, r#"{"version": "2.1.0"}"#);
        let err = load_document(&path, Strictness::Strict).expect_err("strict load should fail");
        assert!(err.to_string().contains("/runs"));
    }

    #[test]
    fn strict_mode_names_the_offending_result() {
        let raw = json!({"runs": [{"results": [
            {"ruleId": "a", "message": {"text": "ok"}},
            {"ruleId": "b", "message": {}}
        ]}]});
        let err = validate(Path::new("scan.sarif"), &raw, Strictness::Strict)
            .expect_err("missing message text should fail");
        assert!(err
            .to_string()
            .contains("/runs/0/results/1/message/text"));
    }

    #[test]
    fn wrongly_typed_runs_fail_in_both_modes() {
        let raw = json!({"runs": "nope"});
        for strictness in [Strictness::Lenient, Strictness::Strict] {
            let result = validate(Path::new("scan.sarif"), &raw, strictness);
            assert!(matches!(result, Err(ToolError::MalformedInput { .. })));
        }
    }

    #[test]
    fn non_object_roots_fail_in_both_modes() {
        for raw in [json!([]), json!("runs"), json!(null)] {
            for strictness in [Strictness::Lenient, Strictness::Strict] {
                let err = validate(Path::new("scan.sarif"), &raw, strictness)
                    .expect_err("non-object root should fail");
                assert!(matches!(err, ToolError::MalformedInput { .. }));
                assert!(err.to_string().contains("/: expected an object"));
            }
        }
    }

    #[test]
    fn render_json_escapes_non_ascii_like_json_dumps() {
        let raw = json!({"uri": "café/😀.js", "ключ": 1});
        let rendered = render_json(&raw);
        assert_eq!(
            rendered,
            "{\n    \"uri\": \"caf\\u00e9/\\ud83d\\ude00.js\",\n    \"\\u043a\\u043b\\u044e\\u0447\": 1\n}"
        );
    }

    #[test]
    fn render_json_uses_four_space_indent_and_keeps_key_order() {
        let raw: Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": [true]}"#).expect("json should parse");
        let rendered = render_json(&raw);
        assert_eq!(rendered, "{\n    \"zeta\": 1,\n    \"alpha\": [\n        true\n    ]\n}");
    }
}
