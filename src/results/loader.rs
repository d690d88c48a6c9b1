use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::results::result_model::TestResultRecord;

/// Suffix every Allure result file carries.
pub const RESULT_FILE_SUFFIX: &str = "-result.json";

/// Top-level shape of a result file. Only the fields we read are declared.
#[derive(Debug, Deserialize)]
struct RawResult {
    name: Option<Value>,
    status: Option<Value>,
    start: Option<Value>,
    stop: Option<Value>,
    labels: Option<Value>,
}

/// Load every `*-result.json` file in `dir`, in file-name order.
///
/// Files that cannot be read or parsed are skipped without error. A missing
/// directory yields no records.
pub fn load_results(dir: &Path) -> Result<Vec<TestResultRecord>> {
    let files = match list_result_files(dir) {
        Ok(files) => files,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "results directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        match read_result_file(path) {
            Some(record) => records.push(record),
            None => debug!(path = %path.display(), "skipping unreadable result file"),
        }
    }

    info!(
        dir = %dir.display(),
        files = files.len(),
        records = records.len(),
        "loaded result records"
    );
    Ok(records)
}

/// Result files in `dir`, sorted by file name.
fn list_result_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_result = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.ends_with(RESULT_FILE_SUFFIX));
        if is_result && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_result_file(path: &Path) -> Option<TestResultRecord> {
    let content = std::fs::read_to_string(path).ok()?;
    let raw = parse_result(&content)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Some(build_record(raw, stem))
}

fn parse_result(content: &str) -> Option<RawResult> {
    let value: Value = serde_json::from_str(content).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn build_record(raw: RawResult, stem: String) -> TestResultRecord {
    let name = raw.name.as_ref().and_then(text_value).unwrap_or(stem);
    let status = raw
        .status
        .as_ref()
        .and_then(text_value)
        .unwrap_or_else(|| "unknown".to_string());

    let duration_ms = match (
        raw.start.as_ref().and_then(Value::as_i64),
        raw.stop.as_ref().and_then(Value::as_i64),
    ) {
        (Some(start), Some(stop)) => stop.checked_sub(start),
        _ => None,
    };

    let mut labels = flatten_labels(raw.labels.as_ref());
    let suite = labels
        .remove("suite")
        .or_else(|| labels.remove("parentSuite"))
        .unwrap_or_else(|| "-".to_string());
    let package = labels.remove("package").unwrap_or_else(|| "-".to_string());

    TestResultRecord {
        name,
        status,
        suite,
        package,
        duration_ms,
    }
}

/// Turn the `labels` array into a name -> value map. Later duplicates win.
pub fn flatten_labels(labels: Option<&Value>) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Some(items) = labels.and_then(Value::as_array) else {
        return map;
    };

    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let Some(name) = obj.get("name").and_then(Value::as_str) else {
            continue;
        };
        if let Some(value) = obj.get("value").and_then(text_value) {
            map.insert(name.to_string(), value);
        }
    }
    map
}

/// Render a JSON scalar as display text. Null counts as absent.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn name_falls_back_to_stem() {
        let record = build_record(raw(json!({ "status": "passed" })), "abc-result".into());
        assert_eq!(record.name, "abc-result");
    }

    #[test]
    fn float_timestamps_give_no_duration() {
        let record = build_record(
            raw(json!({ "name": "t", "start": 1000.5, "stop": 2000 })),
            "x".into(),
        );
        assert_eq!(record.duration_ms, None);
    }

    #[test]
    fn duplicate_labels_last_wins() {
        let labels = json!([
            { "name": "suite", "value": "First" },
            "not-an-object",
            { "value": "nameless" },
            { "name": "suite", "value": "Second" },
        ]);
        let map = flatten_labels(Some(&labels));
        assert_eq!(map.get("suite").map(String::as_str), Some("Second"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn parent_suite_used_when_suite_missing() {
        let record = build_record(
            raw(json!({
                "name": "t",
                "labels": [{ "name": "parentSuite", "value": "Parent" }]
            })),
            "x".into(),
        );
        assert_eq!(record.suite, "Parent");
        assert_eq!(record.package, "-");
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(parse_result("[1, 2, 3, 4, 5]").is_none());
        assert!(parse_result("\"text\"").is_none());
        assert!(parse_result("{ not json").is_none());
        assert!(parse_result("{}").is_some());
    }
}
