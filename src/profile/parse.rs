use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::session::ProfileRecord;

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: i64,
    #[serde(default)]
    json_content: Value,
    #[serde(default)]
    created_at: Option<String>,
}

pub(super) fn parse_records(raw: &str) -> Result<Vec<ProfileRecord>> {
    let rows: Vec<RawRecord> =
        serde_json::from_str(raw).context("invalid JSON from the record store")?;

    Ok(rows
        .into_iter()
        .map(|row| ProfileRecord {
            id: row.id,
            json_content: unwrap_double_encoded(row.json_content),
            created_at: row.created_at,
        })
        .collect())
}

/// Some stored rows hold the document as a JSON string rather than inline
/// JSON; unwrap those when the string itself parses.
fn unwrap_double_encoded(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_rows_with_inline_documents() {
        let raw = r#"[
            { "id": 7, "json_content": { "Self": { "A": { "strength": 3 } } }, "created_at": "2025-11-03T09:12:00Z" },
            { "id": 6, "json_content": { "B": 1 } }
        ]"#;

        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 7);
        assert_eq!(
            records[0].created_at.as_deref(),
            Some("2025-11-03T09:12:00Z")
        );
        assert_eq!(records[1].json_content, json!({ "B": 1 }));
    }

    #[test]
    fn unwraps_double_encoded_documents() {
        let raw = r#"[ { "id": 1, "json_content": "{\"Self\":{\"A\":{\"strength\":5}}}" } ]"#;

        let records = parse_records(raw).unwrap();
        assert_eq!(
            records[0].json_content,
            json!({ "Self": { "A": { "strength": 5 } } })
        );
    }

    #[test]
    fn keeps_plain_strings_that_are_not_json() {
        let raw = r#"[ { "id": 1, "json_content": "just a note" } ]"#;

        let records = parse_records(raw).unwrap();
        assert_eq!(records[0].json_content, json!("just a note"));
    }

    #[test]
    fn missing_document_defaults_to_null() {
        let raw = r#"[ { "id": 1 } ]"#;

        let records = parse_records(raw).unwrap();
        assert!(records[0].json_content.is_null());
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(parse_records(r#"{ "error": "denied" }"#).is_err());
        assert!(parse_records("not json").is_err());
    }
}
