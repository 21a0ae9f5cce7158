//! Result items from the search endpoint and the rows rendered from them

use serde::Serialize;
use serde_json::Value;

use crate::error::LookupError;

/// One search hit. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ResultItem {
    pub fn new(id: Option<&str>, code: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            code: code.map(str::to_string),
            name: name.map(str::to_string),
        }
    }
}

/// Parse a search response body.
///
/// The body must be a JSON array of objects. `id`, `code` and `name` may be
/// strings or numbers; anything else counts as absent.
pub fn parse_result_items(body: &[u8]) -> Result<Vec<ResultItem>, LookupError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(LookupError::Decode(format!("expected an array, got {}", kind_of(&value))));
    };

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Value::Object(_) => Ok(ResultItem {
                id: text_field(entry, "id"),
                code: text_field(entry, "code"),
                name: text_field(entry, "name"),
            }),
            other => Err(LookupError::Decode(format!(
                "entry {} is {}, expected an object",
                idx,
                kind_of(other)
            ))),
        })
        .collect()
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A selectable row in the result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Text shown for the row: `code — name`, or just `name` without a code
    pub label: String,
    /// Row commits through the delegated mechanism's own submission path
    pub handled_by_delegate: bool,
}

impl ResultRow {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let name = name.into();
        Self {
            id: id.into(),
            label: row_label(&code, &name),
            code,
            name,
            handled_by_delegate: false,
        }
    }

    pub fn from_item(item: &ResultItem) -> Self {
        Self::new(
            item.id.clone().unwrap_or_default(),
            item.code.clone().unwrap_or_default(),
            item.name.clone().unwrap_or_default(),
        )
    }

    /// Flag the row as committed by the delegated mechanism's post-back
    pub fn handled_by_delegate(mut self) -> Self {
        self.handled_by_delegate = true;
        self
    }

    /// Value written to the hidden identifier input: id, else code, else empty
    pub fn hidden_value(&self) -> &str {
        if !self.id.is_empty() { &self.id } else { &self.code }
    }
}

pub fn row_label(code: &str, name: &str) -> String {
    if code.is_empty() {
        name.to_string()
    } else {
        format!("{} — {}", code, name)
    }
}

pub fn render_rows(items: &[ResultItem]) -> Vec<ResultRow> {
    items.iter().map(ResultRow::from_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_of_objects() {
        let body = br#"[{"id":"42","code":"AB","name":"Alpha"},{"code":"CD"},{"id":7,"name":"Seven"}]"#;
        let items = parse_result_items(body).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ResultItem::new(Some("42"), Some("AB"), Some("Alpha")));
        assert_eq!(items[1], ResultItem::new(None, Some("CD"), None));
        assert_eq!(items[2].id.as_deref(), Some("7"));
    }

    #[test]
    fn test_parse_rejects_non_lists() {
        for body in [&b"null"[..], b"{\"id\":\"1\"}", b"\"text\"", b"not json", b""] {
            assert!(
                matches!(parse_result_items(body), Err(LookupError::Decode(_))),
                "body {:?} should not parse",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_object_entries() {
        assert!(parse_result_items(br#"[{"code":"A"}, null]"#).is_err());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_result_items(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_text_fields_are_absent() {
        let items = parse_result_items(br#"[{"id":true,"code":["x"],"name":null}]"#).unwrap();
        assert_eq!(items[0], ResultItem::default());
    }

    #[test]
    fn test_row_label() {
        assert_eq!(ResultRow::new("1", "3000", "Rotterdam").label, "3000 — Rotterdam");
        assert_eq!(ResultRow::new("1", "", "Rotterdam").label, "Rotterdam");
        assert_eq!(ResultRow::from_item(&ResultItem::default()).label, "");
    }

    #[test]
    fn test_hidden_value_fallback() {
        assert_eq!(ResultRow::new("42", "AB", "Alpha").hidden_value(), "42");
        assert_eq!(ResultRow::new("", "AB", "Alpha").hidden_value(), "AB");
        assert_eq!(ResultRow::new("", "", "Alpha").hidden_value(), "");
    }
}
