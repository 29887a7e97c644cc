//! Searchable documents derived from catalog rows.

use serde_json::Value;

use crate::catalog::HackRow;

/// A JSON-encoded list field resolved to usable text.
///
/// Catalog rows carry `authors` and `tags` as JSON text: either an array
/// of `{name}` objects or an array of plain strings. Parsing happens once
/// per row at index build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedField {
    Names(Vec<String>),
    /// Unparsable text kept as-is so it still participates in matching.
    Raw(String),
    Empty,
}

impl ParsedField {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ParsedField::Empty;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return ParsedField::Empty;
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => names.push(s),
                        Value::Object(map) => {
                            if let Some(Value::String(name)) = map.get("name") {
                                names.push(name.clone());
                            }
                        }
                        _ => {}
                    }
                }
                if names.is_empty() {
                    ParsedField::Empty
                } else {
                    ParsedField::Names(names)
                }
            }
            Ok(Value::Null) => ParsedField::Empty,
            Ok(_) | Err(_) => ParsedField::Raw(raw.to_string()),
        }
    }

    /// Flatten to a single space-separated string.
    pub fn joined(&self) -> String {
        match self {
            ParsedField::Names(names) => names.join(" "),
            ParsedField::Raw(raw) => raw.clone(),
            ParsedField::Empty => String::new(),
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            ParsedField::Names(names) => names,
            _ => &[],
        }
    }
}

/// One indexed row with its derived text fields.
#[derive(Debug, Clone)]
pub struct SearchDocument {
    pub name: String,
    pub authors_text: String,
    pub tags_text: String,
    pub description: String,
    pub authors: ParsedField,
    pub tags: ParsedField,
    pub row: HackRow,
}

impl SearchDocument {
    pub fn from_row(row: HackRow) -> Self {
        let authors = ParsedField::parse(row.authors.as_deref());
        let tags = ParsedField::parse(row.tags.as_deref());
        Self {
            name: row.name.clone(),
            authors_text: authors.joined(),
            tags_text: tags.joined(),
            description: row.description.clone().unwrap_or_default(),
            authors,
            tags,
            row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_parse_object_array() {
        let field = ParsedField::parse(Some(r#"[{"name":"alice"},{"name":"bob"}]"#));
        assert_eq!(
            field,
            ParsedField::Names(vec!["alice".to_string(), "bob".to_string()])
        );
        assert_eq!(field.joined(), "alice bob");
    }

    #[test]
    fn test_parse_string_array() {
        let field = ParsedField::parse(Some(r#"["Kaizo","Troll"]"#));
        assert_eq!(field.joined(), "Kaizo Troll");
    }

    #[test]
    fn test_parse_garbage_keeps_raw_text() {
        let field = ParsedField::parse(Some("not json at all"));
        assert_eq!(field, ParsedField::Raw("not json at all".to_string()));
        assert_eq!(field.joined(), "not json at all");
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert_eq!(ParsedField::parse(None), ParsedField::Empty);
        assert_eq!(ParsedField::parse(Some("")), ParsedField::Empty);
        assert_eq!(ParsedField::parse(Some("[]")), ParsedField::Empty);
        assert_eq!(ParsedField::parse(Some("null")), ParsedField::Empty);
    }

    #[test]
    fn test_document_derives_text_fields() {
        let mut row = fixtures::hack_row(1, "Grand Poo World");
        row.authors = Some(r#"[{"name":"BarbarousKing"}]"#.to_string());
        row.tags = Some(r#"["Kaizo","Hard"]"#.to_string());
        row.description = Some("A very hard hack".to_string());

        let doc = SearchDocument::from_row(row);
        assert_eq!(doc.name, "Grand Poo World");
        assert_eq!(doc.authors_text, "BarbarousKing");
        assert_eq!(doc.tags_text, "Kaizo Hard");
        assert_eq!(doc.description, "A very hard hack");
    }
}
