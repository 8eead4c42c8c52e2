//! Lenient wire records.
//!
//! Spreadsheet-backed APIs are loose about types: a row number may come back
//! as `3` or `"3"`, an identifier as a number, a timestamp as a string. The
//! wire shape accepts all of these and [`RawLinkRecord::into_record`] turns it
//! into a normalized [`LinkRecord`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{LinkId, LinkRecord};

/// A JSON scalar that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Render as text, printing integral floats without a fraction.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{}", *v as i64),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Integer value, parsing text the way `parseInt` does: optional
    /// whitespace and sign followed by leading digits.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Scalar::Float(_) => None,
            Scalar::Text(s) => parse_leading_integer(s),
        }
    }
}

/// Tags as sent by the API (comma-joined) or by a backup (array).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    List(Vec<String>),
    Joined(String),
    #[default]
    Missing,
}

impl RawTags {
    /// Normalized tag list.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            RawTags::List(tags) => linkshelf_tags::normalize_tags(tags),
            RawTags::Joined(joined) => linkshelf_tags::parse_tag_list(joined),
            RawTags::Missing => Vec::new(),
        }
    }
}

/// A record as returned by `GET ?action=get` or found in a backup file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLinkRecord {
    #[serde(default)]
    pub row: Option<Scalar>,
    #[serde(default)]
    pub id: Option<Scalar>,
    #[serde(default)]
    pub url: Option<Scalar>,
    #[serde(default)]
    pub description: Option<Scalar>,
    #[serde(default)]
    pub tags: RawTags,
    #[serde(default)]
    pub timestamp: Option<Scalar>,
}

impl RawLinkRecord {
    /// Normalize into a [`LinkRecord`].
    ///
    /// `position` is the record's index in its snapshot and is only used to
    /// name records that arrived without an identifier.
    pub fn into_record(self, position: usize) -> LinkRecord {
        let row = self.row.as_ref().and_then(Scalar::to_integer).and_then(|r| u64::try_from(r).ok());

        let identifier = match self.id.as_ref().map(Scalar::to_text) {
            Some(id) if !id.trim().is_empty() => LinkId::new(id.trim()),
            _ => {
                let fallback = match row {
                    Some(row) => format!("row-{}", row),
                    None => format!("unassigned-{}", position + 1),
                };
                warn!(position, %fallback, "link record without identifier");
                LinkId::new(fallback)
            }
        };

        let created_at = match self.timestamp.as_ref().and_then(Scalar::to_integer) {
            Some(ts) => ts,
            None => {
                warn!(%identifier, raw = ?self.timestamp, "unparseable link timestamp, using 0");
                0
            }
        };

        LinkRecord {
            row,
            identifier,
            url: self.url.as_ref().map(Scalar::to_text).unwrap_or_default(),
            description: self
                .description
                .as_ref()
                .map(Scalar::to_text)
                .unwrap_or_default(),
            tags: self.tags.normalize(),
            created_at,
        }
    }
}

impl From<&LinkRecord> for RawLinkRecord {
    fn from(record: &LinkRecord) -> Self {
        Self {
            row: record.row.map(|r| Scalar::Int(r as i64)),
            id: Some(Scalar::Text(record.identifier.to_string())),
            url: Some(Scalar::Text(record.url.clone())),
            description: Some(Scalar::Text(record.description.clone())),
            tags: RawTags::Joined(record.tags_joined()),
            timestamp: Some(Scalar::Int(record.created_at)),
        }
    }
}

fn parse_leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Digit runs too long for i64 clamp to the nearest bound.
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        }
    });
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_follows_parse_int() {
        assert_eq!(parse_leading_integer(" 1700000000000ms"), Some(1_700_000_000_000));
        assert_eq!(parse_leading_integer("-42"), Some(-42));
        assert_eq!(parse_leading_integer("+7x"), Some(7));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer("-"), None);
    }

    #[test]
    fn oversized_timestamp_saturates() {
        assert_eq!(
            parse_leading_integer("99999999999999999999999"),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_leading_integer("-99999999999999999999999"),
            Some(i64::MIN)
        );
        assert_eq!(
            parse_leading_integer("9223372036854775807"),
            Some(i64::MAX)
        );
    }

    #[test]
    fn decodes_api_shape() {
        let json = r#"{"row": 2, "id": "1700000000000", "url": "https://example.com",
            "description": "Example", "tags": "Rust, blog", "timestamp": "1700000000000"}"#;
        let raw: RawLinkRecord = serde_json::from_str(json).unwrap();
        let record = raw.into_record(0);

        assert_eq!(record.row, Some(2));
        assert_eq!(record.identifier, LinkId::new("1700000000000"));
        assert_eq!(record.tags, vec!["rust", "blog"]);
        assert_eq!(record.created_at, 1_700_000_000_000);
    }

    #[test]
    fn accepts_numeric_identifier_and_string_row() {
        let json = r#"{"row": "7", "id": 1700000000001, "url": "https://a.io",
            "description": "A", "tags": "", "timestamp": 1700000000001}"#;
        let record = serde_json::from_str::<RawLinkRecord>(json)
            .unwrap()
            .into_record(0);

        assert_eq!(record.row, Some(7));
        assert_eq!(record.identifier.as_str(), "1700000000001");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn accepts_tag_array() {
        let json = r#"{"id": "1", "url": "https://a.io", "description": "A",
            "tags": [" News ", "tech"], "timestamp": 1}"#;
        let record = serde_json::from_str::<RawLinkRecord>(json)
            .unwrap()
            .into_record(0);
        assert_eq!(record.tags, vec!["news", "tech"]);
        assert_eq!(record.row, None);
    }

    #[test]
    fn null_and_missing_fields() {
        let json = r#"{"url": "https://a.io", "tags": null, "timestamp": "soon"}"#;
        let record = serde_json::from_str::<RawLinkRecord>(json)
            .unwrap()
            .into_record(4);
        assert_eq!(record.identifier.as_str(), "unassigned-5");
        assert_eq!(record.created_at, 0);
        assert_eq!(record.description, "");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn parse_int_semantics() {
        assert_eq!(parse_leading_integer("123abc"), Some(123));
        assert_eq!(parse_leading_integer("  -42"), Some(-42));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer(""), None);
        assert_eq!(Scalar::Float(1.7e12).to_integer(), Some(1_700_000_000_000));
        assert_eq!(Scalar::Float(3.0).to_text(), "3");
    }

    #[test]
    fn raw_from_record_round_trips() {
        let record = LinkRecord::new(
            LinkId::new("9"),
            "https://a.io",
            "A",
            vec!["x".to_string(), "y".to_string()],
            9,
        )
        .with_row(3);
        let back = RawLinkRecord::from(&record).into_record(0);
        assert_eq!(back, record);
    }
}
