//! Literal values shared by condition operands and logged user behavior.
//!
//! On the wire a literal is plain JSON: `null`, a number, a string or an
//! array. Dates travel as RFC 3339 strings and are coerced on demand, so a
//! `Literal::Date` only exists when built in-process.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely typed scalar (or list of scalars) as stored in documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Number(f64),
    String(String),
    List(Vec<Literal>),
    Date(DateTime<Utc>),
}

/// Runtime kind of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Null,
    Number,
    String,
    List,
    Date,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Null => write!(f, "null"),
            LiteralKind::Number => write!(f, "number"),
            LiteralKind::String => write!(f, "string"),
            LiteralKind::List => write!(f, "list"),
            LiteralKind::Date => write!(f, "date"),
        }
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Null => LiteralKind::Null,
            Literal::Number(_) => LiteralKind::Number,
            Literal::String(_) => LiteralKind::String,
            Literal::List(_) => LiteralKind::List,
            Literal::Date(_) => LiteralKind::Date,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion.
    ///
    /// Numbers pass through, numeric strings are parsed and dates become
    /// epoch milliseconds. Anything else (including NaN) has no numeric value.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Literal::Number(n) => *n,
            Literal::String(s) => s.trim().parse::<f64>().ok()?,
            Literal::Date(d) => d.timestamp_millis() as f64,
            Literal::Null | Literal::List(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Date coercion.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
    /// from strings, and epoch milliseconds from numbers.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Literal::Date(d) => Some(*d),
            Literal::String(s) => parse_datetime(s),
            Literal::Number(n) if n.is_finite() => {
                Utc.timestamp_millis_opt(*n as i64).single()
            }
            _ => None,
        }
    }

    /// True for dates and for strings that parse as one.
    pub fn is_date_like(&self) -> bool {
        match self {
            Literal::Date(_) => true,
            Literal::String(s) => parse_datetime(s).is_some(),
            _ => false,
        }
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Literal::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(d: DateTime<Utc>) -> Self {
        Literal::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_plain_json() {
        let values: Vec<Literal> =
            serde_json::from_str(r#"[null, 7, "hello", [1, "a"]]"#).unwrap();
        assert_eq!(values[0], Literal::Null);
        assert_eq!(values[1], Literal::Number(7.0));
        assert_eq!(values[2], Literal::String("hello".into()));
        assert_eq!(
            values[3],
            Literal::List(vec![Literal::Number(1.0), Literal::String("a".into())])
        );
    }

    #[test]
    fn date_strings_stay_strings_until_coerced() {
        let v: Literal = serde_json::from_str(r#""2025-03-01T10:00:00Z""#).unwrap();
        assert_eq!(v.kind(), LiteralKind::String);
        assert!(v.is_date_like());
        let d = v.as_datetime().unwrap();
        assert_eq!(d.to_rfc3339(), "2025-03-01T10:00:00+00:00");
    }

    #[test]
    fn bare_dates_are_midnight_utc() {
        let d = Literal::from("2025-03-01").as_datetime().unwrap();
        assert_eq!(d.timestamp(), 1_740_787_200);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Literal::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Literal::from("twelve").as_number(), None);
        assert_eq!(Literal::Null.as_number(), None);
        let d = Utc.timestamp_millis_opt(1_000).single().unwrap();
        assert_eq!(Literal::Date(d).as_number(), Some(1_000.0));
    }

    #[test]
    fn plain_strings_are_not_date_like() {
        assert!(!Literal::from("vip").is_date_like());
        assert!(!Literal::Number(3.0).is_date_like());
    }
}
