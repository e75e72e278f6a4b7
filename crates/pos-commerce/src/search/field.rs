//! Field access for filterable records.

use crate::money::Money;
use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use std::fmt;

/// A single field value read off a record.
///
/// Every variant has one canonical string rendering, used both for
/// free-text search and for equality filters.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Decimal(f64),
    Money(Money),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }

    /// Render the value the way search and equality see it.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Decimal(n) => Cow::Owned(n.to_string()),
            FieldValue::Money(m) => Cow::Owned(m.display_amount()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        FieldValue::Text(Cow::Owned(s))
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<Money> for FieldValue<'_> {
    fn from(m: Money) -> Self {
        FieldValue::Money(m)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        FieldValue::DateTime(dt)
    }
}

/// A flat record the collection filter can read fields from.
///
/// Implementations return `None` for unknown names and for unset optional
/// fields; the filter treats both the same way.
pub trait Record {
    /// Fields the list views search by default.
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    /// Fields the list views offer equality filters for.
    const FILTER_FIELDS: &'static [&'static str] = &[];

    /// Read a field by name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record> Record for &R {
    const SEARCH_FIELDS: &'static [&'static str] = R::SEARCH_FIELDS;
    const FILTER_FIELDS: &'static [&'static str] = R::FILTER_FIELDS;

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// JSON objects are records keyed by their members; `a.b` reaches nested objects.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let mut current = self;
        for segment in name.split('.') {
            current = current.as_object()?.get(segment)?;
        }

        match current {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Decimal),
            },
            serde_json::Value::String(s) => Some(FieldValue::text(s)),
            other => Some(FieldValue::from(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use serde_json::json;

    #[test]
    fn test_render_variants() {
        assert_eq!(FieldValue::Integer(50).render(), "50");
        assert_eq!(FieldValue::Decimal(18.5).render(), "18.5");
        assert_eq!(FieldValue::Money(Money::new(1850, Currency::MXN)).render(), "18.50");
        assert_eq!(FieldValue::Bool(true).render(), "true");

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FieldValue::Date(date).render(), "2024-01-15");

        let dt = date.and_hms_opt(10, 35, 12).unwrap();
        assert_eq!(FieldValue::DateTime(dt).render(), "2024-01-15 10:35:12");
    }

    #[test]
    fn test_json_record_lookup() {
        let record = json!({
            "name": "Coca Cola 600ml",
            "stock": 50,
            "price": 25.5,
            "contact": null,
            "fiscal": { "rfc": "GOMA850101ABC" }
        });

        assert_eq!(record.field("name"), Some(FieldValue::text("Coca Cola 600ml")));
        assert_eq!(record.field("stock"), Some(FieldValue::Integer(50)));
        assert_eq!(record.field("price"), Some(FieldValue::Decimal(25.5)));
        assert_eq!(record.field("contact"), None);
        assert_eq!(record.field("missing"), None);
        assert_eq!(
            record.field("fiscal.rfc").map(|v| v.render().into_owned()),
            Some("GOMA850101ABC".to_string())
        );
    }

    #[test]
    fn test_json_non_object_has_no_fields() {
        assert_eq!(json!([1, 2, 3]).field("0"), None);
        assert_eq!(json!("plain").field("name"), None);
    }
}
