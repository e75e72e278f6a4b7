//! Collection filter: free-text search combined with equality filters.

use crate::search::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel accepted value meaning "no constraint".
pub const ALL: &str = "all";

/// Spanish selector labels that also mean "no constraint".
const ALL_ALIASES: [&str; 2] = ["todas", "todos"];

/// Accepted value of one equality filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Accept {
    /// Bypass the filter.
    #[default]
    All,
    /// The field must render exactly as this value.
    Value(String),
}

impl Accept {
    /// Parse a selector value; `"all"`, `"Todas"` and `"Todos"` (any ASCII
    /// case) are the sentinel.
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        let is_sentinel = value.eq_ignore_ascii_case(ALL)
            || ALL_ALIASES.iter().any(|alias| value.eq_ignore_ascii_case(alias));
        if is_sentinel {
            Accept::All
        } else {
            Accept::Value(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Accept::All)
    }

    /// Check a field value against this constraint.
    pub fn accepts(&self, value: Option<&FieldValue<'_>>) -> bool {
        match self {
            Accept::All => true,
            Accept::Value(expected) => value.is_some_and(|v| v.render() == expected.as_str()),
        }
    }
}

impl From<String> for Accept {
    fn from(s: String) -> Self {
        Accept::parse(s)
    }
}

impl From<&str> for Accept {
    fn from(s: &str) -> Self {
        Accept::parse(s)
    }
}

impl From<Accept> for String {
    fn from(a: Accept) -> Self {
        match a {
            Accept::All => ALL.to_string(),
            Accept::Value(v) => v,
        }
    }
}

impl fmt::Display for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accept::All => f.write_str(ALL),
            Accept::Value(v) => f.write_str(v),
        }
    }
}

/// What a list view currently filters by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text; empty means no text constraint.
    #[serde(default)]
    pub search_text: String,
    /// Fields the search text is matched against.
    #[serde(default)]
    pub field_selectors: Vec<String>,
    /// Field name to accepted value; all are ANDed.
    #[serde(default)]
    pub equality_filters: BTreeMap<String, Accept>,
}

impl FilterCriteria {
    /// Criteria that accept everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria searching the record type's default fields, with every
    /// filterable field set to [`Accept::All`].
    pub fn for_record<R: Record>() -> Self {
        R::FILTER_FIELDS.iter().fold(
            Self::new().with_fields(R::SEARCH_FIELDS.iter().copied()),
            |criteria, field| criteria.with_equality(*field, Accept::All),
        )
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set the fields searched.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_selectors = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add or replace an equality filter.
    pub fn with_equality(mut self, field: impl Into<String>, accept: impl Into<Accept>) -> Self {
        self.equality_filters.insert(field.into(), accept.into());
        self
    }

    /// Whether these criteria let every record through.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.equality_filters.values().all(Accept::is_all)
    }

    /// Prepare the criteria for repeated matching.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search_text.to_lowercase(),
            criteria: self,
        }
    }

    /// Check one record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matcher().matches(record)
    }
}

/// Criteria with the search text already case-folded.
#[derive(Debug, Clone)]
pub struct Matcher<'c> {
    needle: String,
    criteria: &'c FilterCriteria,
}

impl Matcher<'_> {
    /// Check one record against text search and every equality filter.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_equality(record)
    }

    fn matches_search<R: Record + ?Sized>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.criteria.field_selectors.iter().any(|name| {
            record
                .field(name)
                .is_some_and(|value| value.render().to_lowercase().contains(&self.needle))
        })
    }

    fn matches_equality<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.criteria
            .equality_filters
            .iter()
            .filter(|(_, accept)| !accept.is_all())
            .all(|(name, accept)| accept.accepts(record.field(name).as_ref()))
    }
}

/// Lazily yield the records matching `criteria`, in their original order.
///
/// The source slice is never touched, so the same records can be filtered
/// again with different criteria.
pub fn filter<'a, R: Record>(
    records: &'a [R],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a R> + 'a {
    let matcher = criteria.matcher();
    records.iter().filter(move |record| matcher.matches(*record))
}

/// Eager form of [`filter`].
pub fn filter_to_vec<'a, R: Record>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
    let matcher = criteria.matcher();
    let visible: Vec<&R> = records.iter().filter(|r| matcher.matches(*r)).collect();
    tracing::debug!(
        total = records.len(),
        visible = visible.len(),
        search = %criteria.search_text,
        "filtered collection"
    );
    visible
}

/// Values present for `field`, in first-seen order, for populating selectors.
pub fn distinct_values<R: Record>(records: &[R], field: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for value in records.iter().filter_map(|r| r.field(field)) {
        let rendered = value.render().into_owned();
        if !seen.contains(&rendered) {
            seen.push(rendered);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customers() -> Vec<serde_json::Value> {
        vec![
            json!({"name": "María González", "code": "CLI001", "email": "maria@email.com", "type": "frequent", "status": "active"}),
            json!({"name": "Empresa ABC", "code": "CLI002", "type": "frequent", "status": "inactive"}),
            json!({"name": "Juan Pérez", "code": "CLI003", "email": "juan@email.com", "type": "new", "status": "active"}),
        ]
    }

    fn names<'a>(records: impl IntoIterator<Item = &'a serde_json::Value>) -> Vec<&'a str> {
        records
            .into_iter()
            .map(|r| r["name"].as_str().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_accept_parse_sentinel() {
        assert_eq!(Accept::parse("all"), Accept::All);
        assert_eq!(Accept::parse("ALL"), Accept::All);
        assert_eq!(Accept::parse("frequent"), Accept::Value("frequent".into()));
        assert_eq!(Accept::parse("Todas"), Accept::All);
        assert_eq!(Accept::parse("TODOS"), Accept::All);
        assert_eq!(Accept::parse("Todas las marcas"), Accept::Value("Todas las marcas".into()));
    }

    #[test]
    fn test_accept_serde_roundtrip_uses_plain_strings() {
        let criteria = FilterCriteria::new()
            .with_equality("type", "frequent")
            .with_equality("status", "all");
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["equality_filters"]["status"], "all");
        assert_eq!(json["equality_filters"]["type"], "frequent");
    }

    #[test]
    fn test_empty_criteria_returns_all_in_order() {
        let data = customers();
        let criteria = FilterCriteria::new().with_equality("status", "all");
        assert!(criteria.is_unconstrained());
        assert_eq!(
            names(filter(&data, &criteria)),
            vec!["María González", "Empresa ABC", "Juan Pérez"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_selected_fields() {
        let data = customers();
        let criteria = FilterCriteria::new()
            .with_search("cli003")
            .with_fields(["name", "code"]);
        assert_eq!(names(filter(&data, &criteria)), vec!["Juan Pérez"]);

        let criteria = FilterCriteria::new()
            .with_search("MARÍA")
            .with_fields(["name"]);
        assert_eq!(names(filter(&data, &criteria)), vec!["María González"]);
    }

    #[test]
    fn test_search_ignores_unselected_fields() {
        let data = customers();
        let criteria = FilterCriteria::new()
            .with_search("email.com")
            .with_fields(["name", "code"]);
        assert_eq!(filter(&data, &criteria).count(), 0);
    }

    #[test]
    fn test_missing_field_never_matches_search() {
        let data = customers();
        let criteria = FilterCriteria::new()
            .with_search("@")
            .with_fields(["email"]);
        assert_eq!(
            names(filter(&data, &criteria)),
            vec!["María González", "Juan Pérez"]
        );
    }

    #[test]
    fn test_equality_filters_are_anded() {
        let data = customers();
        let criteria = FilterCriteria::new()
            .with_equality("type", "frequent")
            .with_equality("status", "active");
        assert_eq!(names(filter(&data, &criteria)), vec!["María González"]);
    }

    #[test]
    fn test_equality_is_exact() {
        let data = customers();
        let criteria = FilterCriteria::new().with_equality("type", "freq");
        assert_eq!(filter(&data, &criteria).count(), 0);

        let criteria = FilterCriteria::new().with_equality("email", "maria@email.com");
        assert_eq!(names(filter(&data, &criteria)), vec!["María González"]);
    }

    #[test]
    fn test_numeric_fields_use_string_form() {
        let data = vec![json!({"name": "Coca Cola", "stock": 50}), json!({"name": "Pan", "stock": 5})];
        let criteria = FilterCriteria::new().with_search("50").with_fields(["stock"]);
        assert_eq!(names(filter(&data, &criteria)), vec!["Coca Cola"]);

        let criteria = FilterCriteria::new().with_equality("stock", "5");
        assert_eq!(names(filter(&data, &criteria)), vec!["Pan"]);
    }

    #[test]
    fn test_empty_records() {
        let data: Vec<serde_json::Value> = Vec::new();
        let criteria = FilterCriteria::new().with_search("x").with_fields(["name"]);
        assert!(filter_to_vec(&data, &criteria).is_empty());
    }

    #[test]
    fn test_filter_is_restartable() {
        let data = customers();
        let first = FilterCriteria::new().with_equality("type", "new");
        let second = FilterCriteria::new().with_equality("type", "frequent");
        assert_eq!(filter(&data, &first).count(), 1);
        assert_eq!(filter(&data, &second).count(), 2);
        assert_eq!(filter(&data, &first).count(), 1);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let data = customers();
        assert_eq!(distinct_values(&data, "type"), vec!["frequent", "new"]);
        assert_eq!(
            distinct_values(&data, "email"),
            vec!["maria@email.com", "juan@email.com"]
        );
    }
}
