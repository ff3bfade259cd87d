use serde_json::{Map, Value};

/// A stored record: a JSON object whose `_id` is an opaque string.
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "_id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

pub fn id_of(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// Exact-match conditions, all of which must hold.
///
/// On a list-valued field a condition holds when any element matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Adds the condition only when a non-empty value is present, which is
    /// how optional query parameters arrive.
    pub fn eq_opt(self, field: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| match doc.get(field) {
                Some(Value::String(actual)) => actual == expected,
                Some(Value::Array(items)) => items
                    .iter()
                    .any(|item| item.as_str() == Some(expected.as_str())),
                _ => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&doc(json!({ "name": "x" }))));
    }

    #[test]
    fn test_exact_match_on_reference() {
        let filter = Filter::new().eq("school", "mem-1-1");
        assert!(filter.matches(&doc(json!({ "school": "mem-1-1" }))));
        assert!(!filter.matches(&doc(json!({ "school": "mem-1-10" }))));
        assert!(!filter.matches(&doc(json!({ "name": "no school" }))));
    }

    #[test]
    fn test_list_field_matches_any_element() {
        let filter = Filter::new().eq("courses", "c2");
        assert!(filter.matches(&doc(json!({ "courses": ["c1", "c2"] }))));
        assert!(!filter.matches(&doc(json!({ "courses": [] }))));
    }

    #[test]
    fn test_eq_opt_skips_blank_values() {
        assert!(Filter::new().eq_opt("school", None).is_empty());
        assert!(Filter::new().eq_opt("school", Some("  ")).is_empty());
        assert_eq!(Filter::new().eq_opt("school", Some("abc")).conditions().len(), 1);
    }
}
