use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub const ID_PROPERTY: &str = "id";

/// Anything whose properties can be read and written by name.
///
/// Rows displayed by the multifield and rows rebuilt from a submission both
/// go through this interface.
pub trait RowModel: fmt::Debug {
    fn property(&self, name: &str) -> Option<Value>;

    fn set_property(&mut self, name: &str, value: Value);

    fn id(&self) -> Option<Value> {
        self.property(ID_PROPERTY).filter(|value| !value.is_null())
    }

    /// Force evaluation of a derived property before the row is rendered.
    ///
    /// Models with lazily computed properties override this to compute and
    /// cache; the default only reads the value.
    fn materialize(&mut self, name: &str) {
        let _ = self.property(name);
    }
}

/// Insertion-ordered property bag, optionally tagged with a configured class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowItem {
    class: Option<String>,
    properties: IndexMap<String, Value>,
}

impl RowItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            properties: IndexMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Build a row from a JSON object; other values give an empty row.
    pub fn from_value(value: &Value) -> Self {
        let properties = value
            .as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self {
            class: None,
            properties,
        }
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// String view of a property; non-string scalars are formatted.
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.properties.get(name).and_then(display_value)
    }

    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<_, _>>(),
        )
    }
}

impl RowModel for RowItem {
    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.properties.insert(name.to_string(), value);
    }
}

/// Text shown in a data-table cell; `None` for null or missing values.
pub(crate) fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(if *flag { "1".into() } else { String::new() }),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let row = RowItem::new().with("b", "2").with("a", "1");
        let keys: Vec<_> = row.properties().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn id_ignores_null() {
        let row = RowItem::from_value(&json!({"id": null, "a": "x"}));
        assert_eq!(row.id(), None);
        let row = RowItem::from_value(&json!({"id": 7}));
        assert_eq!(row.id(), Some(json!(7)));
    }

    #[test]
    fn display_values_for_cells() {
        assert_eq!(display_value(&json!(null)), None);
        assert_eq!(display_value(&json!("x")), Some("x".into()));
        assert_eq!(display_value(&json!(3)), Some("3".into()));
        assert_eq!(display_value(&json!(true)), Some("1".into()));
    }
}
