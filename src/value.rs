//! Conversions from crate types into template [`Value`]s. Documents carry
//! YAML field data, templates speak [`Value`]; everything crossing that
//! boundary goes through this module.

use crate::document::Document;
use crate::paginate::Page;
use gtmpl_value::Value;
use std::collections::HashMap;

/// Converts a YAML field value into a template [`Value`]. Mappings keep only
/// their string keys; templates address fields by name, so a non-string key
/// has no address.
pub fn yaml_to_value(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Nil,
        serde_yaml::Value::Bool(b) => Value::from(*b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::from(s.as_str()),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut fields: HashMap<String, Value> = HashMap::new();
            for (key, value) in mapping.iter() {
                if let Some(key) = key.as_str() {
                    fields.insert(key.to_owned(), yaml_to_value(value));
                }
            }
            Value::Object(fields)
        }
    }
}

impl From<&Document> for Value {
    /// Converts a [`Document`] into a [`Value`] object with `path`, `date`,
    /// and `data` fields, so templates (and the posts-by-author filter) can
    /// reach `data.author` and friends.
    fn from(document: &Document) -> Value {
        let mut data: HashMap<String, Value> = HashMap::new();
        for (name, value) in &document.data {
            data.insert(name.clone(), yaml_to_value(value));
        }

        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert("path".to_owned(), Value::from(document.path.as_str()));
        fields.insert("date".to_owned(), Value::from(document.date.as_str()));
        fields.insert("data".to_owned(), Value::Object(data));
        Value::Object(fields)
    }
}

impl From<&Page> for Value {
    /// Converts a [`Page`] into a [`Value`] object. Absent `previous`/`next`
    /// links become [`Value::Nil`].
    fn from(page: &Page) -> Value {
        let option_to_value = |opt: &Option<String>| match opt {
            Some(path) => Value::from(path.as_str()),
            None => Value::Nil,
        };

        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert(
            "groupKey".to_owned(),
            Value::from(page.group_key.as_str()),
        );
        fields.insert("pageIndex".to_owned(), Value::from(page.page_index as i64));
        fields.insert("path".to_owned(), Value::from(page.path.as_str()));
        fields.insert(
            "items".to_owned(),
            Value::Array(page.items.iter().map(Value::from).collect()),
        );
        fields.insert(
            "totalPages".to_owned(),
            Value::from(page.total_pages as i64),
        );
        fields.insert("lastIndex".to_owned(), Value::from(page.last_index as i64));
        fields.insert("first".to_owned(), Value::from(page.first.as_str()));
        fields.insert("last".to_owned(), Value::from(page.last.as_str()));
        fields.insert("previous".to_owned(), option_to_value(&page.previous));
        fields.insert("next".to_owned(), option_to_value(&page.next));
        Value::Object(fields)
    }
}
