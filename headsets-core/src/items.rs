use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::Result;

/// Item templates keyed by their `_id`, as the server database holds them.
pub type ItemCatalog = HashMap<String, ItemTemplate>;

/// One entry of `templates.items`.
///
/// Only `_props` is ever looked into. `_id`, `_name`, `_parent` and any other
/// key stay in `headers` exactly as loaded, whatever their JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(
        rename = "_props",
        default,
        deserialize_with = "keep_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub props: Option<Value>,
    #[serde(flatten)]
    pub headers: Map<String, Value>,
}

// An explicit `"_props": null` must come back out as such; only a missing
// key reads as `None`.
fn keep_null<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ItemTemplate {
    pub fn new(id: impl Into<String>, props: Value) -> Self {
        let mut headers = Map::new();
        headers.insert("_id".to_string(), Value::String(id.into()));
        Self {
            props: Some(props),
            headers,
        }
    }

    /// `_id` when it is a string, empty otherwise.
    pub fn id(&self) -> &str {
        header_id(&self.headers)
    }

    pub fn props_mut(&mut self) -> Option<ItemProps<'_>> {
        self.id_and_props_mut().1
    }

    /// The id alongside a typed view over `_props`, borrowed together.
    pub fn id_and_props_mut(&mut self) -> (&str, Option<ItemProps<'_>>) {
        let id = header_id(&self.headers);
        let props = self
            .props
            .as_mut()
            .and_then(Value::as_object_mut)
            .map(ItemProps);
        (id, props)
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.as_ref().and_then(|p| p.get(key))
    }

    pub fn prop_number(&self, key: &str) -> Option<f64> {
        self.prop(key).and_then(Value::as_f64)
    }
}

fn header_id(headers: &Map<String, Value>) -> &str {
    headers.get("_id").and_then(Value::as_str).unwrap_or_default()
}

/// Mutable, type-checked access to an item's property bag.
pub struct ItemProps<'a>(&'a mut Map<String, Value>);

impl ItemProps<'_> {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value under `key` if it is a JSON number. Absent keys and values of
    /// any other type both read as `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Overwrites `key` with `value`. Returns false, leaving the bag as it
    /// was, when `value` is NaN or infinite since JSON cannot hold those.
    pub fn set_number(&mut self, key: &str, value: f64) -> bool {
        let Some(json) = number_value(value) else {
            return false;
        };
        self.0.insert(key.to_string(), json);
        true
    }
}

// Whole results go back as integers so a tuned template serializes the
// way the server's own JSON does (`30`, not `30.0`).
fn number_value(value: f64) -> Option<Value> {
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53

    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        return Some(Value::from(value as i64));
    }
    serde_json::Number::from_f64(value).map(Value::Number)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub items: ItemCatalog,
}

/// The slice of the server database this crate needs: `templates.items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseTables {
    #[serde(default)]
    pub templates: Templates,
}

impl DatabaseTables {
    pub fn with_items(items: ItemCatalog) -> Self {
        Self {
            templates: Templates { items },
        }
    }

    /// Builds the tables from the text of an `items.json` template dump.
    pub fn from_items_json(json: &str) -> Result<Self> {
        let items: ItemCatalog = serde_json::from_str(json)?;
        Ok(Self::with_items(items))
    }
}
