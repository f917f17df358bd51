//! Dynamic attributes attached to an entity.
//!
//! The backend stores attributes as a JSON object keyed by attribute key.
//! The editing forms work on an ordered list instead; see [`crate::codec`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::lenient::{bool_or_true, default_true, string_or_empty};

/// Persisted attribute mapping, keyed by [`AttributeRecord::key`].
pub type AttributeMap = BTreeMap<String, AttributeRecord>;

/// One user-defined fact about an entity.
///
/// `active == false` marks a soft-deleted record: it is kept in storage but
/// hidden from read views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub key: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub remarks: String,
    #[serde(default = "default_true", deserialize_with = "bool_or_true")]
    pub active: bool,
    /// Backend-assigned; never sent back.
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
    /// Backend-assigned; never sent back.
    #[serde(default, skip_serializing)]
    pub updated_at: Option<String>,
}

impl Default for AttributeRecord {
    fn default() -> Self {
        Self::blank()
    }
}

/// Editable field of an [`AttributeRecord`], addressed by the form controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeField {
    Key,
    Description,
    Url,
    Remarks,
}

impl AttributeRecord {
    /// The row appended by "Add Attribute".
    pub fn blank() -> Self {
        Self {
            key: String::new(),
            description: String::new(),
            url: String::new(),
            remarks: String::new(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            ..Self::blank()
        }
    }

    /// Returns `true` when the key would survive encoding.
    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }

    pub fn field(&self, field: AttributeField) -> &str {
        match field {
            AttributeField::Key => &self.key,
            AttributeField::Description => &self.description,
            AttributeField::Url => &self.url,
            AttributeField::Remarks => &self.remarks,
        }
    }

    pub fn set_field(&mut self, field: AttributeField, value: String) {
        match field {
            AttributeField::Key => self.key = value,
            AttributeField::Description => self.description = value,
            AttributeField::Url => self.url = value,
            AttributeField::Remarks => self.remarks = value,
        }
    }

    /// Builds a record from one value of the persisted mapping.
    ///
    /// Returns `None` only for values that are not JSON objects. Each field is
    /// read on its own: numbers and booleans in text fields become their
    /// string form, anything else that is not a string becomes `""`, and an
    /// `active` that is not a boolean counts as `true`. An empty `key`
    /// inherits `map_key`.
    pub fn from_json(map_key: &str, value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let mut record = AttributeRecord {
            key: text_field(&fields, "key"),
            description: text_field(&fields, "description"),
            url: text_field(&fields, "url"),
            remarks: text_field(&fields, "remarks"),
            active: fields.get("active").and_then(Value::as_bool).unwrap_or(true),
            created_at: fields.get("created_at").and_then(Value::as_str).map(str::to_string),
            updated_at: fields.get("updated_at").and_then(Value::as_str).map(str::to_string),
        };
        if let Some(active) = fields.get("active").filter(|v| !v.is_boolean() && !v.is_null()) {
            log::warn!("attribute '{}' has non-boolean active {}, treating as active", map_key, active);
        }
        if record.key.is_empty() {
            record.key = map_key.to_string();
        }
        Some(record)
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> String {
    match fields.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
        _ => String::new(),
    }
}

/// Deserializes the `attributes` object of an entity without ever failing on
/// an individual value. Non-object values are skipped with a warning.
pub fn lenient_attribute_map<'de, D>(deserializer: D) -> Result<AttributeMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut map = AttributeMap::new();
    for (map_key, value) in raw {
        match AttributeRecord::from_json(&map_key, value) {
            Some(record) => {
                map.insert(map_key, record);
            }
            None => log::warn!("skipping malformed attribute '{}'", map_key),
        }
    }
    Ok(map)
}
