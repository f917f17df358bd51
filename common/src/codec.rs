//! Attribute map codec.
//!
//! The backend persists attributes as a mapping keyed by attribute key, while
//! the create/edit forms need an ordered list so that rows keep a stable
//! on-screen position and blank rows can exist while the user is typing.
//!
//! Neither direction can fail. [`encode`] silently drops rows whose key is
//! empty or whitespace-only, and later rows win when keys collide.

use crate::model::attribute::{AttributeMap, AttributeRecord};

/// Mapping to editable list, in the mapping's iteration order.
///
/// Nothing is filtered: inactive records are editable too. A record whose
/// own `key` is empty takes the key it is stored under.
pub fn decode(mapping: &AttributeMap) -> Vec<AttributeRecord> {
    mapping
        .iter()
        .map(|(map_key, record)| {
            let mut record = record.clone();
            if record.key.is_empty() {
                record.key = map_key.clone();
            }
            record
        })
        .collect()
}

/// Editable list to mapping.
pub fn encode<'a, I>(records: I) -> AttributeMap
where
    I: IntoIterator<Item = &'a AttributeRecord>,
{
    let mut mapping = AttributeMap::new();
    for record in records {
        if !record.has_key() {
            continue;
        }
        mapping.insert(record.key.clone(), record.clone());
    }
    mapping
}
