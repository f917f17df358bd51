//! The editable attribute list of the entity form.

use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::model::attribute::{AttributeField, AttributeMap, AttributeRecord};

/// What "remove" does to a row that already exists on the backend.
///
/// Rows added during the current edit session are always spliced out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Splice the row; saving drops the attribute from storage.
    #[default]
    HardDelete,
    /// Keep the row and mark it inactive; saving retains it with
    /// `active: false`.
    SoftDelete,
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" | "hard-delete" => Ok(RemovalPolicy::HardDelete),
            "soft" | "soft-delete" => Ok(RemovalPolicy::SoftDelete),
            other => Err(format!("unknown attribute removal policy '{}'", other)),
        }
    }
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalPolicy::HardDelete => f.write_str("hard"),
            RemovalPolicy::SoftDelete => f.write_str("soft"),
        }
    }
}

/// One row of the list plus whether it came from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub record: AttributeRecord,
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeList {
    rows: Vec<AttributeRow>,
    policy: RemovalPolicy,
}

impl AttributeList {
    pub fn new(policy: RemovalPolicy) -> Self {
        Self {
            rows: Vec::new(),
            policy,
        }
    }

    /// Builds the list from a loaded entity's mapping; every row counts as
    /// persisted.
    pub fn from_mapping(mapping: &AttributeMap, policy: RemovalPolicy) -> Self {
        let rows = codec::decode(mapping)
            .into_iter()
            .map(|record| AttributeRow {
                record,
                persisted: true,
            })
            .collect();
        Self { rows, policy }
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    pub fn rows(&self) -> &[AttributeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttributeRecord> {
        self.rows.get(index).map(|row| &row.record)
    }

    pub fn records(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn push_blank(&mut self) {
        self.rows.push(AttributeRow {
            record: AttributeRecord::blank(),
            persisted: false,
        });
    }

    /// Removes the row at `index` according to the policy. Out-of-range
    /// indices are ignored.
    pub fn remove(&mut self, index: usize) {
        let Some(persisted) = self.rows.get(index).map(|row| row.persisted) else {
            return;
        };
        if persisted && self.policy == RemovalPolicy::SoftDelete {
            self.rows[index].record.active = false;
        } else {
            self.rows.remove(index);
        }
    }

    /// Sets `active` back to `true` on a soft-deleted row.
    pub fn restore(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.record.active = true;
        }
    }

    pub fn update(&mut self, index: usize, field: AttributeField, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.record.set_field(field, value);
        }
    }

    pub fn encode(&self) -> AttributeMap {
        codec::encode(self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(policy: RemovalPolicy) -> AttributeList {
        let mut mapping = AttributeMap::new();
        mapping.insert("founded".into(), AttributeRecord::new("founded", "1998"));
        mapping.insert("pricing".into(), AttributeRecord::new("pricing", "Free"));
        AttributeList::from_mapping(&mapping, policy)
    }

    #[test]
    fn blank_rows_have_defaults() {
        let mut list = AttributeList::new(RemovalPolicy::HardDelete);
        list.push_blank();
        let row = list.get(0).unwrap();
        assert_eq!(row.key, "");
        assert!(row.active);
        assert!(!list.rows()[0].persisted);
    }

    #[test]
    fn hard_delete_drops_persisted_rows_from_the_payload() {
        let mut list = loaded(RemovalPolicy::HardDelete);
        list.remove(0);

        assert_eq!(list.len(), 1);
        let mapping = list.encode();
        assert!(!mapping.contains_key("founded"));
        assert!(mapping.contains_key("pricing"));
    }

    #[test]
    fn soft_delete_keeps_persisted_rows_inactive() {
        let mut list = loaded(RemovalPolicy::SoftDelete);
        list.remove(0);

        assert_eq!(list.len(), 2);
        let mapping = list.encode();
        assert!(!mapping["founded"].active);
        assert!(mapping["pricing"].active);

        list.restore(0);
        assert!(list.encode()["founded"].active);
    }

    #[test]
    fn soft_delete_still_splices_new_rows() {
        let mut list = loaded(RemovalPolicy::SoftDelete);
        list.push_blank();
        list.update(2, AttributeField::Key, "draft".into());
        list.remove(2);

        assert_eq!(list.len(), 2);
        assert!(!list.encode().contains_key("draft"));
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut list = loaded(RemovalPolicy::HardDelete);
        list.remove(9);
        list.update(9, AttributeField::Key, "x".into());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("soft".parse::<RemovalPolicy>().unwrap(), RemovalPolicy::SoftDelete);
        assert_eq!(" Hard ".parse::<RemovalPolicy>().unwrap(), RemovalPolicy::HardDelete);
        assert!("archive".parse::<RemovalPolicy>().is_err());
    }
}
