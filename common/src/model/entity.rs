use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attribute::{lenient_attribute_map, AttributeMap};
use super::lenient::{string_or_empty, vec_or_empty};

/// Backend-assigned entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(EntityId)
    }
}

/// The closed set of things the catalog can describe.
///
/// Stored values outside the set decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityType {
    #[default]
    Website,
    Personality,
    Service,
    Software,
    #[serde(other)]
    Other,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Website,
        EntityType::Personality,
        EntityType::Service,
        EntityType::Software,
        EntityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Website => "Website",
            EntityType::Personality => "Personality",
            EntityType::Service => "Service",
            EntityType::Software => "Software",
            EntityType::Other => "Other",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown entity type '{}'", s))
    }
}

/// An entity as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default)]
    pub entity_type: EntityType,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub locator: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_attribute_map")]
    pub attributes: AttributeMap,
}

impl Entity {
    /// Attributes that are not soft-deleted, in mapping order.
    pub fn active_attributes(&self) -> impl Iterator<Item = &super::attribute::AttributeRecord> {
        self.attributes.values().filter(|attr| attr.active)
    }
}

/// Body of `POST /entities/` and `PUT /entities/{id}`.
///
/// An update replaces the whole attribute mapping; it is not a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPayload {
    pub entity_type: EntityType,
    pub name: String,
    pub locator: String,
    pub description: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub attributes: AttributeMap,
}
