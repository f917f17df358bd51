//! Entity form controller shared by the create and edit flows.
//!
//! Holds the fixed fields exactly as typed (tags stay a raw comma-separated
//! string) plus the editable attribute list, and turns both into the request
//! body. Submission always sends the complete attribute mapping.

mod attributes;
mod tags;

use thiserror::Error;

use crate::model::attribute::AttributeField;
use crate::model::entity::{Entity, EntityId, EntityPayload, EntityType};

pub use attributes::{AttributeList, AttributeRow, RemovalPolicy};
pub use tags::{join_tags, parse_tags};

/// Validation failures that block a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required.")]
    MissingName,
    #[error("Locator (URL/Handle) is required.")]
    MissingLocator,
}

/// Text inputs of the fixed part of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedField {
    Name,
    Locator,
    Description,
    Tags,
    ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedFields {
    pub entity_type: EntityType,
    pub name: String,
    pub locator: String,
    pub description: String,
    /// Raw comma-separated input.
    pub tags: String,
    pub image_url: String,
}

impl FixedFields {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            entity_type: entity.entity_type,
            name: entity.name.clone(),
            locator: entity.locator.clone(),
            description: entity.description.clone().unwrap_or_default(),
            tags: join_tags(&entity.tags),
            image_url: entity.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FixedField) -> &str {
        match field {
            FixedField::Name => &self.name,
            FixedField::Locator => &self.locator,
            FixedField::Description => &self.description,
            FixedField::Tags => &self.tags,
            FixedField::ImageUrl => &self.image_url,
        }
    }

    pub fn set(&mut self, field: FixedField, value: String) {
        match field {
            FixedField::Name => self.name = value,
            FixedField::Locator => self.locator = value,
            FixedField::Description => self.description = value,
            FixedField::Tags => self.tags = value,
            FixedField::ImageUrl => self.image_url = value,
        }
    }
}

/// Whether the form creates a new entity or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// A validated submission, ready for the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(EntityPayload),
    Update(EntityId, EntityPayload),
}

impl SaveRequest {
    pub fn payload(&self) -> &EntityPayload {
        match self {
            SaveRequest::Create(payload) | SaveRequest::Update(_, payload) => payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityForm {
    pub mode: FormMode,
    pub fields: FixedFields,
    pub attributes: AttributeList,
    baseline: String,
}

impl EntityForm {
    /// Empty form for the create flow.
    pub fn create(policy: RemovalPolicy) -> Self {
        let mut form = Self {
            mode: FormMode::Create,
            fields: FixedFields::default(),
            attributes: AttributeList::new(policy),
            baseline: String::new(),
        };
        form.mark_saved();
        form
    }

    /// Form populated from a loaded entity for the edit flow.
    pub fn edit(entity: &Entity, policy: RemovalPolicy) -> Self {
        let mut form = Self {
            mode: FormMode::Edit(entity.id),
            fields: FixedFields::from_entity(entity),
            attributes: AttributeList::from_mapping(&entity.attributes, policy),
            baseline: String::new(),
        };
        form.mark_saved();
        form
    }

    pub fn set_field(&mut self, field: FixedField, value: String) {
        self.fields.set(field, value);
    }

    pub fn set_entity_type(&mut self, entity_type: EntityType) {
        self.fields.entity_type = entity_type;
    }

    pub fn add_attribute(&mut self) {
        self.attributes.push_blank();
    }

    pub fn remove_attribute(&mut self, index: usize) {
        self.attributes.remove(index);
    }

    pub fn restore_attribute(&mut self, index: usize) {
        self.attributes.restore(index);
    }

    pub fn update_attribute(&mut self, index: usize, field: AttributeField, value: String) {
        self.attributes.update(index, field, value);
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.fields.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        if self.fields.locator.trim().is_empty() {
            return Err(FormError::MissingLocator);
        }
        Ok(())
    }

    /// `{...fixedFields, tags: parsed, attributes: encoded}`.
    pub fn payload(&self) -> EntityPayload {
        EntityPayload {
            entity_type: self.fields.entity_type,
            name: self.fields.name.clone(),
            locator: self.fields.locator.clone(),
            description: self.fields.description.clone(),
            image_url: self.fields.image_url.clone(),
            tags: parse_tags(&self.fields.tags),
            attributes: self.attributes.encode(),
        }
    }

    pub fn save_request(&self) -> Result<SaveRequest, FormError> {
        self.validate()?;
        let payload = self.payload();
        Ok(match self.mode {
            FormMode::Create => SaveRequest::Create(payload),
            FormMode::Edit(id) => SaveRequest::Update(id, payload),
        })
    }

    /// MD5 of the serialized payload; equal digests mean nothing to save.
    pub fn digest(&self) -> String {
        let body = serde_json::to_string(&self.payload()).unwrap_or_default();
        format!("{:x}", md5::compute(body))
    }

    pub fn mark_saved(&mut self) {
        self.baseline = self.digest();
    }

    pub fn is_dirty(&self) -> bool {
        self.baseline != self.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::{AttributeMap, AttributeRecord};
    use serde_json::json;

    fn stored_entity() -> Entity {
        let mut attributes = AttributeMap::new();
        attributes.insert("pricing".into(), AttributeRecord::new("pricing", "Freemium"));
        let mut archived = AttributeRecord::new("legacy", "old plan");
        archived.active = false;
        attributes.insert("legacy".into(), archived);
        Entity {
            id: EntityId(12),
            entity_type: EntityType::Service,
            name: "Example".into(),
            locator: "https://example.com".into(),
            description: None,
            image_url: Some("http://localhost:8000/media/a.png".into()),
            tags: vec!["tech".into(), "ai".into()],
            created_at: None,
            updated_at: None,
            attributes,
        }
    }

    #[test]
    fn create_payload_matches_the_documented_scenario() {
        let mut form = EntityForm::create(RemovalPolicy::HardDelete);
        form.set_field(FixedField::Name, "Foo".into());
        form.set_field(FixedField::Locator, "http://foo".into());
        form.set_field(FixedField::Tags, "a, b".into());
        form.add_attribute();
        form.update_attribute(0, AttributeField::Key, "k1".into());
        form.update_attribute(0, AttributeField::Description, "d1".into());

        let request = form.save_request().unwrap();
        let SaveRequest::Create(payload) = &request else {
            panic!("expected a create request, got {:?}", request);
        };
        let body = serde_json::to_value(payload).unwrap();
        assert_eq!(body["tags"], json!(["a", "b"]));
        assert_eq!(body["name"], json!("Foo"));
        assert_eq!(body["entity_type"], json!("Website"));
        assert_eq!(body["attributes"]["k1"]["key"], json!("k1"));
        assert_eq!(body["attributes"]["k1"]["description"], json!("d1"));
        assert_eq!(body["attributes"]["k1"]["active"], json!(true));
        assert_eq!(body["attributes"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn edit_form_populates_fields_verbatim() {
        let form = EntityForm::edit(&stored_entity(), RemovalPolicy::HardDelete);
        assert_eq!(form.mode, FormMode::Edit(EntityId(12)));
        assert_eq!(form.fields.tags, "tech, ai");
        assert_eq!(form.fields.description, "");
        assert_eq!(form.attributes.len(), 2);
        assert!(!form.is_dirty());
    }

    #[test]
    fn unedited_update_resends_the_same_mapping() {
        let entity = stored_entity();
        let form = EntityForm::edit(&entity, RemovalPolicy::HardDelete);
        let request = form.save_request().unwrap();
        assert_eq!(request.payload().attributes, entity.attributes);
        assert!(matches!(request, SaveRequest::Update(EntityId(12), _)));
    }

    #[test]
    fn validation_requires_name_and_locator() {
        let mut form = EntityForm::create(RemovalPolicy::HardDelete);
        assert_eq!(form.save_request(), Err(FormError::MissingName));
        form.set_field(FixedField::Name, "Foo".into());
        form.set_field(FixedField::Locator, "   ".into());
        assert_eq!(form.save_request(), Err(FormError::MissingLocator));
    }

    #[test]
    fn dirty_tracking_follows_the_payload() {
        let mut form = EntityForm::edit(&stored_entity(), RemovalPolicy::HardDelete);
        form.set_field(FixedField::Tags, "tech,ai".into());
        assert!(!form.is_dirty(), "same parsed tags means same payload");

        form.set_field(FixedField::Name, "Renamed".into());
        assert!(form.is_dirty());
        form.mark_saved();
        assert!(!form.is_dirty());

        form.add_attribute();
        assert!(!form.is_dirty(), "blank rows are not part of the payload");
    }
}
