//! In-memory stand-in for the REST backend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;
use common::api::{ApiError, CatalogBackend};
use common::model::entity::{Entity, EntityId, EntityPayload};
use common::model::media::MediaLocation;
use common::model::tag::{Tag, TagId};
use common::search::{EntityListQuery, TagListQuery};

pub const BASE_URL: &str = "http://backend.test";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListEntities(EntityListQuery),
    GetEntity(EntityId),
    Create(EntityPayload),
    Update(EntityId, EntityPayload),
    DeleteEntity(EntityId),
    ListTags(TagListQuery),
    RenameTag(TagId, String),
    DeleteTag(TagId),
    FetchMedia(String),
}

#[derive(Default)]
pub struct FakeBackend {
    pub entities: RefCell<BTreeMap<EntityId, Entity>>,
    pub tags: RefCell<Vec<Tag>>,
    pub calls: RefCell<Vec<Call>>,
    pub fail_with: RefCell<Option<ApiError>>,
    next_id: RefCell<i64>,
}

impl FakeBackend {
    pub fn with_entity(entity: Entity) -> Self {
        let backend = Self::default();
        *backend.next_id.borrow_mut() = entity.id.0;
        backend.entities.borrow_mut().insert(entity.id, entity);
        backend
    }

    pub fn failing(err: ApiError) -> Self {
        let backend = Self::default();
        *backend.fail_with.borrow_mut() = Some(err);
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_with.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn materialize(id: EntityId, payload: &EntityPayload) -> Entity {
        Entity {
            id,
            entity_type: payload.entity_type,
            name: payload.name.clone(),
            locator: payload.locator.clone(),
            description: Some(payload.description.clone()),
            image_url: Some(payload.image_url.clone()),
            tags: payload.tags.clone(),
            created_at: Some("2024-01-05T09:34:00".into()),
            updated_at: Some("2024-01-05T09:34:00".into()),
            attributes: payload.attributes.clone(),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            body: "{\"detail\":\"Not found\"}".into(),
        }
    }
}

#[async_trait(?Send)]
impl CatalogBackend for FakeBackend {
    async fn list_entities(&self, query: &EntityListQuery) -> Result<Vec<Entity>, ApiError> {
        self.record(Call::ListEntities(query.clone()))?;
        let entities = self.entities.borrow();
        let matches = entities.values().rev().filter(|entity| {
            if query.q.is_empty() {
                return true;
            }
            if query.exact_match {
                entity.tags.iter().any(|tag| *tag == query.q)
            } else {
                entity.name.contains(&query.q)
            }
        });
        Ok(matches.skip(query.skip).take(query.limit).cloned().collect())
    }

    async fn get_entity(&self, id: EntityId) -> Result<Entity, ApiError> {
        self.record(Call::GetEntity(id))?;
        self.entities.borrow().get(&id).cloned().ok_or_else(Self::not_found)
    }

    async fn create_entity(&self, payload: &EntityPayload) -> Result<Entity, ApiError> {
        self.record(Call::Create(payload.clone()))?;
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            EntityId(*next)
        };
        let entity = Self::materialize(id, payload);
        self.entities.borrow_mut().insert(id, entity.clone());
        Ok(entity)
    }

    async fn update_entity(&self, id: EntityId, payload: &EntityPayload) -> Result<Entity, ApiError> {
        self.record(Call::Update(id, payload.clone()))?;
        let mut entities = self.entities.borrow_mut();
        if !entities.contains_key(&id) {
            return Err(Self::not_found());
        }
        let entity = Self::materialize(id, payload);
        entities.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_entity(&self, id: EntityId) -> Result<(), ApiError> {
        self.record(Call::DeleteEntity(id))?;
        self.entities.borrow_mut().remove(&id).map(|_| ()).ok_or_else(Self::not_found)
    }

    async fn list_tags(&self, query: &TagListQuery) -> Result<Vec<Tag>, ApiError> {
        self.record(Call::ListTags(query.clone()))?;
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|tag| tag.name.contains(&query.q))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn rename_tag(&self, id: TagId, name: &str) -> Result<Tag, ApiError> {
        self.record(Call::RenameTag(id, name.to_string()))?;
        let mut tags = self.tags.borrow_mut();
        let tag = tags.iter_mut().find(|tag| tag.id == id).ok_or_else(Self::not_found)?;
        let old = std::mem::replace(&mut tag.name, name.to_string());
        let renamed = tag.clone();
        drop(tags);
        for entity in self.entities.borrow_mut().values_mut() {
            for entity_tag in entity.tags.iter_mut() {
                if *entity_tag == old {
                    *entity_tag = name.to_string();
                }
            }
        }
        Ok(renamed)
    }

    async fn delete_tag(&self, id: TagId) -> Result<(), ApiError> {
        self.record(Call::DeleteTag(id))?;
        self.tags.borrow_mut().retain(|tag| tag.id != id);
        Ok(())
    }

    async fn fetch_media(&self, url: &str) -> Result<MediaLocation, ApiError> {
        self.record(Call::FetchMedia(url.to_string()))?;
        Ok(MediaLocation {
            url: "/media/fetched.png".into(),
        })
    }

    fn media_url(&self, relative: &str) -> String {
        format!("{}{}", BASE_URL, relative)
    }
}
