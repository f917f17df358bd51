//! The REST backend as seen by the client.
//!
//! Pages never talk HTTP directly; they go through a [`CatalogBackend`]
//! handed to them at construction. The browser build uses the `gloo-net`
//! client in `frontend::api`, tests use an in-memory fake.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::entity::{Entity, EntityId, EntityPayload};
use crate::model::media::MediaLocation;
use crate::model::tag::{Tag, TagId};
use crate::search::{EntityListQuery, TagListQuery};

/// Failure of a backend call.
///
/// The UI treats every variant the same way; the split only serves logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    Encode(String),
}

#[async_trait(?Send)]
pub trait CatalogBackend {
    /// `GET /entities/`
    async fn list_entities(&self, query: &EntityListQuery) -> Result<Vec<Entity>, ApiError>;

    /// `GET /entities/{id}`
    async fn get_entity(&self, id: EntityId) -> Result<Entity, ApiError>;

    /// `POST /entities/`
    async fn create_entity(&self, payload: &EntityPayload) -> Result<Entity, ApiError>;

    /// `PUT /entities/{id}`; replaces the entity, attributes included.
    async fn update_entity(&self, id: EntityId, payload: &EntityPayload) -> Result<Entity, ApiError>;

    /// `DELETE /entities/{id}`
    async fn delete_entity(&self, id: EntityId) -> Result<(), ApiError>;

    /// `GET /tags/`
    async fn list_tags(&self, query: &TagListQuery) -> Result<Vec<Tag>, ApiError>;

    /// `PUT /tags/{id}`
    async fn rename_tag(&self, id: TagId, name: &str) -> Result<Tag, ApiError>;

    /// `DELETE /tags/{id}`
    async fn delete_tag(&self, id: TagId) -> Result<(), ApiError>;

    /// `POST /fetch-media/`: the backend downloads `url` and hosts a copy.
    async fn fetch_media(&self, url: &str) -> Result<MediaLocation, ApiError>;

    /// Absolute URL of a path returned by the media endpoints.
    fn media_url(&self, relative: &str) -> String;
}
