//! `gloo-net` implementation of the backend trait.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use common::api::{ApiError, CatalogBackend};
use common::model::entity::{Entity, EntityId, EntityPayload};
use common::model::media::{absolute_media_url, FetchMediaRequest, MediaLocation};
use common::model::tag::{Tag, TagId, TagRename};
use common::search::{EntityListQuery, TagListQuery};

/// HTTP client bound to one backend origin. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: Rc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /upload/` as multipart with the file under `file`; returns the
    /// absolute URL of the stored copy.
    pub async fn upload_media(&self, file: &File) -> Result<String, ApiError> {
        let form = FormData::new().map_err(|err| ApiError::Encode(format!("{:?}", err)))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|err| ApiError::Encode(format!("{:?}", err)))?;
        let request = Request::post(&self.url("/upload/"))
            .body(form)
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        let location: MediaLocation = read_json(send(request).await?).await?;
        Ok(self.media_url(&location.url))
    }
}

async fn send(request: Request) -> Result<Response, ApiError> {
    log::debug!("{} {}", request.method(), request.url());
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn build(result: Result<Request, gloo_net::Error>) -> Result<Request, ApiError> {
    result.map_err(|err| ApiError::Encode(err.to_string()))
}

#[async_trait(?Send)]
impl CatalogBackend for ApiClient {
    async fn list_entities(&self, query: &EntityListQuery) -> Result<Vec<Entity>, ApiError> {
        let request = build(
            Request::get(&self.url("/entities/"))
                .query(query.to_pairs())
                .build(),
        )?;
        read_json(send(request).await?).await
    }

    async fn get_entity(&self, id: EntityId) -> Result<Entity, ApiError> {
        let request = build(Request::get(&self.url(&format!("/entities/{}", id))).build())?;
        read_json(send(request).await?).await
    }

    async fn create_entity(&self, payload: &EntityPayload) -> Result<Entity, ApiError> {
        let request = build(Request::post(&self.url("/entities/")).json(payload))?;
        read_json(send(request).await?).await
    }

    async fn update_entity(&self, id: EntityId, payload: &EntityPayload) -> Result<Entity, ApiError> {
        let request = build(Request::put(&self.url(&format!("/entities/{}", id))).json(payload))?;
        read_json(send(request).await?).await
    }

    async fn delete_entity(&self, id: EntityId) -> Result<(), ApiError> {
        let request = build(Request::delete(&self.url(&format!("/entities/{}", id))).build())?;
        send(request).await.map(|_| ())
    }

    async fn list_tags(&self, query: &TagListQuery) -> Result<Vec<Tag>, ApiError> {
        let request = build(
            Request::get(&self.url("/tags/"))
                .query(query.to_pairs())
                .build(),
        )?;
        read_json(send(request).await?).await
    }

    async fn rename_tag(&self, id: TagId, name: &str) -> Result<Tag, ApiError> {
        let body = TagRename {
            name: name.to_string(),
        };
        let request = build(Request::put(&self.url(&format!("/tags/{}", id))).json(&body))?;
        read_json(send(request).await?).await
    }

    async fn delete_tag(&self, id: TagId) -> Result<(), ApiError> {
        let request = build(Request::delete(&self.url(&format!("/tags/{}", id))).build())?;
        send(request).await.map(|_| ())
    }

    async fn fetch_media(&self, url: &str) -> Result<MediaLocation, ApiError> {
        let body = FetchMediaRequest { url: url.to_string() };
        let request = build(Request::post(&self.url("/fetch-media/")).json(&body))?;
        read_json(send(request).await?).await
    }

    fn media_url(&self, relative: &str) -> String {
        absolute_media_url(&self.base_url, relative)
    }
}
