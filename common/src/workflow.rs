//! Multi-step operations run by the pages, generic over the backend.

use thiserror::Error;

use crate::api::{ApiError, CatalogBackend};
use crate::form::{EntityForm, FormError, RemovalPolicy, SaveRequest};
use crate::model::entity::{Entity, EntityId};
use crate::search::ListRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fetches an entity and turns it into an edit form.
pub async fn load_edit_form<B>(backend: &B, id: EntityId, policy: RemovalPolicy) -> Result<EntityForm, ApiError>
where
    B: CatalogBackend + ?Sized,
{
    let entity = backend.get_entity(id).await.inspect_err(|err| {
        log::error!("failed to load entity {} for editing: {}", id, err);
    })?;
    Ok(EntityForm::edit(&entity, policy))
}

/// Validates the form and issues the create or full update.
pub async fn save_entity<B>(backend: &B, form: &EntityForm) -> Result<Entity, SaveError>
where
    B: CatalogBackend + ?Sized,
{
    let request = form.save_request()?;
    let result = match &request {
        SaveRequest::Create(payload) => backend.create_entity(payload).await,
        SaveRequest::Update(id, payload) => backend.update_entity(*id, payload).await,
    };
    match result {
        Ok(entity) => {
            log::info!("saved entity {} ({})", entity.id, entity.name);
            Ok(entity)
        }
        Err(err) => {
            log::error!("failed to save entity: {}", err);
            Err(err.into())
        }
    }
}

/// Runs one listing request, returning its sequence number with the result
/// so the caller can discard stale responses.
pub async fn run_listing<B>(backend: &B, request: ListRequest) -> (u64, Result<Vec<Entity>, ApiError>)
where
    B: CatalogBackend + ?Sized,
{
    log::debug!("listing #{}: {:?}", request.seq, request.query);
    let result = backend.list_entities(&request.query).await;
    if let Err(err) = &result {
        log::error!("failed to fetch entities: {}", err);
    }
    (request.seq, result)
}

/// Asks the backend to host a copy of a remote file; returns its absolute URL.
pub async fn fetch_remote_media<B>(backend: &B, url: &str) -> Result<String, ApiError>
where
    B: CatalogBackend + ?Sized,
{
    let location = backend.fetch_media(url).await.inspect_err(|err| {
        log::error!("failed to fetch media from {}: {}", url, err);
    })?;
    Ok(backend.media_url(&location.url))
}
