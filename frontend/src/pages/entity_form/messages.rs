use common::api::ApiError;
use common::form::{EntityForm, FixedField};
use common::model::attribute::AttributeField;
use common::model::entity::{Entity, EntityType};
use common::workflow::SaveError;

pub enum Msg {
    Loaded(Result<EntityForm, ApiError>),
    SetField(FixedField, String),
    SetEntityType(EntityType),
    AddAttribute,
    RemoveAttribute(usize),
    RestoreAttribute(usize),
    UpdateAttribute(usize, AttributeField, String),
    OpenImageModal(usize),
    CloseImageModal,
    Submit,
    Saved(Result<Entity, SaveError>),
    Cancel,
}
