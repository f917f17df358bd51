//! Message handling for the entity form page.
//!
//! Every edit goes through `common::form::EntityForm` and then refreshes the
//! window dirty flag. Submission validates synchronously, then hands the form
//! to `save_entity`; the outcome decides where to navigate.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::FormMode;
use common::workflow::{save_entity, SaveError};

use crate::components::modal_sheet::{close_modal_sheet, open_modal_sheet};
use crate::helpers::{alert, confirm, show_toast};
use crate::route::Route;

use super::messages::Msg;
use super::state::EntityFormPage;

pub fn update(page: &mut EntityFormPage, ctx: &Context<EntityFormPage>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(form)) => {
            page.form = Some(form);
            page.sync_dirty_flag();
            true
        }
        Msg::Loaded(Err(_)) => {
            alert("Failed to load entity data.");
            ctx.props().on_navigate.emit(Route::Home);
            false
        }
        Msg::Submit => {
            let Some(form) = &page.form else {
                return false;
            };
            if page.saving {
                return false;
            }
            if let Err(err) = form.validate() {
                alert(&err.to_string());
                return false;
            }
            page.saving = true;
            let form = form.clone();
            let client = ctx.props().client.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = save_entity(&client, &form).await;
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(result) => {
            page.saving = false;
            let mode = ctx.props().mode;
            match result {
                Ok(entity) => {
                    if let Some(form) = &mut page.form {
                        form.mark_saved();
                    }
                    page.sync_dirty_flag();
                    match mode {
                        FormMode::Create => {
                            show_toast("Entity created.");
                            ctx.props().on_navigate.emit(Route::Home);
                        }
                        FormMode::Edit(_) => {
                            show_toast("Entity updated.");
                            ctx.props().on_navigate.emit(Route::EntityDetail(entity.id));
                        }
                    }
                }
                Err(SaveError::Invalid(err)) => alert(&err.to_string()),
                Err(SaveError::Api(_)) => match mode {
                    FormMode::Create => alert("Failed to create entity. Please check your input."),
                    FormMode::Edit(_) => alert("Failed to update entity."),
                },
            }
            true
        }
        Msg::Cancel => {
            if page.is_dirty() && !confirm("Discard unsaved changes?") {
                return false;
            }
            let target = match ctx.props().mode {
                FormMode::Create => Route::Home,
                FormMode::Edit(id) => Route::EntityDetail(id),
            };
            ctx.props().on_navigate.emit(target);
            false
        }
        Msg::OpenImageModal(index) => {
            page.image_modal = Some(index);
            open_modal_sheet(&page.image_modal_ref);
            true
        }
        Msg::CloseImageModal => {
            page.image_modal = None;
            close_modal_sheet(&page.image_modal_ref);
            true
        }
        Msg::RemoveAttribute(index) => {
            if page.remove_attribute(index) {
                close_modal_sheet(&page.image_modal_ref);
            }
            page.sync_dirty_flag();
            true
        }
        edit => {
            let Some(form) = &mut page.form else {
                return false;
            };
            match edit {
                Msg::SetField(field, value) => form.set_field(field, value),
                Msg::SetEntityType(entity_type) => form.set_entity_type(entity_type),
                Msg::AddAttribute => form.add_attribute(),
                Msg::RestoreAttribute(index) => form.restore_attribute(index),
                Msg::UpdateAttribute(index, field, value) => form.update_attribute(index, field, value),
                _ => return false,
            }
            page.sync_dirty_flag();
            true
        }
    }
}
