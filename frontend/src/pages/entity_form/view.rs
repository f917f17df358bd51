//! Markup of the entity form page.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use common::form::{AttributeRow, EntityForm, FixedField, FormMode};
use common::model::attribute::AttributeField;
use common::model::entity::EntityType;

use crate::components::image_input::ImageInput;
use crate::components::modal_sheet::ModalSheet;
use crate::components::tag_input::TagInput;

use super::messages::Msg;
use super::state::EntityFormPage;

pub fn view(page: &EntityFormPage, ctx: &Context<EntityFormPage>) -> Html {
    let Some(form) = &page.form else {
        return html! { <div class="loading">{"Loading..."}</div> };
    };
    let link = ctx.link();
    let props = ctx.props();
    let title = match props.mode {
        FormMode::Create => "Add New Entity",
        FormMode::Edit(_) => "Edit Entity",
    };

    html! {
        <div class="panel entity-form">
            <div class="form-header">
                <h1>{ title }</h1>
                if form.is_dirty() {
                    <span class="dirty-dot" title="Unsaved changes" />
                }
            </div>
            <form onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit
            })}>
                { fixed_fields(form, ctx) }
                { attribute_section(form, link) }
                { image_modal(form, page, ctx) }
                <div class="form-actions">
                    <button type="button" class="btn" onclick={link.callback(|_| Msg::Cancel)}>{"Cancel"}</button>
                    <button type="submit" class="btn primary" disabled={page.saving}>
                        { if page.saving { "Saving..." } else { "Save Entity" } }
                    </button>
                </div>
            </form>
        </div>
    }
}

fn text_input(link: &Scope<EntityFormPage>, field: FixedField) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetField(field, input.value())
    })
}

fn fixed_fields(form: &EntityForm, ctx: &Context<EntityFormPage>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let fields = &form.fields;

    html! {
        <div class="form-grid">
            <div class="field half">
                <label>{"Entity Type"}</label>
                <select
                    onchange={link.batch_callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        select.value().parse::<EntityType>().ok().map(Msg::SetEntityType)
                    })}
                >
                    { for EntityType::ALL.iter().map(|t| html! {
                        <option value={t.as_str()} selected={*t == fields.entity_type}>{ t.as_str() }</option>
                    }) }
                </select>
            </div>
            <div class="field half">
                <label>{"Name"}</label>
                <input
                    type="text"
                    required={true}
                    value={fields.name.clone()}
                    oninput={text_input(link, FixedField::Name)}
                />
            </div>
            <div class="field">
                <label>{"Locator (URL/Handle)"}</label>
                <input
                    type="text"
                    required={true}
                    value={fields.locator.clone()}
                    oninput={text_input(link, FixedField::Locator)}
                />
            </div>
            <div class="field">
                <label>{"Description"}</label>
                <textarea
                    rows="3"
                    value={fields.description.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::SetField(FixedField::Description, input.value())
                    })}
                />
            </div>
            <div class="field">
                <ImageInput
                    client={props.client.clone()}
                    value={AttrValue::from(fields.image_url.clone())}
                    on_change={link.callback(|url: String| Msg::SetField(FixedField::ImageUrl, url))}
                    label="Main Image"
                />
            </div>
            <div class="field">
                <label>{"Tags"}</label>
                <TagInput
                    client={props.client.clone()}
                    value={AttrValue::from(fields.tags.clone())}
                    on_change={link.callback(|tags: String| Msg::SetField(FixedField::Tags, tags))}
                    debounce_ms={props.config.tag_suggest_debounce_ms}
                    placeholder="tech, blog, ai"
                />
            </div>
        </div>
    }
}

fn attribute_section(form: &EntityForm, link: &Scope<EntityFormPage>) -> Html {
    let rows = form.attributes.rows();
    html! {
        <div class="attributes">
            <div class="attributes-header">
                <h3>{"Dynamic Attributes"}</h3>
                <button type="button" class="btn primary small" onclick={link.callback(|_| Msg::AddAttribute)}>
                    {"+ Add Attribute"}
                </button>
            </div>
            { for rows.iter().enumerate().map(|(index, row)| attribute_row(index, row, link)) }
            if rows.is_empty() {
                <p class="empty">{"No dynamic attributes added yet."}</p>
            }
        </div>
    }
}

fn attribute_input(
    link: &Scope<EntityFormPage>,
    index: usize,
    field: AttributeField,
) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UpdateAttribute(index, field, input.value())
    })
}

fn attribute_row(index: usize, row: &AttributeRow, link: &Scope<EntityFormPage>) -> Html {
    let record = &row.record;
    if !record.active {
        return html! {
            <div class="attribute-row inactive" key={index}>
                <span class="attribute-key">{ record.key.clone() }</span>
                <span class="hint">{"Removed; kept as inactive when saved."}</span>
                <button type="button" class="btn small" onclick={link.callback(move |_| Msg::RestoreAttribute(index))}>
                    {"Restore"}
                </button>
            </div>
        };
    }

    html! {
        <div class="attribute-row" key={index}>
            <button
                type="button"
                class="remove-btn"
                title="Remove attribute"
                onclick={link.callback(move |_| Msg::RemoveAttribute(index))}
            >
                {"−"}
            </button>
            <div class="attribute-grid">
                <div>
                    <label>{"Key (Unique ID)"}</label>
                    <input
                        type="text"
                        placeholder="e.g., pricing_model"
                        value={record.key.clone()}
                        oninput={attribute_input(link, index, AttributeField::Key)}
                    />
                </div>
                <div>
                    <label>{"Description/Value"}</label>
                    <input
                        type="text"
                        placeholder="e.g., Freemium"
                        value={record.description.clone()}
                        oninput={attribute_input(link, index, AttributeField::Description)}
                    />
                </div>
                <div>
                    <label>{"URL / Image"}</label>
                    <div class="url-row">
                        <input
                            type="text"
                            value={record.url.clone()}
                            oninput={attribute_input(link, index, AttributeField::Url)}
                        />
                        <button
                            type="button"
                            class="btn small"
                            title="Upload Image"
                            onclick={link.callback(move |_| Msg::OpenImageModal(index))}
                        >
                            {"Image"}
                        </button>
                    </div>
                </div>
                <div>
                    <label>{"Remarks (Optional)"}</label>
                    <input
                        type="text"
                        placeholder="e.g., Important note"
                        value={record.remarks.clone()}
                        oninput={attribute_input(link, index, AttributeField::Remarks)}
                    />
                </div>
            </div>
        </div>
    }
}

fn image_modal(form: &EntityForm, page: &EntityFormPage, ctx: &Context<EntityFormPage>) -> Html {
    let link = ctx.link();
    let body = match page.image_modal {
        Some(index) => {
            let url = form
                .attributes
                .get(index)
                .map(|record| record.url.clone())
                .unwrap_or_default();
            html! {
                <>
                    <ImageInput
                        client={ctx.props().client.clone()}
                        value={AttrValue::from(url)}
                        on_change={link.callback(move |url: String| Msg::UpdateAttribute(index, AttributeField::Url, url))}
                        label="Attribute Image"
                    />
                    <div class="form-actions">
                        <button type="button" class="btn primary" onclick={link.callback(|_| Msg::CloseImageModal)}>
                            {"Done"}
                        </button>
                    </div>
                </>
            }
        }
        None => html! {},
    };

    html! {
        <ModalSheet
            node_ref={page.image_modal_ref.clone()}
            title="Set Image for Attribute"
            on_close={link.callback(|_| Msg::CloseImageModal)}
        >
            { body }
        </ModalSheet>
    }
}
