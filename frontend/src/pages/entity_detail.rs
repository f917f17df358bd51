use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::{ApiError, CatalogBackend};
use common::detail::{visible_attributes, DetailView};
use common::format::{format_optional_timestamp, format_timestamp_ist};
use common::model::attribute::AttributeRecord;
use common::model::entity::{Entity, EntityId};
use common::model::media::MediaKind;

use crate::api::ApiClient;
use crate::helpers::{alert, confirm, scroll_to_top, show_toast};
use crate::route::Route;

pub enum Msg {
    Loaded(Result<Entity, ApiError>),
    ToggleMainImage,
    Toggle(String),
    ExpandAll,
    CollapseAll,
    Delete,
    Deleted(Result<(), ApiError>),
    ScrollTop,
}

#[derive(Properties, PartialEq, Clone)]
pub struct EntityDetailProps {
    pub client: ApiClient,
    pub id: EntityId,
    pub on_navigate: Callback<Route>,
}

pub struct EntityDetail {
    entity: Option<Entity>,
    loading: bool,
    deleting: bool,
    view: DetailView,
}

impl Component for EntityDetail {
    type Message = Msg;
    type Properties = EntityDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let id = ctx.props().id;
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client.get_entity(id).await;
            if let Err(err) = &result {
                log::error!("failed to fetch entity {}: {}", id, err);
            }
            link.send_message(Msg::Loaded(result));
        });
        Self {
            entity: None,
            loading: true,
            deleting: false,
            view: DetailView::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                self.entity = result.ok();
                true
            }
            Msg::ToggleMainImage => {
                self.view.toggle_main_image();
                true
            }
            Msg::Toggle(key) => {
                self.view.toggle(&key);
                true
            }
            Msg::ExpandAll => {
                if let Some(entity) = &self.entity {
                    self.view.expand_all(entity);
                }
                true
            }
            Msg::CollapseAll => {
                self.view.collapse_all();
                true
            }
            Msg::Delete => {
                if self.deleting || !confirm("Are you sure you want to delete this entity?") {
                    return false;
                }
                self.deleting = true;
                let client = ctx.props().client.clone();
                let id = ctx.props().id;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = client.delete_entity(id).await;
                    link.send_message(Msg::Deleted(result));
                });
                true
            }
            Msg::Deleted(result) => {
                self.deleting = false;
                match result {
                    Ok(()) => {
                        log::info!("deleted entity {}", ctx.props().id);
                        show_toast("Entity deleted.");
                        ctx.props().on_navigate.emit(Route::Home);
                    }
                    Err(err) => {
                        log::error!("failed to delete entity {}: {}", ctx.props().id, err);
                        alert("Failed to delete entity.");
                    }
                }
                true
            }
            Msg::ScrollTop => {
                scroll_to_top();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="loading">{"Loading..."}</div> };
        }
        let Some(entity) = &self.entity else {
            return html! { <div class="empty">{"Entity not found"}</div> };
        };
        let link = ctx.link();
        let attributes = visible_attributes(entity);
        let main_image = entity.image_url.clone().filter(|url| !url.is_empty());

        html! {
            <div class="entity-detail">
                <div class="panel detail-header">
                    <div class="detail-image">
                        {
                            match &main_image {
                                Some(url) => html! {
                                    <img
                                        src={url.clone()}
                                        alt={entity.name.clone()}
                                        onclick={link.callback(|_| Msg::ToggleMainImage)}
                                    />
                                },
                                None => html! { <div class="no-image">{"No Image"}</div> },
                            }
                        }
                    </div>
                    <div class="detail-fields">
                        <div class="detail-title-row">
                            <div>
                                <span class="badge">{ entity.entity_type.as_str() }</span>
                                <h1>{ entity.name.clone() }</h1>
                                <a href={entity.locator.clone()} target="_blank" rel="noopener noreferrer">
                                    { entity.locator.clone() }
                                </a>
                            </div>
                            <div class="detail-actions">
                                <a class="btn" href={Route::EditEntity(entity.id).to_hash()}>{"Edit"}</a>
                                <button class="btn danger" disabled={self.deleting} onclick={link.callback(|_| Msg::Delete)}>
                                    {"Delete"}
                                </button>
                            </div>
                        </div>
                        <div class="timestamps">
                            <span>{ format!("Created: {}", format_optional_timestamp(entity.created_at.as_deref())) }</span>
                            <span>{ format!("Updated: {}", format_optional_timestamp(entity.updated_at.as_deref())) }</span>
                        </div>
                        <p class="description">{ entity.description.clone().unwrap_or_default() }</p>
                        <h3 class="section-label">{"Tags"}</h3>
                        <div class="tags">
                            { for entity.tags.iter().map(|tag| html! { <span class="chip">{ tag.clone() }</span> }) }
                        </div>
                    </div>
                </div>
                if let Some(url) = main_image.as_ref().filter(|_| self.view.main_image_expanded) {
                    <div class="expanded-image">
                        <img src={url.clone()} alt="Expanded Main" onclick={link.callback(|_| Msg::ToggleMainImage)} />
                    </div>
                }

                <div class="attributes-header">
                    <h2>{"Attributes & Metadata"}</h2>
                    <div>
                        <button class="btn small" onclick={link.callback(|_| Msg::ExpandAll)}>{"Expand All"}</button>
                        <button class="btn small" onclick={link.callback(|_| Msg::CollapseAll)}>{"Collapse All"}</button>
                    </div>
                </div>
                <div class="attribute-cards">
                    { for attributes.iter().map(|attr| self.attribute_card(ctx, attr)) }
                    if attributes.is_empty() {
                        <div class="empty">{"No dynamic attributes found."}</div>
                    }
                </div>

                <button class="scroll-top" aria-label="Scroll to top" onclick={link.callback(|_| Msg::ScrollTop)}>
                    {"↑"}
                </button>
            </div>
        }
    }
}

impl EntityDetail {
    fn attribute_card(&self, ctx: &Context<Self>, attr: &AttributeRecord) -> Html {
        let link = ctx.link();
        let kind = MediaKind::classify(&attr.url);
        let key = attr.key.clone();
        let toggle = link.callback(move |_| Msg::Toggle(key.clone()));
        let expanded = kind == MediaKind::Image && self.view.is_expanded(&attr.key);

        html! {
            <div class="panel attribute-card" key={attr.key.clone()}>
                <div class="attribute-row">
                    if kind == MediaKind::Image {
                        <div class="thumbnail" onclick={toggle.clone()}>
                            <img src={attr.url.clone()} alt={attr.key.clone()} />
                        </div>
                    }
                    <div class="attribute-body">
                        <div class="attribute-title">
                            <h3>{ attr.key.clone() }</h3>
                            if let Some(updated) = attr.updated_at.as_deref() {
                                <span
                                    class="attribute-updated"
                                    title={format!("Created: {}", format_optional_timestamp(attr.created_at.as_deref()))}
                                >
                                    { format!("Updated: {}", format_timestamp_ist(updated)) }
                                </span>
                            }
                        </div>
                        <p>{ attr.description.clone() }</p>
                        {
                            match kind {
                                MediaKind::Video => html! {
                                    <video class="attribute-video" src={attr.url.clone()} controls={true} />
                                },
                                MediaKind::Link => html! {
                                    <a href={attr.url.clone()} target="_blank" rel="noopener noreferrer">{ attr.url.clone() }</a>
                                },
                                MediaKind::Image | MediaKind::None => html! {},
                            }
                        }
                        if !attr.remarks.is_empty() {
                            <p class="remarks">{ format!("\"{}\"", attr.remarks) }</p>
                        }
                    </div>
                </div>
                if expanded {
                    <div class="expanded-image">
                        <img src={attr.url.clone()} alt={attr.key.clone()} onclick={toggle} />
                    </div>
                }
            </div>
        }
    }
}
