//! Tag manager: search the tag list, inspect a tag's entities, rename or
//! delete it.

use num_format::{Locale, ToFormattedString};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::{ApiError, CatalogBackend};
use common::model::entity::Entity;
use common::model::tag::{Tag, TagId};
use common::search::{EntityListQuery, TagListQuery};
use common::tag_manager::{RenameDecision, TagManager};

use crate::api::ApiClient;
use crate::components::entity_tile::EntityTile;
use crate::helpers::{alert, confirm, show_toast};

pub enum Msg {
    Search(String),
    TagsLoaded { query: String, result: Result<Vec<Tag>, ApiError> },
    Select(Tag),
    EntitiesLoaded { tag: TagId, result: Result<Vec<Entity>, ApiError> },
    StartEditing,
    CancelEditing,
    EditName(String),
    SaveRename,
    Renamed(Result<Tag, ApiError>),
    Delete,
    Deleted { id: TagId, result: Result<(), ApiError> },
}

#[derive(Properties, PartialEq, Clone)]
pub struct TagsPageProps {
    pub client: ApiClient,
}

pub struct TagsPage {
    manager: TagManager,
}

impl TagsPage {
    fn load_tags(ctx: &Context<Self>, query: TagListQuery) {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client.list_tags(&query).await;
            if let Err(err) = &result {
                log::error!("failed to fetch tags: {}", err);
            }
            link.send_message(Msg::TagsLoaded { query: query.q, result });
        });
    }

    fn load_entities(ctx: &Context<Self>, tag: TagId, query: EntityListQuery) {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = client.list_entities(&query).await;
            if let Err(err) = &result {
                log::error!("failed to fetch entities for tag {}: {}", query.q, err);
            }
            link.send_message(Msg::EntitiesLoaded { tag, result });
        });
    }
}

impl Component for TagsPage {
    type Message = Msg;
    type Properties = TagsPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut manager = TagManager::default();
        Self::load_tags(ctx, manager.set_search_query(String::new()));
        Self { manager }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(query) => {
                Self::load_tags(ctx, self.manager.set_search_query(query));
                true
            }
            Msg::TagsLoaded { query, result } => {
                if query != self.manager.search_query {
                    return false;
                }
                match result {
                    Ok(tags) => self.manager.set_tags(tags),
                    Err(_) => self.manager.loading = false,
                }
                true
            }
            Msg::Select(tag) => {
                let id = tag.id;
                let query = self.manager.select(tag);
                Self::load_entities(ctx, id, query);
                true
            }
            Msg::EntitiesLoaded { tag, result } => {
                if !self.manager.is_selected(tag) {
                    return false;
                }
                match result {
                    Ok(entities) => self.manager.set_entities(entities),
                    Err(_) => self.manager.loading_entities = false,
                }
                true
            }
            Msg::StartEditing => {
                self.manager.start_editing();
                true
            }
            Msg::CancelEditing => {
                self.manager.cancel_editing();
                true
            }
            Msg::EditName(name) => {
                self.manager.edit_name = name;
                true
            }
            Msg::SaveRename => {
                let decision = self.manager.rename_decision();
                let RenameDecision::Confirm { id, ref to, .. } = decision else {
                    return true;
                };
                let Some(message) = decision.confirmation_message() else {
                    return false;
                };
                if !confirm(&message) {
                    return false;
                }
                let name = to.clone();
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = client.rename_tag(id, &name).await;
                    link.send_message(Msg::Renamed(result));
                });
                false
            }
            Msg::Renamed(result) => match result {
                Ok(tag) => {
                    log::info!("renamed tag {} to {}", tag.id, tag.name);
                    show_toast("Tag renamed.");
                    let id = tag.id;
                    let query = self.manager.apply_renamed(tag);
                    Self::load_entities(ctx, id, query);
                    true
                }
                Err(err) => {
                    log::error!("failed to rename tag: {}", err);
                    alert("Failed to rename tag");
                    false
                }
            },
            Msg::Delete => {
                let (Some(tag), Some(message)) = (
                    self.manager.selected.clone(),
                    self.manager.delete_confirmation_message(),
                ) else {
                    return false;
                };
                if !confirm(&message) {
                    return false;
                }
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = client.delete_tag(tag.id).await;
                    link.send_message(Msg::Deleted { id: tag.id, result });
                });
                false
            }
            Msg::Deleted { id, result } => match result {
                Ok(()) => {
                    log::info!("deleted tag {}", id);
                    show_toast("Tag deleted.");
                    self.manager.apply_deleted(id);
                    true
                }
                Err(err) => {
                    log::error!("failed to delete tag {}: {}", id, err);
                    alert("Failed to delete tag");
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="tags-page">
                <aside class="panel tag-list">
                    <input
                        type="text"
                        placeholder="Search tags..."
                        value={self.manager.search_query.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::Search(input.value())
                        })}
                    />
                    {
                        if self.manager.loading {
                            html! { <div class="loading">{"Loading..."}</div> }
                        } else {
                            html! {
                                <ul>
                                    { for self.manager.tags.iter().map(|tag| {
                                        let selected = tag.clone();
                                        html! {
                                            <li
                                                key={tag.id.0}
                                                class={classes!(self.manager.is_selected(tag.id).then_some("selected"))}
                                                onclick={link.callback(move |_| Msg::Select(selected.clone()))}
                                            >
                                                { tag.name.clone() }
                                            </li>
                                        }
                                    }) }
                                </ul>
                            }
                        }
                    }
                </aside>
                <section class="tag-detail">
                    { self.detail_pane(ctx) }
                </section>
            </div>
        }
    }
}

impl TagsPage {
    fn detail_pane(&self, ctx: &Context<Self>) -> Html {
        let Some(tag) = &self.manager.selected else {
            return html! { <div class="empty">{"Select a tag to see its entities."}</div> };
        };
        let link = ctx.link();
        let header = if self.manager.editing {
            html! {
                <div class="tag-editor">
                    <input
                        type="text"
                        value={self.manager.edit_name.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::EditName(input.value())
                        })}
                        onkeydown={link.batch_callback(|e: KeyboardEvent| match e.key().as_str() {
                            "Enter" => Some(Msg::SaveRename),
                            "Escape" => Some(Msg::CancelEditing),
                            _ => None,
                        })}
                    />
                    <button class="btn primary" onclick={link.callback(|_| Msg::SaveRename)}>{"Save"}</button>
                    <button class="btn" onclick={link.callback(|_| Msg::CancelEditing)}>{"Cancel"}</button>
                </div>
            }
        } else {
            html! {
                <div class="tag-title">
                    <h1>{ tag.name.clone() }</h1>
                    <button class="btn" onclick={link.callback(|_| Msg::StartEditing)}>{"Rename"}</button>
                    <button class="btn danger" onclick={link.callback(|_| Msg::Delete)}>{"Delete"}</button>
                </div>
            }
        };

        let body = if self.manager.loading_entities {
            html! { <div class="loading">{"Loading entities..."}</div> }
        } else if self.manager.entities.is_empty() {
            html! { <div class="empty">{"No entities carry this tag."}</div> }
        } else {
            html! {
                <div class="entity-grid">
                    { for self.manager.entities.iter().map(|entity| html! {
                        <EntityTile key={entity.id.0} entity={entity.clone()} />
                    }) }
                </div>
            }
        };

        html! {
            <div class="panel">
                { header }
                <p class="count">
                    { format!("{} entities", self.manager.entities.len().to_formatted_string(&Locale::en)) }
                </p>
                { body }
            </div>
        }
    }
}
