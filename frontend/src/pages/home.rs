//! Listing page: debounced search, field filter, page size and paging.

use std::rc::Rc;

use num_format::{Locale, ToFormattedString};
use web_sys::HtmlSelectElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::ApiError;
use common::model::entity::Entity;
use common::search::{PageSize, SearchField, SearchState};
use common::workflow::run_listing;

use crate::api::ApiClient;
use crate::components::entity_tile::EntityTile;
use crate::components::search_bar::SearchBar;
use crate::config::AppConfig;
use crate::route::Route;

pub enum Msg {
    Search(String),
    SetField(SearchField),
    SetPageSize(PageSize),
    Previous,
    Next,
    Loaded { seq: u64, result: Result<Vec<Entity>, ApiError> },
}

#[derive(Properties, PartialEq, Clone)]
pub struct HomeProps {
    pub client: ApiClient,
    pub config: Rc<AppConfig>,
}

pub struct Home {
    search: SearchState,
}

impl Home {
    fn fetch(&mut self, ctx: &Context<Self>) {
        let request = self.search.request();
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let (seq, result) = run_listing(&client, request).await;
            link.send_message(Msg::Loaded { seq, result });
        });
    }
}

impl Component for Home {
    type Message = Msg;
    type Properties = HomeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut home = Self {
            search: SearchState::new(ctx.props().config.page_size),
        };
        home.fetch(ctx);
        home
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(query) => {
                if !self.search.set_query(query) {
                    return false;
                }
                self.fetch(ctx);
                true
            }
            Msg::SetField(field) => {
                if !self.search.set_field(field) {
                    return false;
                }
                self.fetch(ctx);
                true
            }
            Msg::SetPageSize(size) => {
                self.search.pagination.set_size(size);
                self.fetch(ctx);
                true
            }
            Msg::Previous => {
                if !self.search.pagination.can_go_back() {
                    return false;
                }
                self.search.pagination.previous();
                self.fetch(ctx);
                true
            }
            Msg::Next => {
                if !self.search.pagination.has_more {
                    return false;
                }
                self.search.pagination.next();
                self.fetch(ctx);
                true
            }
            Msg::Loaded { seq, result } => match result {
                Ok(entities) => self.search.apply(seq, entities),
                Err(_) => self.search.fail(seq),
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let pagination = &self.search.pagination;

        html! {
            <div class="home">
                <div class="home-top">
                    <SearchBar
                        on_search={link.callback(Msg::Search)}
                        delay_ms={ctx.props().config.search_debounce_ms}
                    />
                    <select
                        class="field-select"
                        onchange={link.batch_callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            select.value().parse::<SearchField>().ok().map(Msg::SetField)
                        })}
                    >
                        { for SearchField::ALL.iter().map(|field| html! {
                            <option
                                value={field.as_param().unwrap_or("all")}
                                selected={*field == self.search.field}
                            >
                                { field.label() }
                            </option>
                        }) }
                    </select>
                    <a href={Route::NewEntity.to_hash()} class="btn primary">{"+ New Entity"}</a>
                </div>

                <div class="panel results">
                    <div class="results-header">
                        <h2>{"Results"}</h2>
                        <div class="page-size">
                            <span>{"Show:"}</span>
                            <select
                                onchange={link.batch_callback(|e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    select.value().parse::<PageSize>().ok().map(Msg::SetPageSize)
                                })}
                            >
                                { for PageSize::ALL.iter().map(|size| html! {
                                    <option value={size.to_string()} selected={*size == pagination.size}>
                                        { size.to_string() }
                                    </option>
                                }) }
                            </select>
                        </div>
                    </div>

                    { self.results() }

                    <div class="pagination">
                        <button
                            class="btn"
                            disabled={!pagination.can_go_back()}
                            onclick={link.callback(|_| Msg::Previous)}
                        >
                            {"Previous"}
                        </button>
                        <span>{ format!("Page {}", (pagination.page + 1).to_formatted_string(&Locale::en)) }</span>
                        <button
                            class="btn"
                            disabled={!pagination.has_more}
                            onclick={link.callback(|_| Msg::Next)}
                        >
                            {"Next"}
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}

impl Home {
    fn results(&self) -> Html {
        if self.search.loading {
            return html! { <div class="loading">{"Loading..."}</div> };
        }
        if self.search.entities.is_empty() {
            return html! {
                <div class="empty">
                    {"No entities found. Try adjusting your search or add a new one."}
                </div>
            };
        }
        let first = self.search.pagination.skip() + 1;
        let last = self.search.pagination.skip() + self.search.entities.len();
        html! {
            <>
                <p class="range">
                    { format!(
                        "Showing {} to {}",
                        first.to_formatted_string(&Locale::en),
                        last.to_formatted_string(&Locale::en),
                    ) }
                </p>
                <div class="entity-grid">
                    { for self.search.entities.iter().map(|entity| html! {
                        <EntityTile key={entity.id.0} entity={entity.clone()} />
                    }) }
                </div>
            </>
        }
    }
}
