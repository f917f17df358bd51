use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::{html, Component, Context, Html, Properties};

use common::form::FormMode;

use crate::api::ApiClient;
use crate::components::layout::Layout;
use crate::config::AppConfig;
use crate::pages::entity_detail::EntityDetail;
use crate::pages::entity_form::EntityFormPage;
use crate::pages::home::Home;
use crate::pages::tags::TagsPage;
use crate::route::Route;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

pub enum Msg {
    /// In-app navigation requested by a page.
    Navigate(Route),
    /// The location hash changed (links, back/forward).
    HashChanged,
}

pub struct App {
    route: Route,
    client: ApiClient,
    on_hash_change: Option<Closure<dyn FnMut()>>,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ApiClient::new(&ctx.props().config.api_base_url);
        log::info!("using catalog backend at {}", client.base_url());

        let link = ctx.link().clone();
        let closure = Closure::<dyn FnMut()>::new(move || link.send_message(Msg::HashChanged));
        let on_hash_change = match web_sys::window() {
            Some(window) => {
                match window
                    .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
                {
                    Ok(()) => Some(closure),
                    Err(err) => {
                        log::error!("could not listen for hash changes: {:?}", err);
                        None
                    }
                }
            }
            None => None,
        };

        Self {
            route: Route::current(),
            client,
            on_hash_change,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let next = match msg {
            Msg::Navigate(route) => {
                route.push();
                route
            }
            Msg::HashChanged => Route::current(),
        };
        if next == self.route {
            return false;
        }
        log::debug!("route {} -> {}", self.route, next);
        self.route = next;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = ctx.props().config.clone();
        let client = self.client.clone();
        let on_navigate = ctx.link().callback(Msg::Navigate);
        let key = self.route.to_hash();

        let page = match self.route {
            Route::Home => html! {
                <Home key={key} {client} {config} />
            },
            Route::NewEntity => html! {
                <EntityFormPage key={key} {client} {config} mode={FormMode::Create} {on_navigate} />
            },
            Route::EditEntity(id) => html! {
                <EntityFormPage key={key} {client} {config} mode={FormMode::Edit(id)} {on_navigate} />
            },
            Route::EntityDetail(id) => html! {
                <EntityDetail key={key} {client} {id} {on_navigate} />
            },
            Route::Tags => html! {
                <TagsPage key={key} {client} />
            },
        };

        html! {
            <Layout current={self.route}>
                { page }
            </Layout>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(window), Some(closure)) = (web_sys::window(), self.on_hash_change.take()) {
            let _ = window
                .remove_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }
    }
}
