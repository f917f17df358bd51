use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::debounce::Debouncer;

pub enum Msg {
    Input(String),
}

#[derive(Properties, PartialEq, Clone)]
pub struct SearchBarProps {
    /// Receives the settled query once typing pauses.
    pub on_search: Callback<String>,
    pub delay_ms: u32,
    #[prop_or(AttrValue::Static("Search entities, tags, descriptions..."))]
    pub placeholder: AttrValue,
}

pub struct SearchBar {
    query: String,
    debouncer: Debouncer,
}

impl Component for SearchBar {
    type Message = Msg;
    type Properties = SearchBarProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            query: String::new(),
            debouncer: Debouncer::new(ctx.props().delay_ms),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(query) => {
                self.query = query.clone();
                let on_search = ctx.props().on_search.clone();
                self.debouncer.schedule(move || on_search.emit(query));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="search-bar">
                <span class="material-icons search-icon">{"search"}</span>
                <input
                    type="text"
                    placeholder={ctx.props().placeholder.clone()}
                    value={self.query.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Input(input.value())
                    })}
                />
            </div>
        }
    }
}
