use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::CatalogBackend;
use common::form::parse_tags;
use common::model::tag::Tag;
use common::tag_input::{TagInputState, TagKey};

use crate::api::ApiClient;
use crate::debounce::Debouncer;

pub enum Msg {
    Input(String),
    Suggestions { query: String, found: Vec<Tag> },
    Key(TagKey),
    Pick(String),
    Remove(usize),
    Highlight(usize),
    Focus,
    Blur,
}

#[derive(Properties, PartialEq, Clone)]
pub struct TagInputProps {
    pub client: ApiClient,
    /// Comma-separated tags.
    pub value: AttrValue,
    pub on_change: Callback<String>,
    pub debounce_ms: u32,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

/// Chip-style tag editor with suggestions from `GET /tags/`.
pub struct TagInput {
    state: TagInputState,
    debouncer: Debouncer,
    input_ref: NodeRef,
}

impl Component for TagInput {
    type Message = Msg;
    type Properties = TagInputProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            state: TagInputState::default(),
            debouncer: Debouncer::new(ctx.props().debounce_ms),
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let value = ctx.props().value.to_string();
        match msg {
            Msg::Input(input) => {
                match self.state.set_input(input) {
                    Some(query) => {
                        let client = ctx.props().client.clone();
                        let link = ctx.link().clone();
                        self.debouncer.schedule(move || {
                            spawn_local(async move {
                                match client.list_tags(&query).await {
                                    Ok(found) => link.send_message(Msg::Suggestions { query: query.q, found }),
                                    Err(err) => log::error!("failed to fetch tag suggestions: {}", err),
                                }
                            });
                        });
                    }
                    None => self.debouncer.cancel(),
                }
                true
            }
            Msg::Suggestions { query, found } => {
                if query != self.state.input {
                    return false;
                }
                self.state.receive_suggestions(found, &value);
                true
            }
            Msg::Key(key) => {
                if let Some(new_value) = self.state.key(key, &value) {
                    self.debouncer.cancel();
                    ctx.props().on_change.emit(new_value);
                }
                true
            }
            Msg::Pick(name) => {
                self.debouncer.cancel();
                let new_value = self.state.add_tag(&value, &name);
                ctx.props().on_change.emit(new_value);
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.focus().ok();
                }
                true
            }
            Msg::Remove(index) => {
                ctx.props().on_change.emit(self.state.remove_tag(&value, index));
                false
            }
            Msg::Highlight(index) => {
                self.state.highlight(index);
                true
            }
            Msg::Focus => {
                self.state.focus();
                true
            }
            Msg::Blur => {
                self.state.hide_suggestions();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tags = parse_tags(&ctx.props().value);
        let placeholder = if tags.is_empty() {
            ctx.props().placeholder.clone()
        } else {
            AttrValue::default()
        };
        let focus_input = {
            let input_ref = self.input_ref.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    input.focus().ok();
                }
            })
        };

        html! {
            <div class="tag-input">
                <div class="tag-input-box" onclick={focus_input}>
                    { for tags.iter().enumerate().map(|(index, tag)| html! {
                        <span class="chip" key={format!("{}-{}", index, tag)}>
                            { tag.clone() }
                            <button
                                type="button"
                                class="chip-remove"
                                onclick={link.callback(move |e: MouseEvent| {
                                    e.stop_propagation();
                                    Msg::Remove(index)
                                })}
                            >
                                {"×"}
                            </button>
                        </span>
                    }) }
                    <input
                        type="text"
                        ref={self.input_ref.clone()}
                        {placeholder}
                        value={self.state.input.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::Input(input.value())
                        })}
                        onkeydown={link.batch_callback(|e: KeyboardEvent| {
                            let key = TagKey::from_key_name(&e.key())?;
                            if key.prevents_default() {
                                e.prevent_default();
                            }
                            Some(Msg::Key(key))
                        })}
                        onfocus={link.callback(|_: FocusEvent| Msg::Focus)}
                        onblur={link.callback(|_: FocusEvent| Msg::Blur)}
                    />
                </div>
                if self.state.show_suggestions && !self.state.suggestions.is_empty() {
                    <ul class="suggestions">
                        { for self.state.suggestions.iter().enumerate().map(|(index, tag)| {
                            let name = tag.name.clone();
                            html! {
                                <li
                                    key={tag.id.0}
                                    class={classes!((index == self.state.selected_index).then_some("selected"))}
                                    onmousedown={link.callback(move |e: MouseEvent| {
                                        e.prevent_default();
                                        Msg::Pick(name.clone())
                                    })}
                                    onmouseenter={link.callback(move |_: MouseEvent| Msg::Highlight(index))}
                                >
                                    { tag.name.clone() }
                                </li>
                            }
                        }) }
                    </ul>
                }
            </div>
        }
    }
}
