//! Media picker: upload a file, paste from the clipboard or have the backend
//! fetch a remote URL. The chosen media ends up as an absolute URL in `value`.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DataTransfer, File, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::ApiError;
use common::model::media::MediaKind;
use common::workflow::fetch_remote_media;

use crate::api::ApiClient;
use crate::helpers::alert;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Upload,
    Url,
}

pub enum Msg {
    SetMode(Mode),
    UrlInput(String),
    OpenFilePicker,
    Upload(File),
    FetchUrl,
    Finished(Result<String, ApiError>),
    Clear,
}

#[derive(Properties, PartialEq, Clone)]
pub struct ImageInputProps {
    pub client: ApiClient,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("Image"))]
    pub label: AttrValue,
}

pub struct ImageInput {
    mode: Mode,
    url_input: String,
    loading: bool,
    file_input_ref: NodeRef,
}

impl Component for ImageInput {
    type Message = Msg;
    type Properties = ImageInputProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            mode: Mode::Upload,
            url_input: String::new(),
            loading: false,
            file_input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetMode(mode) => {
                self.mode = mode;
                true
            }
            Msg::UrlInput(value) => {
                self.url_input = value;
                true
            }
            Msg::OpenFilePicker => {
                if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::Upload(file) => {
                self.loading = true;
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = client.upload_media(&file).await;
                    if let Err(err) = &result {
                        log::error!("upload of {} failed: {}", file.name(), err);
                    }
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::FetchUrl => {
                let url = self.url_input.trim().to_string();
                if url.is_empty() || self.loading {
                    return false;
                }
                self.loading = true;
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = fetch_remote_media(&client, &url).await;
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::Finished(result) => {
                self.loading = false;
                match result {
                    Ok(url) => {
                        if self.mode == Mode::Url {
                            self.url_input.clear();
                        }
                        ctx.props().on_change.emit(url);
                    }
                    Err(_) if self.mode == Mode::Url => alert("Failed to fetch image from URL"),
                    Err(_) => alert("Failed to upload image"),
                }
                true
            }
            Msg::Clear => {
                ctx.props().on_change.emit(String::new());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onpaste = link.batch_callback(|e: Event| {
            let file = pasted_image(&e);
            if file.is_some() {
                e.prevent_default();
            }
            file.map(Msg::Upload)
        });

        html! {
            <div class="image-input" {onpaste}>
                <label class="field-label">{ ctx.props().label.clone() }</label>
                <div class="image-input-row">
                    { self.preview(ctx) }
                    <div class="image-input-controls">
                        <div class="mode-tabs">
                            <button
                                type="button"
                                class={classes!("mode-tab", (self.mode == Mode::Upload).then_some("active"))}
                                onclick={link.callback(|_| Msg::SetMode(Mode::Upload))}
                            >
                                {"Upload / Paste"}
                            </button>
                            <button
                                type="button"
                                class={classes!("mode-tab", (self.mode == Mode::Url).then_some("active"))}
                                onclick={link.callback(|_| Msg::SetMode(Mode::Url))}
                            >
                                {"From URL"}
                            </button>
                        </div>
                        {
                            match self.mode {
                                Mode::Upload => self.upload_controls(ctx),
                                Mode::Url => self.url_controls(ctx),
                            }
                        }
                    </div>
                </div>
            </div>
        }
    }
}

impl ImageInput {
    fn preview(&self, ctx: &Context<Self>) -> Html {
        let value = ctx.props().value.clone();
        let body = if self.loading {
            html! { <span class="spinner">{"Loading..."}</span> }
        } else if value.is_empty() {
            html! { <span class="hint">{"Paste (Ctrl+V)"}</span> }
        } else {
            let media = match MediaKind::classify(&value) {
                MediaKind::Video => html! { <video src={value.clone()} muted={true} /> },
                _ => html! { <img src={value.clone()} alt="Preview" /> },
            };
            html! {
                <>
                    { media }
                    <button type="button" class="clear-btn" title="Remove" onclick={ctx.link().callback(|_| Msg::Clear)}>
                        {"✕"}
                    </button>
                </>
            }
        };
        html! { <div class="image-preview">{ body }</div> }
    }

    fn upload_controls(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <input
                    type="file"
                    accept="image/*,video/mp4,video/webm"
                    class="hidden"
                    ref={self.file_input_ref.clone()}
                    onchange={link.batch_callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let file = input.files().and_then(|files| files.get(0));
                        input.set_value("");
                        file.map(Msg::Upload)
                    })}
                />
                <button type="button" class="btn" disabled={self.loading} onclick={link.callback(|_| Msg::OpenFilePicker)}>
                    {"Choose File"}
                </button>
                <p class="hint">{"Or paste an image directly from your clipboard (Ctrl+V)."}</p>
            </div>
        }
    }

    fn url_controls(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="url-row">
                <input
                    type="text"
                    placeholder="https://example.com/image.jpg"
                    value={self.url_input.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UrlInput(input.value())
                    })}
                />
                <button
                    type="button"
                    class="btn primary"
                    disabled={self.url_input.trim().is_empty() || self.loading}
                    onclick={link.callback(|_| Msg::FetchUrl)}
                >
                    {"Fetch"}
                </button>
            </div>
        }
    }
}

/// First image file on the clipboard of a `paste` event, if any.
fn pasted_image(e: &Event) -> Option<File> {
    let items = Reflect::get(e, &JsValue::from_str("clipboardData"))
        .ok()?
        .dyn_into::<DataTransfer>()
        .ok()?
        .items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .find(|item| item.type_().contains("image"))
        .and_then(|item| item.get_as_file().ok().flatten())
}
