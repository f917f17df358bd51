use uuid::Uuid;
use web_sys::js_sys;
use yew::prelude::*;

/// Full-screen overlay holding a dialog card. Hidden until opened with
/// [`open_modal_sheet`]; the `show` class is added a tick later so the CSS
/// transition runs.
pub struct ModalSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct ModalSheetProps {
    pub node_ref: NodeRef,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = ModalSheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = props.on_close.reform(|_: MouseEvent| ());
        html! {
            <div class="modal-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <div class="modal-card">
                    <button type="button" class="modal-close" onclick={on_close}>{"✕"}</button>
                    <h3 class="modal-title">{ props.title.clone() }</h3>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_modal_sheet(sheet_ref: &NodeRef) {
    toggle_show_class(sheet_ref, "add");
}

pub fn close_modal_sheet(sheet_ref: &NodeRef) {
    toggle_show_class(sheet_ref, "remove");
}

fn toggle_show_class(sheet_ref: &NodeRef, action: &str) {
    let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let func = js_sys::Function::new_no_args(&format!(
        "document.querySelector('#{}').classList.{}('show')",
        sheet.id(),
        action
    ));
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&func, 50) {
        log::warn!("could not schedule modal toggle: {:?}", err);
    }
}
