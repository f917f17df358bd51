//! Entity form page used by both the create and the edit flow.
//!
//! Split the same way as the other multi-part components: `state` holds the
//! runtime data, `update` the Elm-style message handling, `view` the markup.
//! The form semantics themselves (validation, payload, dirty tracking) live in
//! `common::form`.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::{EntityForm, FormMode};
use common::workflow::load_edit_form;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::EntityFormProps;
pub use state::EntityFormPage;

use crate::helpers::set_window_dirty_flag;

impl Component for EntityFormPage {
    type Message = Msg;
    type Properties = EntityFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let policy = props.config.attribute_removal;
        match props.mode {
            FormMode::Create => EntityFormPage::new(Some(EntityForm::create(policy))),
            FormMode::Edit(id) => {
                let client = props.client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = load_edit_form(&client, id, policy).await;
                    link.send_message(Msg::Loaded(result));
                });
                EntityFormPage::new(None)
            }
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        set_window_dirty_flag(false);
    }
}
