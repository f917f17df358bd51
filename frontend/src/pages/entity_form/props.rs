use std::rc::Rc;

use yew::prelude::*;

use common::form::FormMode;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::route::Route;

/// Properties of the entity form page.
///
/// `mode` decides the flow: `Create` starts from an empty form and posts a new
/// entity, `Edit(id)` loads the entity first and replaces it on submit.
#[derive(Properties, PartialEq, Clone)]
pub struct EntityFormProps {
    pub client: ApiClient,
    pub config: Rc<AppConfig>,
    pub mode: FormMode,
    pub on_navigate: Callback<Route>,
}
