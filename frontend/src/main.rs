use std::rc::Rc;

use crate::app::{App, AppProps};
use crate::config::AppConfig;

mod api;
mod app;
mod components;
mod config;
mod debounce;
mod helpers;
mod logging;
mod pages;
mod route;

fn main() {
    let (config, problems) = AppConfig::from_build_env();
    logging::init(config.log_level);
    for problem in problems {
        log::warn!("{}", problem);
    }

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
