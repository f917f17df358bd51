use yew::prelude::*;

use crate::route::Route;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub current: Route,
    #[prop_or_default]
    pub children: Html,
}

/// Sticky header with the app title and navigation, page content below.
pub struct Layout;

impl Component for Layout {
    type Message = ();
    type Properties = LayoutProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Layout
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let current = ctx.props().current;
        let nav_link = |route: Route, label: &'static str| {
            html! {
                <a href={route.to_hash()} class={classes!("nav-link", (current == route).then_some("active"))}>
                    { label }
                </a>
            }
        };

        html! {
            <div class="app-root">
                <header class="app-header">
                    <a href={Route::Home.to_hash()} class="app-title">{"Internet Entity Logger"}</a>
                    <nav class="app-nav">
                        { nav_link(Route::Tags, "Tags") }
                        { nav_link(Route::NewEntity, "New Entity") }
                    </nav>
                </header>
                <main class="app-main">
                    { ctx.props().children.clone() }
                </main>
            </div>
        }
    }
}
