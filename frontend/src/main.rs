mod api;
mod config;
mod env_variable_utils;
mod logging;
mod models;
mod pages;
mod router;
mod session;
mod utils;
mod videos;

use crate::config::ClientConfig;
use crate::env_variable_utils::{get_app_name, is_debug_mode};
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    logging::init(is_debug_mode());

    log::info!(
        "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
        get_app_name(),
        ClientConfig::from_env().api_base_url(),
        is_debug_mode()
    );

    yew::Renderer::<App>::new().render();
}
